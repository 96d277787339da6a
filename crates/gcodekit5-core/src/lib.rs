//! # gcodekit5-core
//!
//! The NIST RS274/NGC interpreter core: a block checker and a 21-phase
//! execution ordering engine, built around an explicit, passed-by-value
//! modal state rather than ambient or global state.
//!
//! ## Modules
//!
//! - [`taxonomy`]: the closed G-code/M-code/modal-group enumerations and
//!   the letter/axis/plane bitmasks the checker and engine dispatch on.
//! - [`block`]: the parsed representation of one program line.
//! - [`params`]: numbered-parameter storage, addressable by name or by raw
//!   NIST/EMC2 slot number.
//! - [`modal_state`]: persistent interpreter state carried across blocks.
//! - [`diagnostics`]: the checker's warning/error reporting types.
//! - [`checker`]: per-code validation rules.
//! - [`engine`]: the 21-phase execution pipeline.
//! - [`device`]: the device sink trait the engine drives.
//! - [`config`]: startup configuration (units, plane, coordinate system).
//! - [`error`]: the crate's layered error types.

pub mod block;
pub mod checker;
pub mod config;
pub mod device;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod modal_state;
pub mod params;
pub mod taxonomy;

pub use block::{Block, CommentKind};
pub use checker::{check, is_int};
pub use config::StartupConfig;
pub use device::{Conf, Coolant, CutterOp, DeviceSink, Mode, Opt, SpindleDir, ToolOp};
pub use diagnostics::{CheckReport, Severity};
pub use engine::execute;
pub use error::{CheckError, CheckWarning, ConfigError, DeviceError, Error, Result};
pub use modal_state::{
    CoolantState, CutterComp, DistanceMode, FeedMode, ModalState, PathControl, RetractMode,
    SpindleState, Units,
};
pub use params::Params;
pub use taxonomy::{GCode, Letter, MCode, ModalGroup, Plane, WordMap};

/// Crate version, as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize structured logging with the default configuration: pretty
/// console output, `RUST_LOG`-driven filtering, defaulting to `INFO`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

    Ok(())
}
