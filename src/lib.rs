//! # gcodekit5
//!
//! The top-level package for the NIST RS274/NGC interpreter: a block
//! checker and a 21-phase canonical execution ordering engine for G-code
//! programs, driven through the [`DeviceSink`] trait rather than any
//! particular machine controller.
//!
//! The implementation lives in [`gcodekit5_core`]; this crate re-exports
//! its public surface so downstream consumers depend on one package.

#![allow(dead_code)]

pub use gcodekit5_core::{
    check, execute, Block, CheckError, CheckReport, CheckWarning, CommentKind, Conf, ConfigError,
    Coolant, CoolantState, CutterComp, CutterOp, DeviceError, DeviceSink, DistanceMode, Error,
    FeedMode, GCode, Letter, MCode, Mode, ModalGroup, ModalState, Opt, Params, PathControl, Plane,
    Result, RetractMode, Severity, SpindleDir, SpindleState, StartupConfig, ToolOp, Units, WordMap,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize structured logging with the default configuration: pretty
/// console output, `RUST_LOG`-driven filtering, defaulting to `INFO`.
pub fn init_logging() -> anyhow::Result<()> {
    gcodekit5_core::init_logging()
}
