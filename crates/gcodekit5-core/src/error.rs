//! Error types for the NGC interpreter core.
//!
//! Errors are layered by concern, the same way the rest of this codebase
//! separates connection, firmware, and controller errors: a block-check
//! failure is a different kind of thing than a device failure or a
//! malformed configuration file, and callers often want to match on just
//! one of those families.

use thiserror::Error;

use crate::taxonomy::Letter;

/// Errors raised while validating a block against the current modal state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    /// A code that requires at least one axis word had none.
    #[error("No axis word for {code}")]
    MissingAxisWord { code: String },

    /// A motion code ran in inverse-time feed mode without an `F` word.
    #[error("No F word in inverse time feed rate mode for {code}")]
    MissingFeedWord { code: String },

    /// The active plane's end-point words were not both present.
    #[error("Missing {letter} word for arc end point in {plane} plane")]
    MissingArcEndpoint { letter: Letter, plane: &'static str },

    /// Center-form arc is missing its plane-offset words.
    #[error("Missing {letter} word for arc center in {plane} plane")]
    MissingArcCenter { letter: Letter, plane: &'static str },

    /// A word required to be an integer was not within tolerance of one.
    #[error("{letter} word must be an integer, got {value}")]
    NotInteger { letter: Letter, value: f64 },

    /// A word's integer value fell outside its valid range.
    #[error("{letter} word {value} is out of range [{min}..{max}]")]
    OutOfRange {
        letter: Letter,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A `P` dwell value was negative.
    #[error("P word must not be negative, got {value}")]
    NegativeDwell { value: f64 },

    /// Two codes that cannot coexist in one block were both active.
    #[error("{a} cannot be used with {b} in the same block")]
    ModalConflict { a: String, b: String },

    /// An operation requiring a specific active plane ran in another.
    #[error("{code} requires the XY plane, active plane is {plane}")]
    WrongPlane { code: String, plane: &'static str },

    /// Cutter-radius compensation was already active.
    #[error("The cutter compensation is already active")]
    CompAlreadyActive,

    /// An operation forbidden while cutter-radius compensation is active.
    #[error("{code} cannot be used while cutter compensation is active")]
    CompActive { code: String },

    /// A canned cycle's first invocation lacked its perpendicular axis word.
    #[error("No {letter} word for first {code}")]
    MissingFirstInvocationAxis { code: String, letter: Letter },

    /// A canned cycle's R plane was on the wrong side of the hole bottom.
    #[error("R word is not on the retract side of the hole bottom for {code}")]
    RetractBelowBottom { code: String },

    /// An operation forbidden while in inverse-time feed mode.
    #[error("{code} cannot be used in inverse time feed rate mode")]
    InverseTimeMode { code: String },

    /// Dispatch reached a code the table has no rule for.
    #[error("Internal error: unknown G-code {0}")]
    UnknownGCode(String),

    /// Dispatch reached an M-code the table has no rule for.
    #[error("Internal error: unknown M-code {0}")]
    UnknownMCode(String),
}

/// A warning raised during checking that does not reject the block.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckWarning {
    /// An axis word was present but has no effect for the active code.
    #[error("{letter} word has no effect with {code}")]
    UselessAxisWord { code: String, letter: Letter },
}

/// Errors propagated from a [`crate::device::DeviceSink`] implementation.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The device rejected a motion request.
    #[error("Device rejected motion: {0}")]
    MotionRejected(String),

    /// The device could not complete a tool change.
    #[error("Tool change failed: {0}")]
    ToolChangeFailed(String),

    /// The device reported a fault unrelated to a specific call.
    #[error("Device fault: {0}")]
    Fault(String),
}

/// Errors raised while loading startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file was present but could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was present but malformed TOML.
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] toml::de::Error),

    /// A configuration value was outside its accepted set.
    #[error("Invalid configuration value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

/// The crate-wide error type, unifying every error family above.
#[derive(Error, Debug)]
pub enum Error {
    /// A block failed semantic checking.
    #[error("Block rejected: {0}")]
    Check(#[from] CheckError),

    /// The device sink reported a failure during execution.
    #[error("Execution failed: {0}")]
    Device(#[from] DeviceError),

    /// Startup configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl CheckError {
    /// True if this variant represents an internal dispatch bug rather
    /// than a reachable user-facing condition — the parser is contractually
    /// required to only emit codes from the closed taxonomy, so this should
    /// never actually fire outside of a bug.
    pub fn is_internal(&self) -> bool {
        matches!(self, CheckError::UnknownGCode(_) | CheckError::UnknownMCode(_))
    }
}
