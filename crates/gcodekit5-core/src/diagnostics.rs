//! Diagnostic reporting produced by the block checker.

use crate::error::{CheckError, CheckWarning};

/// Severity of a diagnostic. Errors reject the block; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Rule violation; the block is rejected.
    Error,
    /// Observable oddity; the block is still accepted.
    Warning,
}

/// The outcome of checking one block: zero or more warnings, and either
/// acceptance or the first rule violation encountered.
///
/// Checking stops at the first error (first violation wins); warnings
/// accumulate independently and never block acceptance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    warnings: Vec<CheckWarning>,
    error: Option<CheckError>,
}

impl CheckReport {
    /// A fresh, empty report: no warnings, no error.
    pub fn new() -> Self {
        CheckReport::default()
    }

    /// Record a warning. Has no effect on acceptance.
    pub fn warn(&mut self, warning: CheckWarning) {
        self.warnings.push(warning);
    }

    /// Record the block's rejection. Only the first call takes effect;
    /// subsequent calls are ignored, matching the "first violation wins"
    /// contract.
    pub fn reject(&mut self, error: CheckError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// True if the block was accepted (no error recorded).
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }

    /// The first rejection recorded, if any.
    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }

    /// Every warning recorded, in the order they were raised.
    pub fn warnings(&self) -> &[CheckWarning] {
        &self.warnings
    }

    /// Convert into a `Result`, discarding warnings. Callers that need the
    /// warnings alongside acceptance should inspect the report directly
    /// before calling this.
    pub fn into_result(self) -> Result<(), CheckError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
