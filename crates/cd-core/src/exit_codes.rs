//! Exit codes for the cd-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing. Ranges:
//! - 0-6: success/operational outcomes
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal errors

use cd_common::{Error, ErrorCategory};

/// Exit codes for cd-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Clean = 0,

    /// Query ran but produced an empty result (nothing to display).
    NoData = 1,

    /// Invalid arguments or query parameters.
    ArgsError = 10,

    /// Dataset could not be loaded or parsed.
    DatasetError = 11,

    /// Internal error (bug).
    InternalError = 20,

    /// I/O error.
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map an error to its exit code.
    pub fn from_error(err: &Error) -> ExitCode {
        match err.category() {
            ErrorCategory::Dataset => ExitCode::DatasetError,
            ErrorCategory::Query => ExitCode::ArgsError,
            ErrorCategory::Config => ExitCode::ArgsError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}
