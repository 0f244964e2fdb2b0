//! Error taxonomy shared by every staging component.
//!
//! Every fallible operation in this crate returns [`StageError`], so the
//! driver handles failures uniformly no matter which stage produced them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the staging layer.
#[derive(Error, Debug)]
pub enum StageError {
    /// Malformed or inconsistent caller arguments: a wrong file suffix,
    /// a directory where a file was expected, or files spanning more
    /// than one directory.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        /// The operation that failed (`stat`, `open`, `create`, ...).
        op: &'static str,
        /// The path the operation was applied to.
        path: PathBuf,
        /// The underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// An external toolchain command could not be started or exited
    /// with failure.
    #[error("command `{command}` failed: {reason}")]
    Exec {
        /// The command line that was run.
        command: String,
        /// Why it failed: a spawn error or the exit status.
        reason: String,
    },
}

impl StageError {
    /// Create an [`StageError::InvalidInput`] with the given reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Attach operation and path context to a raw I/O error.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
