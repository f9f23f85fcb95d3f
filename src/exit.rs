// src/exit.rs
//! Standardized process exit codes for `refnet`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::RefnetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RefnetExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (snapshot unreadable, config I/O).
    Error = 1,
    /// Input validation failed (malformed snapshot or config, bad arguments).
    InvalidInput = 2,
    /// A focus target was required but did not resolve.
    FocusNotFound = 3,
}

impl RefnetExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed run by inspecting the root cause.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<RefnetError>() {
            Some(RefnetError::FocusNotFound(_)) => Self::FocusNotFound,
            Some(
                RefnetError::Json { .. } | RefnetError::Config { .. } | RefnetError::InvalidInput(_),
            ) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for RefnetExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for RefnetExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => {
                eprintln!("Error: {e:#}");
                Self::for_error(&e)
            }
        }
    }
}
