// ============================================================================
// src/error.rs – Orchestrator error taxonomy
// ============================================================================

use thiserror::Error;

/// The two ways an update run can go wrong before or during sequencing.
/// External commands are treated as opaque: a non-zero exit is reported
/// as-is, never inspected or retried.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("command failed during '{step}' (exit status {status})")]
    CommandFailed { step: String, status: i32 },
}

impl UpdateError {
    /// Exit code surfaced to the shell. `CommandFailed` inherits the
    /// failing subprocess's status; `InvalidMode` is a usage error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::InvalidMode(_) => 2,
            UpdateError::CommandFailed { status, .. } => {
                if *status > 0 {
                    *status
                } else {
                    1
                }
            }
        }
    }
}
