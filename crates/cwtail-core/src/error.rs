//! Error taxonomy for the tailing pipeline.

use thiserror::Error;

/// Classified failures from the remote log service and the local
/// filter-pattern stage.
///
/// Only two variants are ever recoverable, and each in exactly one place:
/// `NotFound` by the stream initializer's probe retry (when the target
/// asked for it), and `Throttled` by the poll loop's single fixed-delay
/// page retry. Everything else terminates the process.
#[derive(Debug, Error)]
pub enum TailError {
    /// The log group (or stream) does not exist on the remote service.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The remote service rejected the request because the account-wide
    /// request rate was exceeded.
    #[error("request rate exceeded: {0}")]
    Throttled(String),

    /// Any other remote service failure. Always fatal.
    #[error("service error: {0}")]
    Service(String),

    /// Malformed exclude pattern, surfaced before any polling starts.
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl TailError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}
