use thiserror::Error;

/// Failures surfaced by collection operations. The payload is the
/// human-readable message returned to the client as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A required field is missing, null or empty.
    #[error("{0}")]
    InvalidInput(String),
    /// The identifier does not resolve to a record.
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn invalid_input(msg: &str) -> Self { Self::InvalidInput(msg.to_string()) }
    pub fn not_found(msg: &str) -> Self { Self::NotFound(msg.to_string()) }
}
