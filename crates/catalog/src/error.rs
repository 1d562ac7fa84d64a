//! Error handling for catalog API operations.

use thiserror::Error;

/// Failure of a catalog call
///
/// Errors end up inside UI messages, so every variant carries its cause
/// as text and the type stays `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure, non-success status or undecodable body
    #[error("failed to fetch {operation}: {reason}")]
    FetchFailed {
        operation: &'static str,
        reason: String,
    },
    /// A listing page used for a random pick had no entries
    #[error("no plants found on page {page}")]
    EmptyResult { page: u32 },
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl CatalogError {
    pub(crate) fn fetch_failed(operation: &'static str, reason: impl ToString) -> Self {
        Self::FetchFailed {
            operation,
            reason: reason.to_string(),
        }
    }
}
