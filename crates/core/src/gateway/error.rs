use thiserror::Error;

use crate::book::BookError;
use crate::storage::{repository_error_to_status_code, RepositoryError};

use super::ProxyResponse;

pub const BOOK_NOT_FOUND: &str = "Libro no encontrado";
pub const MISSING_ID: &str = "Debe proporcionar un id";
pub const UNSUPPORTED_METHOD: &str = "Unsupported method";

/// Every way a dispatched request can fail, each with its own status code.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] BookError),
    #[error("Libro no encontrado")]
    NotFound { id: String },
    #[error("Debe proporcionar un id")]
    MissingId,
    #[error("Unsupported method")]
    UnsupportedMethod(String),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
    #[error("Failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Malformed event: {0}")]
    MalformedEvent(String),
}

impl DispatchError {
    /// Maps the error kind to an HTTP status code.
    ///
    /// - `Validation`, `MissingId`, `UnsupportedMethod`, `MalformedEvent` -> 400
    /// - `NotFound` -> 404
    /// - `Storage` -> per [`repository_error_to_status_code`]
    /// - `Encoding` -> 500
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::Validation(_) => 400,
            DispatchError::NotFound { .. } => 404,
            DispatchError::MissingId => 400,
            DispatchError::UnsupportedMethod(_) => 400,
            DispatchError::Storage(err) => repository_error_to_status_code(err),
            DispatchError::Encoding(_) => 500,
            DispatchError::MalformedEvent(_) => 400,
        }
    }

    /// Render as an `{"error": ...}` response. Storage messages are passed
    /// through verbatim.
    pub fn into_response(self) -> ProxyResponse {
        ProxyResponse::error(self.status_code(), &self.to_string())
    }
}
