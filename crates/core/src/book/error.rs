use thiserror::Error;

/// Errors that can occur when parsing or validating book payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Request body is required")]
    MissingBody,
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Book id cannot be empty")]
    EmptyId,
    #[error("Field {field} must be numeric, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Update must include at least one of: titulo, autor, precio, anio")]
    EmptyUpdate,
}
