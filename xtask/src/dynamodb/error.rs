//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Table '{table_name}' is keyed by '{actual}', expected '{expected}'")]
    KeyMismatch {
        table_name: String,
        expected: String,
        actual: String,
    },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,

    #[error("{remaining} items still unprocessed after retries")]
    UnprocessedItems { remaining: usize },

    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] libros_core::book::BookError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
