//! Application state.
//!
//! Holds the dispatcher and, through it, the single repository instance that
//! every request shares. The backend is chosen by feature flag; see
//! [`crate::storage`].

use std::sync::Arc;

use libros_core::storage::BookRepository;

use crate::dispatch::RequestDispatcher;

/// Shared application state, cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RequestDispatcher>,
}

impl AppState {
    /// Creates state around an existing repository.
    pub fn with_repository(repo: Arc<dyn BookRepository>) -> Self {
        Self {
            dispatcher: Arc::new(RequestDispatcher::new(repo)),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::with_repository(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::config::Config;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with process-local storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(
                table = %config.table_name,
                "Using in-memory storage; table name is ignored"
            );
            Ok(Self::with_repository(Arc::new(InMemoryRepository::new())))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::config::Config;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage. The client is built once
        /// and reused by every request.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()));
            if let Some(endpoint) = &config.aws_endpoint_url {
                loader = loader.endpoint_url(endpoint);
            }
            let aws_config = loader.load().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);

            let repo = DynamoDbRepository::new(client, config.table_name.clone());

            tracing::info!(
                table = %repo.table_name(),
                region = %config.aws_region,
                endpoint = ?config.aws_endpoint_url,
                "Using DynamoDB storage"
            );

            Ok(Self::with_repository(Arc::new(repo)))
        }
    }
}
