//! In-memory storage backend.
//!
//! Stores books in a `HashMap` wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted and is lost when the repository is dropped, which makes it the
//! backend for local development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use libros::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
