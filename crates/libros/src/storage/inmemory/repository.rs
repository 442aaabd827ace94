//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use libros_core::book::{Book, BookPatch, BookRecord};
use libros_core::storage::{BookRepository, Result};

/// In-memory storage backend.
///
/// Mirrors the key-value table's semantics: puts replace, updates create the
/// record if it is missing, deletes of missing ids succeed.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    books: Arc<RwLock<HashMap<String, BookRecord>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryRepository {
    async fn get_book(&self, id: &str) -> Result<Option<BookRecord>> {
        let books = self.books.read().await;
        Ok(books.get(id).cloned())
    }

    async fn scan_books(&self) -> Result<Vec<BookRecord>> {
        let books = self.books.read().await;
        Ok(books.values().cloned().collect())
    }

    async fn put_book(&self, book: &Book) -> Result<()> {
        let mut books = self.books.write().await;
        books.insert(book.id.clone(), BookRecord::from(book.clone()));
        Ok(())
    }

    async fn update_book(&self, patch: &BookPatch) -> Result<()> {
        let mut books = self.books.write().await;
        books
            .entry(patch.id.clone())
            .or_insert_with(|| BookRecord::new(patch.id.clone()))
            .apply(patch);
        Ok(())
    }

    async fn delete_book(&self, id: &str) -> Result<()> {
        let mut books = self.books.write().await;
        books.remove(id);
        Ok(())
    }
}
