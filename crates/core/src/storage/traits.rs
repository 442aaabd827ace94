use async_trait::async_trait;

use crate::book::{Book, BookPatch, BookRecord};

use super::Result;

/// Repository for book records, keyed by a single string id.
///
/// Writes are unconditional: no existence checks are made on put, update or
/// delete, and concurrent writes to one key resolve as last-write-wins in
/// the backing store.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Gets a book by its id.
    async fn get_book(&self, id: &str) -> Result<Option<BookRecord>>;

    /// Returns every stored book, unfiltered.
    async fn scan_books(&self) -> Result<Vec<BookRecord>>;

    /// Writes a full book, replacing any record with the same id.
    async fn put_book(&self, book: &Book) -> Result<()>;

    /// Overwrites the attributes present in the patch.
    async fn update_book(&self, patch: &BookPatch) -> Result<()>;

    /// Deletes a book by its id. Deleting a missing id is not an error.
    async fn delete_book(&self, id: &str) -> Result<()>;
}
