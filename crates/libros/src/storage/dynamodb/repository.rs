//! DynamoDB repository implementation.
//!
//! Implements [`BookRepository`] from `libros_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use libros_core::book::{Book, BookPatch, BookRecord};
use libros_core::storage::{BookRepository, Result};

use super::conversions::{book_key, book_to_item, item_to_record, patch_to_update};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};

/// DynamoDB-based repository implementation.
///
/// Holds a client constructed once at startup; cloning the SDK client is
/// cheap and shares the underlying connection pool.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl BookRepository for DynamoDbRepository {
    async fn get_book(&self, id: &str) -> Result<Option<BookRecord>> {
        let (key_name, key_value) = book_key(id);

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) if !item.is_empty() => Ok(Some(item_to_record(&item)?)),
            _ => Ok(None),
        }
    }

    async fn scan_books(&self) -> Result<Vec<BookRecord>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        // A single Scan call stops at 1 MB; follow LastEvaluatedKey until the
        // table is exhausted.
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in output.items.unwrap_or_default() {
                records.push(item_to_record(&item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = records.len(), "Scanned books");

        Ok(records)
    }

    async fn put_book(&self, book: &Book) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(book_to_item(book)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_book(&self, patch: &BookPatch) -> Result<()> {
        let Some(update) = patch_to_update(patch) else {
            return Ok(());
        };
        let (key_name, key_value) = book_key(&patch.id);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }

    async fn delete_book(&self, id: &str) -> Result<()> {
        let (key_name, key_value) = book_key(id);

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(key_name, key_value)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
