//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and book
//! types. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use libros_core::book::{
    Book, BookPatch, BookRecord, Numeric, ATTR_AUTHOR, ATTR_ID, ATTR_PRICE, ATTR_TITLE, ATTR_YEAR,
};
use libros_core::storage::RepositoryError;

/// Primary key for a book.
pub fn book_key(id: &str) -> (String, AttributeValue) {
    (ATTR_ID.to_string(), AttributeValue::S(id.to_string()))
}

/// Convert a Book to a DynamoDB item.
pub fn book_to_item(book: &Book) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(ATTR_ID.to_string(), AttributeValue::S(book.id.clone()));
    item.insert(ATTR_TITLE.to_string(), AttributeValue::S(book.title.clone()));
    item.insert(
        ATTR_AUTHOR.to_string(),
        AttributeValue::S(book.author.clone()),
    );
    item.insert(
        ATTR_PRICE.to_string(),
        AttributeValue::N(book.price.to_string()),
    );
    item.insert(
        ATTR_YEAR.to_string(),
        AttributeValue::N(book.year.to_string()),
    );

    item
}

/// Convert a DynamoDB item to a BookRecord.
///
/// Only `id` is required; items written by an update may lack the rest.
pub fn item_to_record(
    item: &HashMap<String, AttributeValue>,
) -> Result<BookRecord, RepositoryError> {
    Ok(BookRecord {
        id: get_string(item, ATTR_ID)?,
        title: get_optional_string(item, ATTR_TITLE),
        author: get_optional_string(item, ATTR_AUTHOR),
        price: get_optional_number(item, ATTR_PRICE)?,
        year: get_optional_number(item, ATTR_YEAR)?,
    })
}

/// A `SET` update expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Build the update expression for a patch. Returns `None` for an empty patch.
pub fn patch_to_update(patch: &BookPatch) -> Option<UpdateExpression> {
    let mut assignments = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    let mut set = |attr: &str, value: AttributeValue| {
        assignments.push(format!("#{attr} = :{attr}"));
        names.insert(format!("#{attr}"), attr.to_string());
        values.insert(format!(":{attr}"), value);
    };

    if let Some(title) = &patch.title {
        set(ATTR_TITLE, AttributeValue::S(title.clone()));
    }
    if let Some(author) = &patch.author {
        set(ATTR_AUTHOR, AttributeValue::S(author.clone()));
    }
    if let Some(price) = &patch.price {
        set(ATTR_PRICE, AttributeValue::N(price.to_string()));
    }
    if let Some(year) = &patch.year {
        set(ATTR_YEAR, AttributeValue::N(year.to_string()));
    }

    if assignments.is_empty() {
        return None;
    }

    Some(UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get an optional numeric attribute, accepting `N` or a numeric `S`.
fn get_optional_number(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<Numeric>, RepositoryError> {
    let Some(value) = item.get(key) else {
        return Ok(None);
    };
    let text = value
        .as_n()
        .or_else(|_| value.as_s())
        .map_err(|_| RepositoryError::InvalidData(format!("Invalid number {}", key)))?;

    Numeric::parse(text)
        .map(Some)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}
