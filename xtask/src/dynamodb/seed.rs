//! Seed command implementation.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use libros_core::book::{
    Book, Numeric, ATTR_AUTHOR, ATTR_ID, ATTR_PRICE, ATTR_TITLE, ATTR_YEAR,
};
use uuid::Uuid;

use super::error::{DynamodbError, Result};

/// DynamoDB caps `BatchWriteItem` at 25 requests.
const BATCH_SIZE: usize = 25;
const MAX_UNPROCESSED_RETRIES: usize = 5;

const CATALOGUE: &[(&str, &str, u32)] = &[
    ("Cien años de soledad", "Gabriel García Márquez", 1967),
    ("Rayuela", "Julio Cortázar", 1963),
    ("Pedro Páramo", "Juan Rulfo", 1955),
    ("Ficciones", "Jorge Luis Borges", 1944),
    ("La ciudad y los perros", "Mario Vargas Llosa", 1963),
    ("El túnel", "Ernesto Sabato", 1948),
    ("La casa de los espíritus", "Isabel Allende", 1982),
    ("Don Quijote de la Mancha", "Miguel de Cervantes", 1605),
    ("Los detectives salvajes", "Roberto Bolaño", 1998),
    ("El Aleph", "Jorge Luis Borges", 1949),
    ("La tregua", "Mario Benedetti", 1960),
    ("Como agua para chocolate", "Laura Esquivel", 1989),
];

/// Generate `count` sample books cycling through a small catalogue. Each gets
/// a fresh id so repeated seeding adds rather than replaces.
pub fn generate_seed_books(count: u32) -> Result<Vec<Book>> {
    (0..count as usize)
        .map(|i| -> Result<Book> {
            let (title, author, year) = CATALOGUE[i % CATALOGUE.len()];
            // 9.99, 12.49, 14.99, ... wrapping every ten books
            let cents = 999 + (i % 10) * 250;
            let price = format!("{}.{:02}", cents / 100, cents % 100);

            Ok(Book::new(
                Uuid::new_v4().to_string(),
                title,
                author,
                Numeric::parse(&price)?,
                Numeric::parse(&year.to_string())?,
            ))
        })
        .collect()
}

/// Convert a Book to the item layout the server writes.
fn book_to_item(book: &Book) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ATTR_ID.to_string(), AttributeValue::S(book.id.clone())),
        (ATTR_TITLE.to_string(), AttributeValue::S(book.title.clone())),
        (ATTR_AUTHOR.to_string(), AttributeValue::S(book.author.clone())),
        (ATTR_PRICE.to_string(), AttributeValue::N(book.price.to_string())),
        (ATTR_YEAR.to_string(), AttributeValue::N(book.year.to_string())),
    ])
}

/// Insert books into DynamoDB, retrying unprocessed items.
pub async fn seed_books(client: &Client, table_name: &str, books: &[Book]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in books.chunks(BATCH_SIZE) {
        let mut pending = chunk
            .iter()
            .map(|book| -> Result<WriteRequest> {
                let put = PutRequest::builder()
                    .set_item(Some(book_to_item(book)))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attempts = 0;
        while !pending.is_empty() {
            if attempts > MAX_UNPROCESSED_RETRIES {
                return Err(DynamodbError::UnprocessedItems {
                    remaining: pending.len(),
                });
            }
            attempts += 1;

            let output = client
                .batch_write_item()
                .request_items(table_name, pending)
                .send()
                .await
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            pending = output
                .unprocessed_items
                .and_then(|mut items| items.remove(table_name))
                .unwrap_or_default();
        }

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}
