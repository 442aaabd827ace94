//! Request payloads for book operations.
//!
//! Bodies arrive as JSON text. Field names follow the storage attributes
//! (`titulo`, `autor`, `precio`, `anio`), with the English names accepted as
//! aliases. Scalars are accepted in any JSON form and kept as written, so
//! `"precio": 9.990` becomes `"9.990"` and a numeric id wider than any
//! integer type keeps every digit.

use serde::Deserialize;
use serde_json::value::RawValue;

use super::types::{ATTR_AUTHOR, ATTR_ID, ATTR_PRICE, ATTR_TITLE, ATTR_YEAR};
use super::{Book, BookError, BookPatch, Numeric};

/// A JSON scalar as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    Text(String),
    /// A JSON number, spelled exactly as in the body.
    Number(String),
    Bool(bool),
}

impl ScalarValue {
    /// Classify a raw JSON value. Objects and arrays are rejected.
    pub fn from_raw(raw: &RawValue, field: &'static str) -> Result<Self, BookError> {
        let text = raw.get().trim();
        match text.as_bytes().first() {
            Some(b'"') => serde_json::from_str(text)
                .map(ScalarValue::Text)
                .map_err(|e| BookError::MalformedBody(e.to_string())),
            Some(b'-' | b'0'..=b'9') => Ok(ScalarValue::Number(text.to_string())),
            _ if text == "true" => Ok(ScalarValue::Bool(true)),
            _ if text == "false" => Ok(ScalarValue::Bool(false)),
            _ => Err(BookError::MalformedBody(format!(
                "{field} must be a string, number or boolean"
            ))),
        }
    }

    /// The value's textual form.
    pub fn into_text(self) -> String {
        match self {
            ScalarValue::Text(s) => s,
            ScalarValue::Number(n) => n,
            ScalarValue::Bool(b) => b.to_string(),
        }
    }
}

/// Request payload for creating (or replacing) a book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub id: Option<Box<RawValue>>,
    #[serde(default, rename = "titulo", alias = "title")]
    pub title: Option<Box<RawValue>>,
    #[serde(default, rename = "autor", alias = "author")]
    pub author: Option<Box<RawValue>>,
    #[serde(default, rename = "precio", alias = "price")]
    pub price: Option<Box<RawValue>>,
    #[serde(default, rename = "anio", alias = "year")]
    pub year: Option<Box<RawValue>>,
}

impl CreateBookRequest {
    /// Parse a request body.
    pub fn from_body(body: Option<&str>) -> Result<Self, BookError> {
        parse_body(body)
    }

    /// Validate that every field is present and convert into a [`Book`].
    pub fn into_book(self) -> Result<Book, BookError> {
        let id = require_id(self.id)?;
        let title = require(self.title, ATTR_TITLE)?.into_text();
        let author = require(self.author, ATTR_AUTHOR)?.into_text();
        let price = to_numeric(require(self.price, ATTR_PRICE)?, ATTR_PRICE)?;
        let year = to_numeric(require(self.year, ATTR_YEAR)?, ATTR_YEAR)?;

        Ok(Book::new(id, title, author, price, year))
    }
}

/// Request payload for a partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub id: Option<Box<RawValue>>,
    #[serde(default, rename = "titulo", alias = "title")]
    pub title: Option<Box<RawValue>>,
    #[serde(default, rename = "autor", alias = "author")]
    pub author: Option<Box<RawValue>>,
    #[serde(default, rename = "precio", alias = "price")]
    pub price: Option<Box<RawValue>>,
    #[serde(default, rename = "anio", alias = "year")]
    pub year: Option<Box<RawValue>>,
}

impl UpdateBookRequest {
    /// Parse a request body.
    pub fn from_body(body: Option<&str>) -> Result<Self, BookError> {
        parse_body(body)
    }

    /// Validate the id and that at least one attribute is being changed.
    pub fn into_patch(self) -> Result<BookPatch, BookError> {
        let patch = BookPatch {
            id: require_id(self.id)?,
            title: optional(self.title, ATTR_TITLE)?.map(ScalarValue::into_text),
            author: optional(self.author, ATTR_AUTHOR)?.map(ScalarValue::into_text),
            price: optional(self.price, ATTR_PRICE)?
                .map(|v| to_numeric(v, ATTR_PRICE))
                .transpose()?,
            year: optional(self.year, ATTR_YEAR)?
                .map(|v| to_numeric(v, ATTR_YEAR))
                .transpose()?,
        };

        if patch.is_empty() {
            return Err(BookError::EmptyUpdate);
        }

        Ok(patch)
    }
}

/// Parse and validate a create body in one step.
pub fn parse_create_body(body: Option<&str>) -> Result<Book, BookError> {
    CreateBookRequest::from_body(body)?.into_book()
}

/// Parse and validate an update body in one step.
pub fn parse_update_body(body: Option<&str>) -> Result<BookPatch, BookError> {
    UpdateBookRequest::from_body(body)?.into_patch()
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: Option<&str>) -> Result<T, BookError> {
    let body = body
        .filter(|b| !b.trim().is_empty())
        .ok_or(BookError::MissingBody)?;
    serde_json::from_str(body).map_err(|e| BookError::MalformedBody(e.to_string()))
}

fn optional(
    value: Option<Box<RawValue>>,
    field: &'static str,
) -> Result<Option<ScalarValue>, BookError> {
    value
        .map(|raw| ScalarValue::from_raw(&raw, field))
        .transpose()
}

fn require(value: Option<Box<RawValue>>, field: &'static str) -> Result<ScalarValue, BookError> {
    optional(value, field)?.ok_or(BookError::MissingField(field))
}

fn require_id(value: Option<Box<RawValue>>) -> Result<String, BookError> {
    let id = require(value, ATTR_ID)?.into_text();
    if id.is_empty() {
        return Err(BookError::EmptyId);
    }
    Ok(id)
}

fn to_numeric(value: ScalarValue, field: &'static str) -> Result<Numeric, BookError> {
    let text = value.into_text();
    Numeric::parse(&text).map_err(|_| BookError::InvalidNumber { field, value: text })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_english_aliases() {
        let body = r#"{"id":"1","title":"A","author":"B","price":"9.99","year":"2020"}"#;
        let book = parse_create_body(Some(body)).unwrap();

        assert_eq!(book.id, "1");
        assert_eq!(book.title, "A");
        assert_eq!(book.author, "B");
        assert_eq!(book.price.as_str(), "9.99");
        assert_eq!(book.year.as_str(), "2020");
    }

    #[test]
    fn test_create_accepts_storage_names_and_json_numbers() {
        let body = r#"{"id":42,"titulo":"Rayuela","autor":"Cortázar","precio":15.5,"anio":1963}"#;
        let book = parse_create_body(Some(body)).unwrap();

        assert_eq!(book.id, "42");
        assert_eq!(book.author, "Cortázar");
        assert_eq!(book.price.as_str(), "15.5");
        assert_eq!(book.year.as_str(), "1963");
    }

    #[test]
    fn test_create_keeps_number_spelling() {
        let body = r#"{"id":123456789012345678901234,"titulo":"A","autor":"B","precio":9.990,"anio":2e3}"#;
        let book = parse_create_body(Some(body)).unwrap();

        assert_eq!(book.id, "123456789012345678901234");
        assert_eq!(book.price.as_str(), "9.990");
        assert_eq!(book.year.as_str(), "2e3");
    }

    #[test]
    fn test_create_accepts_null_as_absent() {
        let body = r#"{"id":"1","titulo":null,"autor":"B","precio":"1","anio":"2"}"#;
        let err = parse_create_body(Some(body)).unwrap_err();

        assert_eq!(err, BookError::MissingField("titulo"));
    }

    #[test]
    fn test_create_rejects_structured_values() {
        let body = r#"{"id":"1","titulo":["A"],"autor":"B","precio":"1","anio":"2"}"#;
        let err = parse_create_body(Some(body)).unwrap_err();

        assert!(matches!(err, BookError::MalformedBody(_)));
    }

    #[test]
    fn test_create_rejects_out_of_range_year() {
        let year = "1".repeat(40);
        let body = format!(r#"{{"id":"1","titulo":"A","autor":"B","precio":"1","anio":{year}}}"#);
        let err = parse_create_body(Some(&body)).unwrap_err();

        assert_eq!(err, BookError::InvalidNumber { field: "anio", value: year });
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        let body = r#"{"id":"1","titulo":"A","precio":"1","anio":"2"}"#;
        let err = parse_create_body(Some(body)).unwrap_err();

        assert_eq!(err, BookError::MissingField("autor"));
    }

    #[test]
    fn test_create_rejects_non_numeric_price() {
        let body = r#"{"id":"1","titulo":"A","autor":"B","precio":"cheap","anio":"2020"}"#;
        let err = parse_create_body(Some(body)).unwrap_err();

        assert_eq!(
            err,
            BookError::InvalidNumber {
                field: "precio",
                value: "cheap".to_string()
            }
        );
    }

    #[test]
    fn test_create_rejects_empty_id() {
        let body = r#"{"id":"","titulo":"A","autor":"B","precio":"1","anio":"2"}"#;
        assert_eq!(parse_create_body(Some(body)).unwrap_err(), BookError::EmptyId);
    }

    #[test]
    fn test_missing_and_blank_bodies() {
        assert_eq!(parse_create_body(None).unwrap_err(), BookError::MissingBody);
        assert_eq!(
            parse_update_body(Some("   ")).unwrap_err(),
            BookError::MissingBody
        );
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_create_body(Some("{not json")).unwrap_err();
        assert!(matches!(err, BookError::MalformedBody(_)));
    }

    #[test]
    fn test_update_keeps_only_supplied_fields() {
        let patch = parse_update_body(Some(r#"{"id":"1","precio":"20"}"#)).unwrap();

        assert_eq!(patch.id, "1");
        assert_eq!(patch.price.as_ref().map(Numeric::as_str), Some("20"));
        assert!(patch.title.is_none());
        assert!(patch.author.is_none());
        assert!(patch.year.is_none());
    }

    #[test]
    fn test_update_requires_a_field() {
        let err = parse_update_body(Some(r#"{"id":"1"}"#)).unwrap_err();
        assert_eq!(err, BookError::EmptyUpdate);
    }

    #[test]
    fn test_update_requires_id() {
        let err = parse_update_body(Some(r#"{"titulo":"A"}"#)).unwrap_err();
        assert_eq!(err, BookError::MissingField("id"));
    }
}
