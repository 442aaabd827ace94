use std::fmt;

use serde::{Deserialize, Serialize};

use super::BookError;

/// Attribute names shared by the wire format and the storage table.
pub const ATTR_ID: &str = "id";
pub const ATTR_TITLE: &str = "titulo";
pub const ATTR_AUTHOR: &str = "autor";
pub const ATTR_PRICE: &str = "precio";
pub const ATTR_YEAR: &str = "anio";

/// A numeric attribute kept in its textual decimal form.
///
/// Values are stored as DynamoDB `N` attributes and always rendered as
/// strings in responses, so the original spelling (`"9.99"`, `"2020"`) is
/// preserved instead of round-tripping through a float.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Numeric(String);

/// Most significant digits a DynamoDB `N` attribute holds.
const MAX_SIGNIFICANT_DIGITS: usize = 38;
/// Decimal exponent range of a non-zero DynamoDB `N`: 1E-130 to 9.99..E+125.
const MIN_EXPONENT: i64 = -130;
const MAX_EXPONENT: i64 = 125;

impl Numeric {
    /// Parses a decimal number, rejecting empty, non-finite or non-numeric
    /// text and anything a DynamoDB `N` attribute cannot hold.
    pub fn parse(value: &str) -> Result<Self, BookError> {
        let trimmed = value.trim();
        let valid = !trimmed.is_empty()
            && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
            && fits_number_attribute(trimmed);

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(BookError::InvalidNumber {
                field: "value",
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks precision and magnitude of already well-formed decimal text.
fn fits_number_attribute(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits: Vec<u8> = integer.bytes().chain(fraction.bytes()).collect();
    let Some(first) = digits.iter().position(|d| *d != b'0') else {
        // Zero, whatever the exponent says.
        return true;
    };
    let last = digits.iter().rposition(|d| *d != b'0').unwrap_or(first);
    if last - first + 1 > MAX_SIGNIFICANT_DIGITS {
        return false;
    }

    let exponent = match exponent {
        Some(e) => match e.parse::<i64>() {
            Ok(e) => e,
            Err(_) => return false,
        },
        None => 0,
    };
    // Exponent of the leading digit once written as d.ddd x 10^n.
    let magnitude = exponent + integer.len() as i64 - 1 - first as i64;

    (MIN_EXPONENT..=MAX_EXPONENT).contains(&magnitude)
}

impl TryFrom<String> for Numeric {
    type Error = BookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Numeric> for String {
    fn from(value: Numeric) -> Self {
        value.0
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete book, as required by a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: Numeric,
    pub year: Numeric,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Numeric,
        year: Numeric,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price,
            year,
        }
    }
}

/// A partial update addressed by id. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Numeric>,
    pub year: Option<Numeric>,
}

impl BookPatch {
    /// Create an empty patch for the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_price(mut self, price: Numeric) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_year(mut self, year: Numeric) -> Self {
        self.year = Some(year);
        self
    }

    /// Returns true when the patch would not change any attribute.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.price.is_none() && self.year.is_none()
    }
}

/// A stored book as returned by the storage layer.
///
/// Attributes other than `id` may be absent: an update addressed to an id
/// that was never created writes only the supplied attributes. Serializes
/// to a flat string map with absent attributes omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Numeric>,
    #[serde(rename = "anio", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Numeric>,
}

impl BookRecord {
    /// Create a record carrying only its key.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            author: None,
            price: None,
            year: None,
        }
    }

    /// Overwrite the attributes present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        if let Some(author) = &patch.author {
            self.author = Some(author.clone());
        }
        if let Some(price) = &patch.price {
            self.price = Some(price.clone());
        }
        if let Some(year) = &patch.year {
            self.year = Some(year.clone());
        }
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: Some(book.title),
            author: Some(book.author),
            price: Some(book.price),
            year: Some(book.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: &str) -> Numeric {
        Numeric::parse(value).unwrap()
    }

    fn sample_book() -> Book {
        Book::new("1", "A", "B", num("9.99"), num("2020"))
    }

    #[test]
    fn test_numeric_keeps_original_spelling() {
        assert_eq!(num("9.99").as_str(), "9.99");
        assert_eq!(num(" 2020 ").as_str(), "2020");
        assert_eq!(num("-3").to_string(), "-3");
    }

    #[test]
    fn test_numeric_rejects_non_numbers() {
        assert!(Numeric::parse("").is_err());
        assert!(Numeric::parse("abc").is_err());
        assert!(Numeric::parse("NaN").is_err());
        assert!(Numeric::parse("inf").is_err());
    }

    #[test]
    fn test_numeric_limits_precision_to_38_digits() {
        assert!(Numeric::parse(&"9".repeat(38)).is_ok());
        assert!(Numeric::parse(&"1".repeat(40)).is_err());
        assert!(Numeric::parse("0.00000000000000000000000000000000000000012345").is_ok());
        assert!(Numeric::parse("1000000000000000000000000000000000000000000").is_ok());
        assert!(Numeric::parse("1.000000000000000000000000000000000000001").is_err());
    }

    #[test]
    fn test_numeric_limits_magnitude() {
        assert!(Numeric::parse("1e200").is_err());
        assert!(Numeric::parse("1e126").is_err());
        assert!(Numeric::parse("9.99e125").is_ok());
        assert!(Numeric::parse("-9.99E125").is_ok());
        assert!(Numeric::parse("1e-130").is_ok());
        assert!(Numeric::parse("0.1e-129").is_ok());
        assert!(Numeric::parse("1e-131").is_err());
        assert!(Numeric::parse("0e999").is_ok());
    }

    #[test]
    fn test_record_serializes_as_flat_string_map() {
        let record = BookRecord::from(sample_book());
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(
            json,
            r#"{"id":"1","titulo":"A","autor":"B","precio":"9.99","anio":"2020"}"#
        );
    }

    #[test]
    fn test_partial_record_omits_absent_attributes() {
        let mut record = BookRecord::new("7");
        record.apply(&BookPatch::new("7").with_title("Only title"));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"7","titulo":"Only title"}"#);
    }

    #[test]
    fn test_apply_overwrites_only_supplied_fields() {
        let mut record = BookRecord::from(sample_book());
        let patch = BookPatch::new("1").with_price(num("12.50"));

        record.apply(&patch);

        assert_eq!(record.title.as_deref(), Some("A"));
        assert_eq!(record.author.as_deref(), Some("B"));
        assert_eq!(record.price, Some(num("12.50")));
        assert_eq!(record.year, Some(num("2020")));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(BookPatch::new("1").is_empty());
        assert!(!BookPatch::new("1").with_year(num("1999")).is_empty());
    }

    #[test]
    fn test_record_deserializes_from_wire_names() {
        let record: BookRecord =
            serde_json::from_str(r#"{"id":"2","autor":"X","anio":"1984"}"#).unwrap();

        assert_eq!(record.id, "2");
        assert_eq!(record.author.as_deref(), Some("X"));
        assert_eq!(record.year, Some(num("1984")));
        assert!(record.title.is_none());
    }
}
