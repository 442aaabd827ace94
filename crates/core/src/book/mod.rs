mod error;
mod requests;
mod types;

pub use error::BookError;
pub use requests::{
    parse_create_body, parse_update_body, CreateBookRequest, ScalarValue, UpdateBookRequest,
};
pub use types::{
    Book, BookPatch, BookRecord, Numeric, ATTR_AUTHOR, ATTR_ID, ATTR_PRICE, ATTR_TITLE, ATTR_YEAR,
};
