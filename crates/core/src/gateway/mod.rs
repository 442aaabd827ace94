//! Request and response envelopes in the API Gateway proxy shape, plus the
//! error kinds the dispatcher maps onto them.

mod error;
mod types;

pub use error::{DispatchError, BOOK_NOT_FOUND, MISSING_ID, UNSUPPORTED_METHOD};
pub use types::{
    Method, ProxyRequest, ProxyResponse, APPLICATION_JSON, CONTENT_TYPE, PATH_PARAM_ID,
};

pub const BOOK_CREATED: &str = "Libro insertado con éxito";
pub const BOOK_UPDATED: &str = "Libro actualizado con éxito";
pub const BOOK_DELETED: &str = "Libro eliminado con éxito";
