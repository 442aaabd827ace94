//! Functional core for the libros book service.
//!
//! Everything in this crate is pure: typed book records, request parsing and
//! validation, the storage contract, and the gateway envelope the dispatcher
//! speaks. Storage backends and transports live in the `libros` crate.

pub mod book;
pub mod gateway;
pub mod storage;
