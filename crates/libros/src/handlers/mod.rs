//! HTTP handlers.
//!
//! Every book route funnels into the same [`RequestDispatcher`](crate::dispatch::RequestDispatcher)
//! the Lambda entry point uses, so both surfaces answer identically.

pub mod books;
pub mod health;
pub mod invoke;
