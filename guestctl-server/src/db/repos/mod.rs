//! Repository implementations for database access
//!
//! Repositories borrow the pool; every call acquires and releases its own
//! connection.

pub mod guests;

pub use guests::{DbError, Guest, GuestRepo};
