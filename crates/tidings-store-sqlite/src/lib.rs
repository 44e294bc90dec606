//! SQLite backend for the Tidings newsletter store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every write is a single statement or
//! a single serialized call, so concurrent subscribes for one
//! `(email, category)` pair cannot lose an update.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
