//! Core types and trait definitions for the Tidings digest service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod bullets;
pub mod catalog;
pub mod category;
pub mod digest;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod store;
pub mod subscription;
pub mod summarizer;

pub use error::{Error, Result};
