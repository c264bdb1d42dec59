//! Core types and trait definitions for the insight ingest service.
//!
//! This crate is deliberately free of HTTP, database and file-format
//! dependencies. Decoders, stores and the API all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod field;
pub mod normalize;
pub mod record;
pub mod store;
pub mod upload;

pub use error::{Error, Result};
