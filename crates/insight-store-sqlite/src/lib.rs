//! SQLite backend for the insight record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every call is serialized on that
//! thread, which is what makes [`SqliteStore`]'s batch writes single-writer.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
