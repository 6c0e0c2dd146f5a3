//! SQLite backend for the Dossier case store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Because every operation is a
//! single closure executed on that one connection, check-then-insert
//! sequences (monitor capacity, uniqueness) are serialized and cannot race.

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;
