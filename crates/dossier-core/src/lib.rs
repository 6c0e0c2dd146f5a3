//! Core types and trait definitions for the Dossier research-notes store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod finding;
pub mod monitor;
pub mod search;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
