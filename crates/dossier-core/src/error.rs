//! Error types for `dossier-core`.
//!
//! One error enum is shared by every layer, including the store trait, so
//! the HTTP router can classify recoverable business errors without peeking
//! through backend-specific wrappers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or empty.
  #[error("{0}")]
  Validation(String),

  /// A monitor sub-resource is at its active-entry cap.
  #[error("Maximum {limit} {what} reached")]
  Capacity { what: &'static str, limit: usize },

  /// The normalized username/URL already exists.
  #[error("{0} already exists")]
  Duplicate(&'static str),

  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  /// A fault from the storage backend (disk, malformed SQL, ...).
  #[error("storage error: {0}")]
  Storage(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Whether the error is recovered at the API boundary as a structured
  /// `{"status":"error","message":…}` payload rather than a server fault.
  pub fn is_recoverable(&self) -> bool {
    matches!(
      self,
      Error::Validation(_) | Error::Capacity { .. } | Error::Duplicate(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
