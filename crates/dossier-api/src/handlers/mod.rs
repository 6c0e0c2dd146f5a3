//! One module per API resource.

pub mod contacts;
pub mod findings;
pub mod monitor;
pub mod search;
pub mod subjects;

use crate::error::Error;

/// Parse an id path segment. Ids are matched as strings so a non-integer
/// segment maps to the structured 400 payload instead of axum's default
/// rejection.
pub(crate) fn parse_id(raw: &str) -> Result<i64, Error> {
  raw.parse().map_err(|_| Error::InvalidId)
}
