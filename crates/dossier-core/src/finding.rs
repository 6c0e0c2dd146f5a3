//! Finding — a documented, sourced piece of evidence, optionally linked to a
//! subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::none_if_blank;
use crate::{Error, Result};

/// Canonical importance levels. Stored as free text, same looseness as
/// [`SubjectStatus`](crate::subject::SubjectStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
  Low,
  Medium,
  High,
  Critical,
}

impl Importance {
  pub fn as_str(self) -> &'static str {
    match self {
      Importance::Low => "Low",
      Importance::Medium => "Medium",
      Importance::High => "High",
      Importance::Critical => "Critical",
    }
  }
}

/// A persisted finding. `subject_id` is a soft reference: deleting the
/// subject leaves it dangling rather than cascading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
  pub id:           i64,
  pub title:        String,
  pub finding_type: Option<String>,
  pub description:  Option<String>,
  pub source_url:   Option<String>,
  pub source_name:  Option<String>,
  pub subject_id:   Option<i64>,
  pub tags:         Option<String>,
  pub importance:   String,
  pub verified:     bool,
  pub notes:        Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   Option<DateTime<Utc>>,
}

/// A finding with the referenced subject's display name denormalized in, as
/// returned by list queries. `subject_name` is null for dangling or absent
/// references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingWithSubject {
  #[serde(flatten)]
  pub finding:      Finding,
  pub subject_name: Option<String>,
}

/// Validated input for recording a finding.
#[derive(Debug, Clone)]
pub struct NewFinding {
  pub title:        String,
  pub finding_type: Option<String>,
  pub description:  Option<String>,
  pub source_url:   Option<String>,
  pub source_name:  Option<String>,
  pub subject_id:   Option<i64>,
  pub tags:         Option<String>,
  pub importance:   String,
}

impl NewFinding {
  /// The title is required; importance defaults to `Medium` when absent.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    title: impl Into<String>,
    finding_type: Option<String>,
    description: Option<String>,
    source_url: Option<String>,
    source_name: Option<String>,
    subject_id: Option<i64>,
    tags: Option<String>,
    importance: Option<String>,
  ) -> Result<Self> {
    let title = title.into().trim().to_owned();
    if title.is_empty() {
      return Err(Error::Validation("title is required".into()));
    }
    Ok(Self {
      title,
      finding_type: none_if_blank(finding_type),
      description: none_if_blank(description),
      source_url: none_if_blank(source_url),
      source_name: none_if_blank(source_name),
      subject_id,
      tags: none_if_blank(tags),
      importance: none_if_blank(importance)
        .unwrap_or_else(|| Importance::Medium.as_str().to_owned()),
    })
  }
}

/// Optional exact-match filters for listing findings.
#[derive(Debug, Clone, Default)]
pub struct FindingFilter {
  pub finding_type: Option<String>,
  pub importance:   Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_required() {
    let err =
      NewFinding::new("", None, None, None, None, None, None, None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn importance_defaults_to_medium() {
    let f = NewFinding::new("Leaked ledger", None, None, None, None, None, None, None)
      .unwrap();
    assert_eq!(f.importance, "Medium");

    let f = NewFinding::new(
      "Leaked ledger",
      None,
      None,
      None,
      None,
      None,
      None,
      Some("Critical".into()),
    )
    .unwrap();
    assert_eq!(f.importance, "Critical");
  }
}
