//! Subject — a named individual or entity under investigation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Canonical investigation statuses.
///
/// New records default to [`SubjectStatus::New`]. Updates deliberately accept
/// any string (the `status` column is free text), so this enum documents the
/// canonical set rather than constraining writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectStatus {
  New,
  Investigating,
  Verified,
}

impl SubjectStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      SubjectStatus::New => "New",
      SubjectStatus::Investigating => "Investigating",
      SubjectStatus::Verified => "Verified",
    }
  }
}

/// Canonical risk levels; same looseness as [`SubjectStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
  Unknown,
  Low,
  Medium,
  High,
  Critical,
}

impl RiskLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      RiskLevel::Unknown => "Unknown",
      RiskLevel::Low => "Low",
      RiskLevel::Medium => "Medium",
      RiskLevel::High => "High",
      RiskLevel::Critical => "Critical",
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted investigation subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
  pub id:                 i64,
  pub name_en:            String,
  pub name_fa:            Option<String>,
  pub aliases:            Option<String>,
  pub location_spotted:   Option<String>,
  pub country:            Option<String>,
  pub event_description:  Option<String>,
  pub linkedin_url:       Option<String>,
  pub linkedin_headline:  Option<String>,
  pub linkedin_companies: Option<String>,
  pub linkedin_education: Option<String>,
  pub twitter_url:        Option<String>,
  pub sanctions_checked:  bool,
  pub sanctions_hits:     Option<String>,
  pub risk_level:         String,
  pub risk_indicators:    Option<String>,
  pub status:             String,
  pub notes:              Option<String>,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         Option<DateTime<Utc>>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Validated input for creating a subject.
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub name_en:           String,
  pub name_fa:           Option<String>,
  pub location_spotted:  Option<String>,
  pub event_description: Option<String>,
  pub notes:             Option<String>,
}

impl NewSubject {
  /// Build a new-subject input. The English name is required and non-empty;
  /// everything else is optional.
  pub fn new(
    name_en: impl Into<String>,
    name_fa: Option<String>,
    location_spotted: Option<String>,
    event_description: Option<String>,
    notes: Option<String>,
  ) -> Result<Self> {
    let name_en = name_en.into().trim().to_owned();
    if name_en.is_empty() {
      return Err(Error::Validation("name_en is required".into()));
    }
    Ok(Self {
      name_en,
      name_fa: none_if_blank(name_fa),
      location_spotted: none_if_blank(location_spotted),
      event_description: none_if_blank(event_description),
      notes: none_if_blank(notes),
    })
  }
}

/// Field-by-field merge applied by a subject update. `None` fields are left
/// untouched. Enum-ish columns (`status`, `risk_level`, `importance`) accept
/// any string by design.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectPatch {
  pub name_en:            Option<String>,
  pub name_fa:            Option<String>,
  pub aliases:            Option<String>,
  pub location_spotted:   Option<String>,
  pub country:            Option<String>,
  pub event_description:  Option<String>,
  pub linkedin_url:       Option<String>,
  pub linkedin_headline:  Option<String>,
  pub linkedin_companies: Option<String>,
  pub linkedin_education: Option<String>,
  pub twitter_url:        Option<String>,
  pub sanctions_checked:  Option<bool>,
  pub sanctions_hits:     Option<String>,
  pub risk_level:         Option<String>,
  pub risk_indicators:    Option<String>,
  pub status:             Option<String>,
  pub notes:              Option<String>,
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Optional exact-match filters for listing subjects.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilter {
  pub status:     Option<String>,
  pub risk_level: Option<String>,
}

/// Aggregate counts returned by the statistics operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStatistics {
  pub total:     i64,
  pub by_status: BTreeMap<String, i64>,
  pub by_risk:   BTreeMap<String, i64>,
}

pub(crate) fn none_if_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_subject_requires_name() {
    let err = NewSubject::new("", None, None, None, None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = NewSubject::new("   ", None, None, None, None).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn new_subject_blank_optionals_become_none() {
    let s = NewSubject::new(
      "Ali Khamenei",
      Some("".into()),
      Some("Tehran".into()),
      None,
      Some("  ".into()),
    )
    .unwrap();
    assert_eq!(s.name_en, "Ali Khamenei");
    assert!(s.name_fa.is_none());
    assert_eq!(s.location_spotted.as_deref(), Some("Tehran"));
    assert!(s.notes.is_none());
  }
}
