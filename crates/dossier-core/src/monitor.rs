//! Monitor entries — tracked Twitter accounts and news sources.
//!
//! Both sub-resources are capped at [`MONITOR_CAP`] active entries and
//! enforce uniqueness on their normalized key (username / URL).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::none_if_blank;
use crate::{Error, Result};

/// Maximum number of active entries per monitor sub-resource.
pub const MONITOR_CAP: usize = 10;

// ─── Twitter ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterAccount {
  pub id:           i64,
  pub username:     String,
  pub display_name: Option<String>,
  pub description:  Option<String>,
  pub category:     Option<String>,
  pub is_active:    bool,
  pub created_at:   DateTime<Utc>,
}

/// Input for tracking a Twitter account. Construction normalizes the handle.
#[derive(Debug, Clone)]
pub struct NewTwitterAccount {
  pub username:    String,
  pub description: Option<String>,
}

impl NewTwitterAccount {
  /// Normalize the handle: strip a leading `@` and surrounding whitespace.
  /// Duplicate detection downstream is keyed on the normalized form, so
  /// `@alice` and `alice` collide.
  pub fn new(username: impl Into<String>, description: Option<String>) -> Result<Self> {
    let username = username
      .into()
      .trim()
      .trim_start_matches('@')
      .trim()
      .to_owned();
    if username.is_empty() {
      return Err(Error::Validation("username is required".into()));
    }
    Ok(Self { username, description: none_if_blank(description) })
  }
}

// ─── News ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSource {
  pub id:          i64,
  pub name:        String,
  pub url:         String,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub language:    String,
  pub is_active:   bool,
  pub created_at:  DateTime<Utc>,
}

/// Input for tracking a news source. Construction normalizes the URL.
#[derive(Debug, Clone)]
pub struct NewNewsSource {
  pub name:        String,
  pub url:         String,
  pub description: Option<String>,
}

impl NewNewsSource {
  /// A URL without a scheme is prefixed with `https://`; URLs that already
  /// carry `http://` or `https://` are stored unchanged.
  pub fn new(
    name: impl Into<String>,
    url: impl Into<String>,
    description: Option<String>,
  ) -> Result<Self> {
    let name = name.into().trim().to_owned();
    if name.is_empty() {
      return Err(Error::Validation("name is required".into()));
    }
    let url = url.into().trim().to_owned();
    if url.is_empty() {
      return Err(Error::Validation("url is required".into()));
    }
    let url = if url.starts_with("http://") || url.starts_with("https://") {
      url
    } else {
      format!("https://{url}")
    };
    Ok(Self { name, url, description: none_if_blank(description) })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn twitter_handle_is_normalized() {
    let a = NewTwitterAccount::new("  @alice ", None).unwrap();
    assert_eq!(a.username, "alice");

    let b = NewTwitterAccount::new("alice", None).unwrap();
    assert_eq!(b.username, "alice");
  }

  #[test]
  fn twitter_handle_required() {
    assert!(NewTwitterAccount::new("@", None).is_err());
    assert!(NewTwitterAccount::new("   ", None).is_err());
  }

  #[test]
  fn news_url_gains_scheme_when_missing() {
    let s = NewNewsSource::new("Example", "example.com", None).unwrap();
    assert_eq!(s.url, "https://example.com");
  }

  #[test]
  fn news_url_with_scheme_unchanged() {
    let s = NewNewsSource::new("Example", "http://example.com", None).unwrap();
    assert_eq!(s.url, "http://example.com");

    let s = NewNewsSource::new("Example", "https://example.com", None).unwrap();
    assert_eq!(s.url, "https://example.com");
  }
}
