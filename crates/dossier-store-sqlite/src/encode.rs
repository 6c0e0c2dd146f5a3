//! Decoding helpers between SQLite rows and the domain types.
//!
//! Timestamps are stored as RFC 3339 strings; booleans as 0/1 integers.
//! Each `Raw*` struct mirrors one table's column list and converts into its
//! domain type, surfacing malformed stored data as a storage error.

use chrono::{DateTime, Utc};
use dossier_core::{
  Error, Result,
  contact::UserContact,
  finding::{Finding, FindingWithSubject},
  monitor::{NewsSource, TwitterAccount},
  subject::Subject,
};
use rusqlite::Row;

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Storage(format!("bad timestamp {s:?}: {e}")))
}

fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── Subjects ────────────────────────────────────────────────────────────────

pub const SUBJECT_COLUMNS: &str = "id, name_en, name_fa, aliases, \
   location_spotted, country, event_description, linkedin_url, \
   linkedin_headline, linkedin_companies, linkedin_education, twitter_url, \
   sanctions_checked, sanctions_hits, risk_level, risk_indicators, status, \
   notes, created_at, updated_at";

pub struct RawSubject {
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
  pub sanctions_checked:  i64,
  pub sanctions_hits:     Option<String>,
  pub risk_level:         String,
  pub risk_indicators:    Option<String>,
  pub status:             String,
  pub notes:              Option<String>,
  pub created_at:         String,
  pub updated_at:         Option<String>,
}

impl RawSubject {
  /// Read a row produced with [`SUBJECT_COLUMNS`] in that order.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      name_en:            row.get(1)?,
      name_fa:            row.get(2)?,
      aliases:            row.get(3)?,
      location_spotted:   row.get(4)?,
      country:            row.get(5)?,
      event_description:  row.get(6)?,
      linkedin_url:       row.get(7)?,
      linkedin_headline:  row.get(8)?,
      linkedin_companies: row.get(9)?,
      linkedin_education: row.get(10)?,
      twitter_url:        row.get(11)?,
      sanctions_checked:  row.get(12)?,
      sanctions_hits:     row.get(13)?,
      risk_level:         row.get(14)?,
      risk_indicators:    row.get(15)?,
      status:             row.get(16)?,
      notes:              row.get(17)?,
      created_at:         row.get(18)?,
      updated_at:         row.get(19)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      id:                 self.id,
      name_en:            self.name_en,
      name_fa:            self.name_fa,
      aliases:            self.aliases,
      location_spotted:   self.location_spotted,
      country:            self.country,
      event_description:  self.event_description,
      linkedin_url:       self.linkedin_url,
      linkedin_headline:  self.linkedin_headline,
      linkedin_companies: self.linkedin_companies,
      linkedin_education: self.linkedin_education,
      twitter_url:        self.twitter_url,
      sanctions_checked:  self.sanctions_checked != 0,
      sanctions_hits:     self.sanctions_hits,
      risk_level:         self.risk_level,
      risk_indicators:    self.risk_indicators,
      status:             self.status,
      notes:              self.notes,
      created_at:         decode_dt(&self.created_at)?,
      updated_at:         decode_opt_dt(self.updated_at.as_deref())?,
    })
  }
}

// ─── Monitor ─────────────────────────────────────────────────────────────────

pub const TWITTER_COLUMNS: &str =
  "id, username, display_name, description, category, is_active, created_at";

pub struct RawTwitterAccount {
  pub id:           i64,
  pub username:     String,
  pub display_name: Option<String>,
  pub description:  Option<String>,
  pub category:     Option<String>,
  pub is_active:    i64,
  pub created_at:   String,
}

impl RawTwitterAccount {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      username:     row.get(1)?,
      display_name: row.get(2)?,
      description:  row.get(3)?,
      category:     row.get(4)?,
      is_active:    row.get(5)?,
      created_at:   row.get(6)?,
    })
  }

  pub fn into_account(self) -> Result<TwitterAccount> {
    Ok(TwitterAccount {
      id:           self.id,
      username:     self.username,
      display_name: self.display_name,
      description:  self.description,
      category:     self.category,
      is_active:    self.is_active != 0,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const NEWS_COLUMNS: &str =
  "id, name, url, description, category, language, is_active, created_at";

pub struct RawNewsSource {
  pub id:          i64,
  pub name:        String,
  pub url:         String,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub language:    String,
  pub is_active:   i64,
  pub created_at:  String,
}

impl RawNewsSource {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      url:         row.get(2)?,
      description: row.get(3)?,
      category:    row.get(4)?,
      language:    row.get(5)?,
      is_active:   row.get(6)?,
      created_at:  row.get(7)?,
    })
  }

  pub fn into_source(self) -> Result<NewsSource> {
    Ok(NewsSource {
      id:          self.id,
      name:        self.name,
      url:         self.url,
      description: self.description,
      category:    self.category,
      language:    self.language,
      is_active:   self.is_active != 0,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

// ─── Findings ────────────────────────────────────────────────────────────────

/// Finding columns prefixed for the `findings f LEFT JOIN subjects s` query;
/// the subject's display name rides along as the final column.
pub const FINDING_COLUMNS: &str = "f.id, f.title, f.finding_type, \
   f.description, f.source_url, f.source_name, f.subject_id, f.tags, \
   f.importance, f.verified, f.notes, f.created_at, f.updated_at, \
   s.name_en AS subject_name";

pub struct RawFinding {
  pub id:           i64,
  pub title:        String,
  pub finding_type: Option<String>,
  pub description:  Option<String>,
  pub source_url:   Option<String>,
  pub source_name:  Option<String>,
  pub subject_id:   Option<i64>,
  pub tags:         Option<String>,
  pub importance:   String,
  pub verified:     i64,
  pub notes:        Option<String>,
  pub created_at:   String,
  pub updated_at:   Option<String>,
  pub subject_name: Option<String>,
}

impl RawFinding {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      finding_type: row.get(2)?,
      description:  row.get(3)?,
      source_url:   row.get(4)?,
      source_name:  row.get(5)?,
      subject_id:   row.get(6)?,
      tags:         row.get(7)?,
      importance:   row.get(8)?,
      verified:     row.get(9)?,
      notes:        row.get(10)?,
      created_at:   row.get(11)?,
      updated_at:   row.get(12)?,
      subject_name: row.get(13)?,
    })
  }

  pub fn into_finding(self) -> Result<FindingWithSubject> {
    Ok(FindingWithSubject {
      finding:      Finding {
        id:           self.id,
        title:        self.title,
        finding_type: self.finding_type,
        description:  self.description,
        source_url:   self.source_url,
        source_name:  self.source_name,
        subject_id:   self.subject_id,
        tags:         self.tags,
        importance:   self.importance,
        verified:     self.verified != 0,
        notes:        self.notes,
        created_at:   decode_dt(&self.created_at)?,
        updated_at:   decode_opt_dt(self.updated_at.as_deref())?,
      },
      subject_name: self.subject_name,
    })
  }
}

// ─── User contacts ───────────────────────────────────────────────────────────

pub const CONTACT_COLUMNS: &str =
  "id, name, contact_type, email, phone, url, description, notes, created_at";

pub struct RawUserContact {
  pub id:           i64,
  pub name:         String,
  pub contact_type: Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub url:          Option<String>,
  pub description:  Option<String>,
  pub notes:        Option<String>,
  pub created_at:   String,
}

impl RawUserContact {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      contact_type: row.get(2)?,
      email:        row.get(3)?,
      phone:        row.get(4)?,
      url:          row.get(5)?,
      description:  row.get(6)?,
      notes:        row.get(7)?,
      created_at:   row.get(8)?,
    })
  }

  pub fn into_contact(self) -> Result<UserContact> {
    Ok(UserContact {
      id:           self.id,
      name:         self.name,
      contact_type: self.contact_type,
      email:        self.email,
      phone:        self.phone,
      url:          self.url,
      description:  self.description,
      notes:        self.notes,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
