//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, params, params_from_iter, types::Value};

use dossier_core::{
  Error, Result,
  contact::{NewUserContact, UserContact},
  finding::{FindingFilter, FindingWithSubject, NewFinding},
  monitor::{
    MONITOR_CAP, NewNewsSource, NewTwitterAccount, NewsSource, TwitterAccount,
  },
  store::CaseStore,
  subject::{NewSubject, Subject, SubjectFilter, SubjectPatch, SubjectStatistics},
};

use crate::{
  encode::{
    CONTACT_COLUMNS, FINDING_COLUMNS, NEWS_COLUMNS, RawFinding, RawNewsSource,
    RawSubject, RawTwitterAccount, RawUserContact, SUBJECT_COLUMNS, TWITTER_COLUMNS,
    encode_dt,
  },
  schema::SCHEMA,
};

/// Surface a database-thread fault as a generic storage error.
fn db_err(e: tokio_rusqlite::Error) -> Error {
  Error::Storage(e.to_string())
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The closed set of entity tables. Generic delete/count primitives operate
/// on this enum; everything else goes through a typed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
  Subjects,
  TwitterAccounts,
  NewsSources,
  Findings,
  UserContacts,
}

impl Table {
  pub(crate) fn name(self) -> &'static str {
    match self {
      Table::Subjects => "subjects",
      Table::TwitterAccounts => "twitter_accounts",
      Table::NewsSources => "news_sources",
      Table::Findings => "findings",
      Table::UserContacts => "user_contacts",
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Dossier case store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All access
/// is serialized through one connection thread, which is what makes the
/// check-then-insert sequences in the monitor operations atomic.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await.map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(db_err)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  // ── Generic primitives ────────────────────────────────────────────────

  /// `DELETE FROM <table> WHERE id = ?` — silently a no-op for missing ids.
  pub(crate) async fn delete_by_id(&self, table: Table, id: i64) -> Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", table.name());
    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, params![id])?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  /// Total row count of a table.
  pub(crate) async fn count(&self, table: Table) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |r| r.get(0))?))
      .await
      .map_err(db_err)
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  // ── Subjects ──────────────────────────────────────────────────────────

  async fn add_subject(&self, input: NewSubject) -> Result<Subject> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let i = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subjects
             (name_en, name_fa, location_spotted, event_description, notes,
              status, risk_level, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 'New', 'Unknown', ?6)",
          params![
            i.name_en,
            i.name_fa,
            i.location_spotted,
            i.event_description,
            i.notes,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(Subject {
      id,
      name_en: input.name_en,
      name_fa: input.name_fa,
      aliases: None,
      location_spotted: input.location_spotted,
      country: None,
      event_description: input.event_description,
      linkedin_url: None,
      linkedin_headline: None,
      linkedin_companies: None,
      linkedin_education: None,
      twitter_url: None,
      sanctions_checked: false,
      sanctions_hits: None,
      risk_level: "Unknown".to_owned(),
      risk_indicators: None,
      status: "New".to_owned(),
      notes: input.notes,
      created_at: now,
      updated_at: None,
    })
  }

  async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = ?1"),
              params![id],
              |row| RawSubject::from_row(row),
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawSubject::into_subject).transpose()
  }

  async fn list_subjects(&self, filter: SubjectFilter) -> Result<Vec<Subject>> {
    let SubjectFilter { status, risk_level } = filter;

    let raws: Vec<RawSubject> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();
        if let Some(s) = status {
          vals.push(Value::Text(s));
          conds.push(format!("status = ?{}", vals.len()));
        }
        if let Some(r) = risk_level {
          vals.push(Value::Text(r));
          conds.push(format!("risk_level = ?{}", vals.len()));
        }
        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        // `id DESC` breaks ties between rows created inside the same
        // timestamp tick, keeping "newest first" deterministic.
        let sql = format!(
          "SELECT {SUBJECT_COLUMNS} FROM subjects {where_clause}
           ORDER BY created_at DESC, id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(vals), |row| RawSubject::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawSubject::into_subject).collect()
  }

  async fn update_subject(&self, id: i64, patch: SubjectPatch) -> Result<()> {
    let now_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        fn set(sets: &mut Vec<String>, vals: &mut Vec<Value>, col: &str, v: Value) {
          vals.push(v);
          sets.push(format!("{col} = ?{}", vals.len()));
        }

        let mut sets: Vec<String> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();

        let text_fields = [
          ("name_en", patch.name_en),
          ("name_fa", patch.name_fa),
          ("aliases", patch.aliases),
          ("location_spotted", patch.location_spotted),
          ("country", patch.country),
          ("event_description", patch.event_description),
          ("linkedin_url", patch.linkedin_url),
          ("linkedin_headline", patch.linkedin_headline),
          ("linkedin_companies", patch.linkedin_companies),
          ("linkedin_education", patch.linkedin_education),
          ("twitter_url", patch.twitter_url),
          ("sanctions_hits", patch.sanctions_hits),
          ("risk_level", patch.risk_level),
          ("risk_indicators", patch.risk_indicators),
          ("status", patch.status),
          ("notes", patch.notes),
        ];
        for (col, field) in text_fields {
          if let Some(v) = field {
            set(&mut sets, &mut vals, col, Value::Text(v));
          }
        }
        if let Some(v) = patch.sanctions_checked {
          set(&mut sets, &mut vals, "sanctions_checked", Value::Integer(v as i64));
        }

        // The update timestamp is stamped even when no other field changed.
        set(&mut sets, &mut vals, "updated_at", Value::Text(now_str));

        vals.push(Value::Integer(id));
        let sql = format!(
          "UPDATE subjects SET {} WHERE id = ?{}",
          sets.join(", "),
          vals.len()
        );
        conn.execute(&sql, params_from_iter(vals))?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  async fn delete_subject(&self, id: i64) -> Result<()> {
    self.delete_by_id(Table::Subjects, id).await
  }

  async fn subject_statistics(&self) -> Result<SubjectStatistics> {
    self
      .conn
      .call(|conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM subjects", [], |r| r.get(0))?;

        let mut by_status = BTreeMap::new();
        let mut stmt =
          conn.prepare("SELECT status, COUNT(*) FROM subjects GROUP BY status")?;
        let rows = stmt.query_map([], |r| {
          Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?))
        })?;
        for row in rows {
          let (status, count) = row?;
          by_status.insert(status, count);
        }

        let mut by_risk = BTreeMap::new();
        let mut stmt = conn
          .prepare("SELECT risk_level, COUNT(*) FROM subjects GROUP BY risk_level")?;
        let rows = stmt.query_map([], |r| {
          Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?))
        })?;
        for row in rows {
          let (risk, count) = row?;
          by_risk.insert(risk, count);
        }

        Ok(SubjectStatistics { total, by_status, by_risk })
      })
      .await
      .map_err(db_err)
  }

  // ── Monitor — Twitter ─────────────────────────────────────────────────

  async fn add_twitter_account(
    &self,
    input: NewTwitterAccount,
  ) -> Result<TwitterAccount> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let username = input.username.clone();
    let description = input.description.clone();

    // Business errors ride the Ok channel so the check and the insert stay
    // inside one serialized connection closure.
    let outcome: Result<i64, Error> = self
      .conn
      .call(move |conn| {
        let active: i64 = conn.query_row(
          "SELECT COUNT(*) FROM twitter_accounts WHERE is_active = 1",
          [],
          |r| r.get(0),
        )?;
        if active >= MONITOR_CAP as i64 {
          return Ok(Err(Error::Capacity { what: "accounts", limit: MONITOR_CAP }));
        }

        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM twitter_accounts WHERE username = ?1",
            params![input.username],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if exists {
          return Ok(Err(Error::Duplicate("Account")));
        }

        conn.execute(
          "INSERT INTO twitter_accounts (username, description, is_active, created_at)
           VALUES (?1, ?2, 1, ?3)",
          params![input.username, input.description, now_str],
        )?;
        Ok(Ok(conn.last_insert_rowid()))
      })
      .await
      .map_err(db_err)?;

    let id = outcome?;
    Ok(TwitterAccount {
      id,
      username,
      display_name: None,
      description,
      category: None,
      is_active: true,
      created_at: now,
    })
  }

  async fn list_twitter_accounts(&self) -> Result<Vec<TwitterAccount>> {
    let raws: Vec<RawTwitterAccount> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TWITTER_COLUMNS} FROM twitter_accounts
           WHERE is_active = 1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], |row| RawTwitterAccount::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawTwitterAccount::into_account).collect()
  }

  async fn delete_twitter_account(&self, id: i64) -> Result<()> {
    self.delete_by_id(Table::TwitterAccounts, id).await
  }

  // ── Monitor — news ────────────────────────────────────────────────────

  async fn add_news_source(&self, input: NewNewsSource) -> Result<NewsSource> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let name = input.name.clone();
    let url = input.url.clone();
    let description = input.description.clone();

    let outcome: Result<i64, Error> = self
      .conn
      .call(move |conn| {
        let active: i64 = conn.query_row(
          "SELECT COUNT(*) FROM news_sources WHERE is_active = 1",
          [],
          |r| r.get(0),
        )?;
        if active >= MONITOR_CAP as i64 {
          return Ok(Err(Error::Capacity { what: "sources", limit: MONITOR_CAP }));
        }

        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM news_sources WHERE url = ?1",
            params![input.url],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if exists {
          return Ok(Err(Error::Duplicate("Source")));
        }

        conn.execute(
          "INSERT INTO news_sources (name, url, description, is_active, created_at)
           VALUES (?1, ?2, ?3, 1, ?4)",
          params![input.name, input.url, input.description, now_str],
        )?;
        Ok(Ok(conn.last_insert_rowid()))
      })
      .await
      .map_err(db_err)?;

    let id = outcome?;
    Ok(NewsSource {
      id,
      name,
      url,
      description,
      category: None,
      language: "en".to_owned(),
      is_active: true,
      created_at: now,
    })
  }

  async fn list_news_sources(&self) -> Result<Vec<NewsSource>> {
    let raws: Vec<RawNewsSource> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NEWS_COLUMNS} FROM news_sources
           WHERE is_active = 1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], |row| RawNewsSource::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawNewsSource::into_source).collect()
  }

  async fn delete_news_source(&self, id: i64) -> Result<()> {
    self.delete_by_id(Table::NewsSources, id).await
  }

  // ── Findings ──────────────────────────────────────────────────────────

  async fn add_finding(&self, input: NewFinding) -> Result<FindingWithSubject> {
    let now_str = encode_dt(Utc::now());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO findings
             (title, finding_type, description, source_url, source_name,
              subject_id, tags, importance, verified, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9)",
          params![
            input.title,
            input.finding_type,
            input.description,
            input.source_url,
            input.source_name,
            input.subject_id,
            input.tags,
            input.importance,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    self
      .get_finding(id)
      .await?
      .ok_or(Error::NotFound { entity: "finding", id })
  }

  async fn get_finding(&self, id: i64) -> Result<Option<FindingWithSubject>> {
    let raw: Option<RawFinding> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {FINDING_COLUMNS} FROM findings f
                 LEFT JOIN subjects s ON f.subject_id = s.id
                 WHERE f.id = ?1"
              ),
              params![id],
              |row| RawFinding::from_row(row),
            )
            .optional()?,
        )
      })
      .await
      .map_err(db_err)?;

    raw.map(RawFinding::into_finding).transpose()
  }

  async fn list_findings(
    &self,
    filter: FindingFilter,
  ) -> Result<Vec<FindingWithSubject>> {
    let FindingFilter { finding_type, importance } = filter;

    let raws: Vec<RawFinding> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = Vec::new();
        let mut vals: Vec<Value> = Vec::new();
        if let Some(t) = finding_type {
          vals.push(Value::Text(t));
          conds.push(format!("f.finding_type = ?{}", vals.len()));
        }
        if let Some(i) = importance {
          vals.push(Value::Text(i));
          conds.push(format!("f.importance = ?{}", vals.len()));
        }
        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {FINDING_COLUMNS} FROM findings f
           LEFT JOIN subjects s ON f.subject_id = s.id
           {where_clause}
           ORDER BY f.created_at DESC, f.id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(vals), |row| RawFinding::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawFinding::into_finding).collect()
  }

  async fn verify_finding(&self, id: i64, verified: bool) -> Result<()> {
    let now_str = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE findings SET verified = ?1, updated_at = ?2 WHERE id = ?3",
          params![verified as i64, now_str, id],
        )?;
        Ok(())
      })
      .await
      .map_err(db_err)
  }

  async fn delete_finding(&self, id: i64) -> Result<()> {
    self.delete_by_id(Table::Findings, id).await
  }

  // ── User contacts ─────────────────────────────────────────────────────

  async fn add_user_contact(&self, input: NewUserContact) -> Result<UserContact> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let i = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO user_contacts
             (name, contact_type, email, url, description, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params![
            i.name,
            i.contact_type,
            i.email,
            i.url,
            i.description,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(db_err)?;

    Ok(UserContact {
      id,
      name: input.name,
      contact_type: input.contact_type,
      email: input.email,
      phone: None,
      url: input.url,
      description: input.description,
      notes: None,
      created_at: now,
    })
  }

  async fn list_user_contacts(&self) -> Result<Vec<UserContact>> {
    let raws: Vec<RawUserContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM user_contacts
           ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], |row| RawUserContact::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(db_err)?;

    raws.into_iter().map(RawUserContact::into_contact).collect()
  }

  async fn delete_user_contact(&self, id: i64) -> Result<()> {
    self.delete_by_id(Table::UserContacts, id).await
  }
}
