//! The `CaseStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `dossier-store-sqlite`). Higher layers (`dossier-api`) depend on this
//! abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (tokio with `axum`). Every operation maps
//! 1:1 onto a manager operation of the system: subjects, monitor entries,
//! findings, and user contacts.

use std::future::Future;

use crate::{
  Result,
  contact::{NewUserContact, UserContact},
  finding::{FindingFilter, FindingWithSubject, NewFinding},
  monitor::{NewNewsSource, NewTwitterAccount, NewsSource, TwitterAccount},
  subject::{NewSubject, Subject, SubjectFilter, SubjectPatch, SubjectStatistics},
};

/// Abstraction over a Dossier case store backend.
///
/// Writes auto-commit immediately; there are no multi-statement
/// transactions. Capacity and uniqueness checks for monitor entries are the
/// backend's responsibility and must be atomic with the insert, so two
/// concurrent requests cannot both pass a stale check.
pub trait CaseStore: Send + Sync {
  // ── Subjects ──────────────────────────────────────────────────────────

  /// Persist a new subject with status `New` and risk `Unknown`.
  fn add_subject(
    &self,
    input: NewSubject,
  ) -> impl Future<Output = Result<Subject>> + Send + '_;

  /// Retrieve a subject by id. Returns `None` if not found.
  fn get_subject(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Subject>>> + Send + '_;

  /// List subjects, newest first, with optional exact-match filters.
  fn list_subjects(
    &self,
    filter: SubjectFilter,
  ) -> impl Future<Output = Result<Vec<Subject>>> + Send + '_;

  /// Merge the supplied fields into a subject and stamp `updated_at`.
  /// `updated_at` is stamped even for an empty patch; a missing id is a
  /// silent no-op.
  fn update_subject(
    &self,
    id: i64,
    patch: SubjectPatch,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Hard delete. Findings referencing the subject are left dangling.
  /// A missing id is a silent no-op.
  fn delete_subject(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;

  /// Total count plus grouped counts by status and by risk level.
  fn subject_statistics(
    &self,
  ) -> impl Future<Output = Result<SubjectStatistics>> + Send + '_;

  // ── Monitor — Twitter ─────────────────────────────────────────────────

  /// Insert an active account. Errors with `Capacity` at the active cap and
  /// `Duplicate` if the normalized username already exists.
  fn add_twitter_account(
    &self,
    input: NewTwitterAccount,
  ) -> impl Future<Output = Result<TwitterAccount>> + Send + '_;

  /// Active accounts, newest first.
  fn list_twitter_accounts(
    &self,
  ) -> impl Future<Output = Result<Vec<TwitterAccount>>> + Send + '_;

  fn delete_twitter_account(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Monitor — news ────────────────────────────────────────────────────

  /// Insert an active source. Same capacity/duplicate semantics as Twitter,
  /// keyed on the normalized URL.
  fn add_news_source(
    &self,
    input: NewNewsSource,
  ) -> impl Future<Output = Result<NewsSource>> + Send + '_;

  /// Active sources, newest first.
  fn list_news_sources(
    &self,
  ) -> impl Future<Output = Result<Vec<NewsSource>>> + Send + '_;

  fn delete_news_source(&self, id: i64)
  -> impl Future<Output = Result<()>> + Send + '_;

  // ── Findings ──────────────────────────────────────────────────────────

  /// Persist a new finding with `verified = false`.
  fn add_finding(
    &self,
    input: NewFinding,
  ) -> impl Future<Output = Result<FindingWithSubject>> + Send + '_;

  fn get_finding(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<FindingWithSubject>>> + Send + '_;

  /// Findings joined with the referenced subject's display name, newest
  /// first, with optional exact-match filters.
  fn list_findings(
    &self,
    filter: FindingFilter,
  ) -> impl Future<Output = Result<Vec<FindingWithSubject>>> + Send + '_;

  /// Set the verified flag and stamp `updated_at`.
  fn verify_finding(
    &self,
    id: i64,
    verified: bool,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn delete_finding(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;

  // ── User contacts ─────────────────────────────────────────────────────

  fn add_user_contact(
    &self,
    input: NewUserContact,
  ) -> impl Future<Output = Result<UserContact>> + Send + '_;

  /// All user-added contacts, newest first.
  fn list_user_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<UserContact>>> + Send + '_;

  fn delete_user_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}
