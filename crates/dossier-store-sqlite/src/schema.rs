//! SQL schema for the Dossier SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! `findings.subject_id` is a soft reference: the `REFERENCES` clause is
//! documentation only, and `PRAGMA foreign_keys` is deliberately OFF so
//! deleting a subject leaves its findings dangling instead of failing. The
//! pragma must be set explicitly because the bundled SQLite is compiled with
//! `SQLITE_DEFAULT_FOREIGN_KEYS=1`, which flips the default to ON.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS subjects (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    name_en            TEXT NOT NULL,
    name_fa            TEXT,
    aliases            TEXT,
    location_spotted   TEXT,
    country            TEXT,
    event_description  TEXT,
    linkedin_url       TEXT,
    linkedin_headline  TEXT,
    linkedin_companies TEXT,
    linkedin_education TEXT,
    twitter_url        TEXT,
    sanctions_checked  INTEGER NOT NULL DEFAULT 0,
    sanctions_hits     TEXT,
    risk_level         TEXT NOT NULL DEFAULT 'Unknown',
    risk_indicators    TEXT,
    status             TEXT NOT NULL DEFAULT 'New',
    notes              TEXT,
    created_at         TEXT NOT NULL,    -- RFC 3339 UTC; server-assigned
    updated_at         TEXT
);

CREATE TABLE IF NOT EXISTS twitter_accounts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    username     TEXT NOT NULL UNIQUE,   -- normalized, no leading '@'
    display_name TEXT,
    description  TEXT,
    category     TEXT,
    is_active    INTEGER NOT NULL DEFAULT 1,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS news_sources (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    url         TEXT NOT NULL UNIQUE,    -- normalized to carry a scheme
    description TEXT,
    category    TEXT,
    language    TEXT NOT NULL DEFAULT 'en',
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS findings (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    finding_type TEXT,
    description  TEXT,
    source_url   TEXT,
    source_name  TEXT,
    subject_id   INTEGER REFERENCES subjects(id),
    tags         TEXT,
    importance   TEXT NOT NULL DEFAULT 'Medium',
    verified     INTEGER NOT NULL DEFAULT 0,
    notes        TEXT,
    created_at   TEXT NOT NULL,
    updated_at   TEXT
);

CREATE TABLE IF NOT EXISTS user_contacts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    contact_type TEXT,
    email        TEXT,
    phone        TEXT,
    url          TEXT,
    description  TEXT,
    notes        TEXT,
    created_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS subjects_status_idx   ON subjects(status);
CREATE INDEX IF NOT EXISTS subjects_risk_idx     ON subjects(risk_level);
CREATE INDEX IF NOT EXISTS findings_subject_idx  ON findings(subject_id);
CREATE INDEX IF NOT EXISTS findings_created_idx  ON findings(created_at);

PRAGMA user_version = 1;
";
