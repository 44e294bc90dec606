//! SQL schema for the Tidings SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per (email, category) pair; repeat subscribes update in place.
CREATE TABLE IF NOT EXISTS subscriptions (
    subscription_id TEXT PRIMARY KEY,
    category        TEXT NOT NULL,   -- 'stock-market' | 'ai-updates' | 'geopolitics' | 'startups'
    email           TEXT NOT NULL,
    delivery_time   TEXT NOT NULL,   -- verbatim subscriber input; never parsed
    user_id         TEXT,            -- NULL for anonymous subscribers
    created_at      TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at      TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'active',
    UNIQUE (email, category)
);

-- Digests are append-only.
-- No UPDATE is ever issued against this table; retention pruning is the
-- only DELETE.
CREATE TABLE IF NOT EXISTS digests (
    digest_id  TEXT PRIMARY KEY,
    category   TEXT NOT NULL,
    content    TEXT NOT NULL,
    citations  TEXT NOT NULL DEFAULT '[]',  -- JSON array of source URLs
    created_at TEXT NOT NULL                -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS subscriptions_user_idx     ON subscriptions(user_id);
CREATE INDEX IF NOT EXISTS subscriptions_category_idx ON subscriptions(category, status);
CREATE INDEX IF NOT EXISTS digests_category_idx       ON digests(category, created_at);

PRAGMA user_version = 1;
";
