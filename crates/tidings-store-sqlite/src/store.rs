//! [`SqliteStore`] — the SQLite implementation of [`NewsletterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tidings_core::{
  category::Category,
  digest::{Digest, NewDigest},
  store::NewsletterStore,
  subscription::{NewSubscription, Subscription, SubscriptionStatus},
};

use crate::{
  Error, Result,
  encode::{
    RawDigest, RawSubscription, encode_category, encode_citations, encode_dt,
    encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A newsletter store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// run serialized on the connection's thread, so the statements within one
/// call never interleave with another caller's.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and apply the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_conn(tokio_rusqlite::Connection::open(path).await?).await
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    Self::from_conn(tokio_rusqlite::Connection::open_in_memory().await?).await
  }

  async fn from_conn(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

fn subscription_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawSubscription> {
  Ok(RawSubscription {
    subscription_id: row.get(0)?,
    category:        row.get(1)?,
    email:           row.get(2)?,
    delivery_time:   row.get(3)?,
    user_id:         row.get(4)?,
    created_at:      row.get(5)?,
    updated_at:      row.get(6)?,
    status:          row.get(7)?,
  })
}

fn digest_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDigest> {
  Ok(RawDigest {
    digest_id:  row.get(0)?,
    category:   row.get(1)?,
    content:    row.get(2)?,
    citations:  row.get(3)?,
    created_at: row.get(4)?,
  })
}

// ─── NewsletterStore impl ────────────────────────────────────────────────────

impl NewsletterStore for SqliteStore {
  type Error = Error;

  // ── Subscriptions ─────────────────────────────────────────────────────────

  async fn upsert_subscription(
    &self,
    input: NewSubscription,
  ) -> Result<Subscription> {
    let id_str       = encode_uuid(Uuid::new_v4());
    let category_str = encode_category(input.category).to_owned();
    let email        = input.email;
    let delivery     = input.delivery_time;
    let user_id      = input.user_id;
    let now_str      = encode_dt(Utc::now());
    let status_str   = encode_status(SubscriptionStatus::Active).to_owned();

    let raw: RawSubscription = self
      .conn
      .call(move |conn| {
        // The fresh id only lands on first insert; a conflict keeps the
        // existing row's subscription_id and created_at. An anonymous
        // update keeps the stored owner via COALESCE.
        conn.execute(
          "INSERT INTO subscriptions (
             subscription_id, category, email, delivery_time, user_id,
             created_at, updated_at, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7)
           ON CONFLICT (email, category) DO UPDATE SET
             delivery_time = excluded.delivery_time,
             user_id       = COALESCE(excluded.user_id, subscriptions.user_id),
             updated_at    = excluded.updated_at,
             status        = excluded.status",
          rusqlite::params![
            id_str,
            category_str,
            email,
            delivery,
            user_id,
            now_str,
            status_str,
          ],
        )?;

        let raw = conn.query_row(
          "SELECT subscription_id, category, email, delivery_time, user_id,
                  created_at, updated_at, status
           FROM subscriptions
           WHERE email = ?1 AND category = ?2",
          rusqlite::params![email, category_str],
          subscription_row,
        )?;

        Ok(raw)
      })
      .await?;

    raw.into_subscription()
  }

  async fn subscriptions_for_user(
    &self,
    user_id: &str,
  ) -> Result<Vec<Subscription>> {
    let user_id = user_id.to_owned();

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subscription_id, category, email, delivery_time, user_id,
                  created_at, updated_at, status
           FROM subscriptions
           WHERE user_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], subscription_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSubscription::into_subscription)
      .collect()
  }

  async fn active_subscriptions(
    &self,
    category: Category,
  ) -> Result<Vec<Subscription>> {
    let category_str = encode_category(category).to_owned();

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT subscription_id, category, email, delivery_time, user_id,
                  created_at, updated_at, status
           FROM subscriptions
           WHERE category = ?1 AND status = 'active'",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![category_str], subscription_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSubscription::into_subscription)
      .collect()
  }

  async fn remove_subscription(
    &self,
    id: Uuid,
    user_id: &str,
  ) -> Result<bool> {
    let id_str  = encode_uuid(id);
    let user_id = user_id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        let rows = conn.execute(
          "DELETE FROM subscriptions
           WHERE subscription_id = ?1 AND user_id = ?2",
          rusqlite::params![id_str, user_id],
        )?;
        Ok(rows)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Digests ───────────────────────────────────────────────────────────────

  async fn append_digest(&self, input: NewDigest) -> Result<Digest> {
    let digest = Digest {
      id:         Uuid::new_v4(),
      category:   input.category,
      content:    input.content,
      citations:  input.citations,
      created_at: Utc::now(),
    };

    let id_str        = encode_uuid(digest.id);
    let category_str  = encode_category(digest.category).to_owned();
    let content       = digest.content.clone();
    let citations_str = encode_citations(&digest.citations)?;
    let at_str        = encode_dt(digest.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO digests (digest_id, category, content, citations, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            category_str,
            content,
            citations_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(digest)
  }

  async fn latest_digest(&self, category: Category) -> Result<Option<Digest>> {
    let category_str = encode_category(category).to_owned();

    let raw: Option<RawDigest> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT digest_id, category, content, citations, created_at
               FROM digests
               WHERE category = ?1
               ORDER BY created_at DESC
               LIMIT 1",
              rusqlite::params![category_str],
              digest_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDigest::into_digest).transpose()
  }

  async fn recent_digests(
    &self,
    category: Category,
    limit: usize,
  ) -> Result<Vec<Digest>> {
    let category_str = encode_category(category).to_owned();
    let limit_val    = limit as i64;

    let raws: Vec<RawDigest> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT digest_id, category, content, citations, created_at
           FROM digests
           WHERE category = ?1
           ORDER BY created_at DESC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![category_str, limit_val], digest_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDigest::into_digest).collect()
  }

  async fn prune_digests(
    &self,
    category: Category,
    keep: usize,
  ) -> Result<usize> {
    let category_str = encode_category(category).to_owned();
    let keep_val     = keep as i64;

    let deleted = self
      .conn
      .call(move |conn| {
        let rows = conn.execute(
          "DELETE FROM digests
           WHERE category = ?1
             AND digest_id NOT IN (
               SELECT digest_id FROM digests
               WHERE category = ?1
               ORDER BY created_at DESC
               LIMIT ?2
             )",
          rusqlite::params![category_str, keep_val],
        )?;
        Ok(rows)
      })
      .await?;

    Ok(deleted)
  }
}
