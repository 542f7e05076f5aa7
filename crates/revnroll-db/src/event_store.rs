//! Operations shared by meets and races.
//!
//! Listing, deletion, joining and loading proximity candidates look the same
//! for both event kinds apart from the table names, so they live here and
//! take an [`EventKind`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use revnroll_types::{EventKind, EventRecord, EventSummary, UserId};
use sqlx::PgPool;

use crate::error::DbError;

/// Table names backing one event kind.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tables {
    /// Main table (`meets` / `races`).
    pub events: &'static str,
    /// Join table of participating users.
    pub participants: &'static str,
    /// Foreign-key column in the participants table.
    pub fk: &'static str,
}

pub(crate) const fn tables(kind: EventKind) -> Tables {
    match kind {
        EventKind::Meet => Tables {
            events: "meets",
            participants: "meet_participants",
            fk: "meet_id",
        },
        EventKind::Race => Tables {
            events: "races",
            participants: "race_participants",
            fk: "race_id",
        },
    }
}

/// Result of asking a user to join an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was added to the participants.
    Joined,
    /// The user was already a participant; nothing changed.
    AlreadyJoined,
    /// No event with that id exists.
    NotFound,
}

/// Kind-agnostic operations on the `meets` and `races` tables.
pub struct EventStore<'a> {
    pool: &'a PgPool,
}

impl<'a> EventStore<'a> {
    /// Create a new event store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load every event of `kind` as a proximity candidate, ordered by id.
    ///
    /// No filtering happens in SQL: the caller runs the proximity filter
    /// over the full set.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn load_candidates(&self, kind: EventKind) -> Result<Vec<EventRecord>, DbError> {
        let sql = match kind {
            EventKind::Meet => {
                "SELECT id, name, coordinates, date, private, tags FROM meets ORDER BY id"
            }
            EventKind::Race => {
                "SELECT id, name, coordinates, date, private, ARRAY[]::TEXT[] AS tags FROM races ORDER BY id"
            }
        };

        let rows = sqlx::query_as::<_, CandidateRow>(sql)
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(%kind, count = rows.len(), "Loaded proximity candidates");
        Ok(rows.into_iter().map(|row| row.into_record(kind)).collect())
    }

    /// List every event of `kind` as a summary, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn summaries(&self, kind: EventKind) -> Result<Vec<EventSummary>, DbError> {
        let sql = format!(
            "SELECT id, name, date, private FROM {} ORDER BY id",
            tables(kind).events
        );
        let rows = sqlx::query_as::<_, SummaryRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| EventSummary {
                id: row.id,
                name: row.name,
                date: row.date,
                private: row.private,
                is_meet: kind == EventKind::Meet,
            })
            .collect())
    }

    /// Delete an event and, by cascade, its participants.
    ///
    /// Returns `false` if no event with that id existed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, kind: EventKind, id: i64) -> Result<bool, DbError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", tables(kind).events);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(%kind, id, deleted, "Delete event");
        Ok(deleted)
    }

    /// Add `user` to the participants of an event.
    ///
    /// The existence check and the insert run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if either statement fails.
    pub async fn join(
        &self,
        kind: EventKind,
        id: i64,
        user: UserId,
    ) -> Result<JoinOutcome, DbError> {
        let t = tables(kind);
        let mut tx = self.pool.begin().await?;

        let exists_sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", t.events);
        let exists: bool = sqlx::query_scalar(&exists_sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(JoinOutcome::NotFound);
        }

        let insert_sql = format!(
            "INSERT INTO {} ({}, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            t.participants, t.fk
        );
        let inserted = sqlx::query(&insert_sql)
            .bind(id)
            .bind(user.into_inner())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if inserted == 0 {
            Ok(JoinOutcome::AlreadyJoined)
        } else {
            tracing::debug!(%kind, id, %user, "User joined event");
            Ok(JoinOutcome::Joined)
        }
    }

    /// Participants of an event in join order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn participants(&self, kind: EventKind, id: i64) -> Result<Vec<UserId>, DbError> {
        let t = tables(kind);
        let sql = format!(
            "SELECT user_id FROM {} WHERE {} = $1 ORDER BY joined_at, user_id",
            t.participants, t.fk
        );
        let ids: Vec<i64> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_all(self.pool)
            .await?;
        Ok(ids.into_iter().map(UserId::from).collect())
    }
}

/// Projection used for proximity candidates.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateRow {
    /// Event id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Private flag.
    pub private: bool,
    /// Tag names (always empty for races).
    pub tags: Vec<String>,
}

impl CandidateRow {
    fn into_record(self, kind: EventKind) -> EventRecord {
        EventRecord {
            id: self.id,
            kind,
            name: self.name,
            coordinates: self.coordinates,
            occurs_at: self.date,
            private: self.private,
            tags: self.tags.into_iter().collect::<BTreeSet<_>>(),
        }
    }
}

/// Projection used for listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SummaryRow {
    /// Event id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Private flag.
    pub private: bool,
}
