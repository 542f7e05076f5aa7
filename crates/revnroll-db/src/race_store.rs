//! Race persistence: create, update and fetch.

use chrono::{DateTime, Utc};
use revnroll_types::{CrewId, EventKind, Race, RaceId, RaceRequest, RaceType, UserId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::event_store::EventStore;

/// Columns returned by every race query, in [`RaceRow`] order.
const RACE_COLUMNS: &str =
    "id, name, description, creator_id, crew_id, race_type, location, coordinates, date, private";

/// Operations on the `races` table.
pub struct RaceStore<'a> {
    pool: &'a PgPool,
}

impl<'a> RaceStore<'a> {
    /// Create a new race store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a race created by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, request: &RaceRequest, creator: UserId) -> Result<Race, DbError> {
        let sql = format!(
            "INSERT INTO races (name, description, creator_id, crew_id, race_type, location, coordinates, date, private)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {RACE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RaceRow>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(creator.into_inner())
            .bind(request.crew_id.map(CrewId::into_inner))
            .bind(request.race_type.as_str())
            .bind(&request.location)
            .bind(&request.coordinates)
            .bind(request.date)
            .bind(request.private)
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(race_id = row.id, %creator, "Inserted race");
        row.into_race(Vec::new())
    }

    /// Overwrite the editable fields of a race.
    ///
    /// Returns `None` if the race does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails, or
    /// [`DbError::Decode`] if the stored race type is unknown.
    pub async fn update(&self, id: RaceId, request: &RaceRequest) -> Result<Option<Race>, DbError> {
        let sql = format!(
            "UPDATE races
             SET name = $2, description = $3, crew_id = $4, race_type = $5,
                 location = $6, coordinates = $7, date = $8, private = $9
             WHERE id = $1
             RETURNING {RACE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RaceRow>(&sql)
            .bind(id.into_inner())
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.crew_id.map(CrewId::into_inner))
            .bind(request.race_type.as_str())
            .bind(&request.location)
            .bind(&request.coordinates)
            .bind(request.date)
            .bind(request.private)
            .fetch_optional(self.pool)
            .await?;

        self.with_participants(row).await
    }

    /// Fetch a race with its participants.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::Decode`] if the stored race type is unknown.
    pub async fn get(&self, id: RaceId) -> Result<Option<Race>, DbError> {
        let sql = format!("SELECT {RACE_COLUMNS} FROM races WHERE id = $1");
        let row = sqlx::query_as::<_, RaceRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool)
            .await?;

        self.with_participants(row).await
    }

    async fn with_participants(&self, row: Option<RaceRow>) -> Result<Option<Race>, DbError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let participants = EventStore::new(self.pool)
            .participants(EventKind::Race, row.id)
            .await?;
        row.into_race(participants).map(Some)
    }
}

/// A row from the `races` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RaceRow {
    /// Race id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creating user.
    pub creator_id: i64,
    /// Hosting crew.
    pub crew_id: Option<i64>,
    /// Stored race type name.
    pub race_type: String,
    /// Venue.
    pub location: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the race takes place.
    pub date: DateTime<Utc>,
    /// Private flag.
    pub private: bool,
}

impl RaceRow {
    /// Convert into a [`Race`], attaching the given participants.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Decode`] if the stored race type is unknown.
    pub fn into_race(self, participants: Vec<UserId>) -> Result<Race, DbError> {
        let race_type = self
            .race_type
            .parse::<RaceType>()
            .map_err(|e| DbError::Decode(format!("race {}: {e}", self.id)))?;

        Ok(Race {
            id: RaceId(self.id),
            name: self.name,
            description: self.description,
            creator_id: UserId(self.creator_id),
            crew_id: self.crew_id.map(CrewId),
            race_type,
            location: self.location,
            coordinates: self.coordinates,
            date: self.date,
            private: self.private,
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(race_type: &str) -> RaceRow {
        RaceRow {
            id: 30,
            name: String::from("Night Sprint"),
            description: String::from("Closed road."),
            creator_id: 1,
            crew_id: None,
            race_type: race_type.to_owned(),
            location: String::from("Szeged"),
            coordinates: String::from("46.2530,20.1414"),
            date: Utc::now(),
            private: false,
        }
    }

    #[test]
    fn row_converts_to_race() {
        let race = row("Circuit").into_race(vec![UserId(1)]).ok();
        assert_eq!(race.as_ref().map(|r| r.race_type), Some(RaceType::Circuit));
        assert_eq!(race.as_ref().map(|r| r.id), Some(RaceId(30)));
        assert_eq!(race.map(|r| r.participants), Some(vec![UserId(1)]));
    }

    #[test]
    fn unknown_race_type_is_a_decode_error() {
        assert!(matches!(
            row("Rally").into_race(Vec::new()),
            Err(DbError::Decode(_))
        ));
    }
}
