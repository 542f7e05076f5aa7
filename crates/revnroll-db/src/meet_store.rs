//! Meet persistence: create, update and fetch.

use chrono::{DateTime, Utc};
use revnroll_types::{CrewId, EventKind, Meet, MeetId, MeetRequest, MeetTag, UserId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::event_store::EventStore;

/// Columns returned by every meet query, in [`MeetRow`] order.
const MEET_COLUMNS: &str =
    "id, name, description, creator_id, crew_id, location, coordinates, date, private, tags";

/// Operations on the `meets` table.
pub struct MeetStore<'a> {
    pool: &'a PgPool,
}

impl<'a> MeetStore<'a> {
    /// Create a new meet store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a meet created by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn insert(&self, request: &MeetRequest, creator: UserId) -> Result<Meet, DbError> {
        let sql = format!(
            "INSERT INTO meets (name, description, creator_id, crew_id, location, coordinates, date, private, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {MEET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MeetRow>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(creator.into_inner())
            .bind(request.crew_id.map(CrewId::into_inner))
            .bind(&request.location)
            .bind(&request.coordinates)
            .bind(request.date)
            .bind(request.private)
            .bind(tag_names(&request.tags))
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(meet_id = row.id, %creator, "Inserted meet");
        row.into_meet(Vec::new())
    }

    /// Overwrite the editable fields of a meet.
    ///
    /// Returns `None` if the meet does not exist. Creator and participants
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails, or
    /// [`DbError::Decode`] if the stored row holds an unknown tag.
    pub async fn update(&self, id: MeetId, request: &MeetRequest) -> Result<Option<Meet>, DbError> {
        let sql = format!(
            "UPDATE meets
             SET name = $2, description = $3, crew_id = $4, location = $5,
                 coordinates = $6, date = $7, private = $8, tags = $9
             WHERE id = $1
             RETURNING {MEET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MeetRow>(&sql)
            .bind(id.into_inner())
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.crew_id.map(CrewId::into_inner))
            .bind(&request.location)
            .bind(&request.coordinates)
            .bind(request.date)
            .bind(request.private)
            .bind(tag_names(&request.tags))
            .fetch_optional(self.pool)
            .await?;

        self.with_participants(row).await
    }

    /// Fetch a meet with its participants.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::Decode`] if the stored row holds an unknown tag.
    pub async fn get(&self, id: MeetId) -> Result<Option<Meet>, DbError> {
        let sql = format!("SELECT {MEET_COLUMNS} FROM meets WHERE id = $1");
        let row = sqlx::query_as::<_, MeetRow>(&sql)
            .bind(id.into_inner())
            .fetch_optional(self.pool)
            .await?;

        self.with_participants(row).await
    }

    async fn with_participants(&self, row: Option<MeetRow>) -> Result<Option<Meet>, DbError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let participants = EventStore::new(self.pool)
            .participants(EventKind::Meet, row.id)
            .await?;
        row.into_meet(participants).map(Some)
    }
}

fn tag_names(tags: &[MeetTag]) -> Vec<String> {
    tags.iter().map(|t| t.as_str().to_owned()).collect()
}

/// A row from the `meets` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeetRow {
    /// Meet id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creating user.
    pub creator_id: i64,
    /// Hosting crew.
    pub crew_id: Option<i64>,
    /// Venue.
    pub location: String,
    /// Stored `"lat,lon"` string.
    pub coordinates: String,
    /// When the meet takes place.
    pub date: DateTime<Utc>,
    /// Private flag.
    pub private: bool,
    /// Tag names.
    pub tags: Vec<String>,
}

impl MeetRow {
    /// Convert into a [`Meet`], attaching the given participants.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Decode`] if a stored tag is not a [`MeetTag`].
    pub fn into_meet(self, participants: Vec<UserId>) -> Result<Meet, DbError> {
        let tags = self
            .tags
            .iter()
            .map(|t| t.parse::<MeetTag>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::Decode(format!("meet {}: {e}", self.id)))?;

        Ok(Meet {
            id: MeetId(self.id),
            name: self.name,
            description: self.description,
            creator_id: UserId(self.creator_id),
            crew_id: self.crew_id.map(CrewId),
            location: self.location,
            coordinates: self.coordinates,
            date: self.date,
            private: self.private,
            tags,
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tags: &[&str]) -> MeetRow {
        MeetRow {
            id: 12,
            name: String::from("Drift Night"),
            description: String::new(),
            creator_id: 5,
            crew_id: Some(2),
            location: String::from("Kakucs Ring"),
            coordinates: String::from("47.2395,19.3661"),
            date: Utc::now(),
            private: true,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    #[test]
    fn row_converts_to_meet() {
        let meet = row(&["Drift", "Track"]).into_meet(vec![UserId(5), UserId(8)]);
        let meet = meet.ok();
        assert_eq!(meet.as_ref().map(|m| m.id), Some(MeetId(12)));
        assert_eq!(
            meet.as_ref().map(|m| m.tags.clone()),
            Some(vec![MeetTag::Drift, MeetTag::Track])
        );
        assert_eq!(meet.as_ref().and_then(|m| m.crew_id), Some(CrewId(2)));
        assert_eq!(meet.map(|m| m.participants.len()), Some(2));
    }

    #[test]
    fn unknown_stored_tag_is_a_decode_error() {
        let result = row(&["Drift", "Burnout"]).into_meet(Vec::new());
        assert!(matches!(result, Err(DbError::Decode(_))));
    }

    #[test]
    fn tag_names_use_canonical_spelling() {
        assert_eq!(
            tag_names(&[MeetTag::Offroad, MeetTag::Show]),
            vec![String::from("Offroad"), String::from("Show")]
        );
    }
}
