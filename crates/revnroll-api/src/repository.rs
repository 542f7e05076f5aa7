//! Storage backends behind the API handlers.
//!
//! Production runs against `PostgreSQL`. The in-memory backend serves the
//! same operations from a [`MemoryCatalog`] so the router can be exercised
//! without a database (tests, local demos).

use std::collections::BTreeMap;
use std::sync::Arc;

use revnroll_db::{DbError, JoinOutcome, PostgresPool};
use revnroll_types::{
    EventKind, EventRecord, EventSummary, Meet, MeetId, MeetRequest, Race, RaceId, RaceRequest,
    UserId,
};
use tokio::sync::RwLock;

/// In-memory meets and races, keyed by id.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    /// Meets keyed by id.
    pub meets: BTreeMap<MeetId, Meet>,
    /// Races keyed by id.
    pub races: BTreeMap<RaceId, Race>,
    next_meet_id: i64,
    next_race_id: i64,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self {
            meets: BTreeMap::new(),
            races: BTreeMap::new(),
            next_meet_id: 1,
            next_race_id: 1,
        }
    }
}

impl MemoryCatalog {
    /// Insert a meet built from `request`, assigning the next id.
    pub fn insert_meet(&mut self, request: &MeetRequest, creator: UserId) -> Meet {
        let id = MeetId(self.next_meet_id);
        self.next_meet_id = self.next_meet_id.saturating_add(1);
        let meet = Meet {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            creator_id: creator,
            crew_id: request.crew_id,
            location: request.location.clone(),
            coordinates: request.coordinates.clone(),
            date: request.date,
            private: request.private,
            tags: request.tags.clone(),
            participants: Vec::new(),
        };
        self.meets.insert(id, meet.clone());
        meet
    }

    /// Insert a race built from `request`, assigning the next id.
    pub fn insert_race(&mut self, request: &RaceRequest, creator: UserId) -> Race {
        let id = RaceId(self.next_race_id);
        self.next_race_id = self.next_race_id.saturating_add(1);
        let race = Race {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            creator_id: creator,
            crew_id: request.crew_id,
            race_type: request.race_type,
            location: request.location.clone(),
            coordinates: request.coordinates.clone(),
            date: request.date,
            private: request.private,
            participants: Vec::new(),
        };
        self.races.insert(id, race.clone());
        race
    }

    fn participants_mut(&mut self, kind: EventKind, id: i64) -> Option<&mut Vec<UserId>> {
        match kind {
            EventKind::Meet => self.meets.get_mut(&MeetId(id)).map(|m| &mut m.participants),
            EventKind::Race => self.races.get_mut(&RaceId(id)).map(|r| &mut r.participants),
        }
    }

    fn records(&self, kind: EventKind) -> Vec<EventRecord> {
        match kind {
            EventKind::Meet => self.meets.values().map(EventRecord::from).collect(),
            EventKind::Race => self.races.values().map(EventRecord::from).collect(),
        }
    }
}

/// The storage backend used by the handlers.
#[derive(Clone)]
pub enum Repository {
    /// `PostgreSQL` via `revnroll-db`.
    Postgres(PostgresPool),
    /// Process-local catalog.
    Memory(Arc<RwLock<MemoryCatalog>>),
}

impl Repository {
    /// An empty in-memory repository.
    pub fn in_memory() -> Self {
        Self::Memory(Arc::new(RwLock::new(MemoryCatalog::default())))
    }

    /// Create a meet owned by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn create_meet(
        &self,
        request: &MeetRequest,
        creator: UserId,
    ) -> Result<Meet, DbError> {
        match self {
            Self::Postgres(pool) => pool.meets().insert(request, creator).await,
            Self::Memory(catalog) => Ok(catalog.write().await.insert_meet(request, creator)),
        }
    }

    /// Replace the editable fields of a meet; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn update_meet(
        &self,
        id: MeetId,
        request: &MeetRequest,
    ) -> Result<Option<Meet>, DbError> {
        match self {
            Self::Postgres(pool) => pool.meets().update(id, request).await,
            Self::Memory(catalog) => {
                let mut catalog = catalog.write().await;
                Ok(catalog.meets.get_mut(&id).map(|meet| {
                    meet.name.clone_from(&request.name);
                    meet.description.clone_from(&request.description);
                    meet.crew_id = request.crew_id;
                    meet.location.clone_from(&request.location);
                    meet.coordinates.clone_from(&request.coordinates);
                    meet.date = request.date;
                    meet.private = request.private;
                    meet.tags.clone_from(&request.tags);
                    meet.clone()
                }))
            }
        }
    }

    /// Fetch a meet by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn get_meet(&self, id: MeetId) -> Result<Option<Meet>, DbError> {
        match self {
            Self::Postgres(pool) => pool.meets().get(id).await,
            Self::Memory(catalog) => Ok(catalog.read().await.meets.get(&id).cloned()),
        }
    }

    /// Create a race owned by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn create_race(
        &self,
        request: &RaceRequest,
        creator: UserId,
    ) -> Result<Race, DbError> {
        match self {
            Self::Postgres(pool) => pool.races().insert(request, creator).await,
            Self::Memory(catalog) => Ok(catalog.write().await.insert_race(request, creator)),
        }
    }

    /// Replace the editable fields of a race; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn update_race(
        &self,
        id: RaceId,
        request: &RaceRequest,
    ) -> Result<Option<Race>, DbError> {
        match self {
            Self::Postgres(pool) => pool.races().update(id, request).await,
            Self::Memory(catalog) => {
                let mut catalog = catalog.write().await;
                Ok(catalog.races.get_mut(&id).map(|race| {
                    race.name.clone_from(&request.name);
                    race.description.clone_from(&request.description);
                    race.crew_id = request.crew_id;
                    race.race_type = request.race_type;
                    race.location.clone_from(&request.location);
                    race.coordinates.clone_from(&request.coordinates);
                    race.date = request.date;
                    race.private = request.private;
                    race.clone()
                }))
            }
        }
    }

    /// Fetch a race by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn get_race(&self, id: RaceId) -> Result<Option<Race>, DbError> {
        match self {
            Self::Postgres(pool) => pool.races().get(id).await,
            Self::Memory(catalog) => Ok(catalog.read().await.races.get(&id).cloned()),
        }
    }

    /// Delete an event; `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn delete(&self, kind: EventKind, id: i64) -> Result<bool, DbError> {
        match self {
            Self::Postgres(pool) => pool.events().delete(kind, id).await,
            Self::Memory(catalog) => {
                let mut catalog = catalog.write().await;
                Ok(match kind {
                    EventKind::Meet => catalog.meets.remove(&MeetId(id)).is_some(),
                    EventKind::Race => catalog.races.remove(&RaceId(id)).is_some(),
                })
            }
        }
    }

    /// Add `user` to an event's participants.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn join(
        &self,
        kind: EventKind,
        id: i64,
        user: UserId,
    ) -> Result<JoinOutcome, DbError> {
        match self {
            Self::Postgres(pool) => pool.events().join(kind, id, user).await,
            Self::Memory(catalog) => {
                let mut catalog = catalog.write().await;
                Ok(match catalog.participants_mut(kind, id) {
                    None => JoinOutcome::NotFound,
                    Some(list) if list.contains(&user) => JoinOutcome::AlreadyJoined,
                    Some(list) => {
                        list.push(user);
                        JoinOutcome::Joined
                    }
                })
            }
        }
    }

    /// List all events of `kind` as summaries, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn summaries(&self, kind: EventKind) -> Result<Vec<EventSummary>, DbError> {
        match self {
            Self::Postgres(pool) => pool.events().summaries(kind).await,
            Self::Memory(catalog) => Ok(catalog
                .read()
                .await
                .records(kind)
                .iter()
                .map(EventRecord::summary)
                .collect()),
        }
    }

    /// Load all events of `kind` as proximity candidates, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn candidates(&self, kind: EventKind) -> Result<Vec<EventRecord>, DbError> {
        match self {
            Self::Postgres(pool) => pool.events().load_candidates(kind).await,
            Self::Memory(catalog) => Ok(catalog.read().await.records(kind)),
        }
    }
}
