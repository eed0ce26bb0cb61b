use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

use crate::models::{Club, Event, Followers, StudentProfile};
use crate::services::store::{
    with_attendee, with_follower, without_attendee, without_follower, DocumentStore, StoreError,
};

/// Seed document for [`MemoryStore::from_seed_file`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub students: Vec<StudentProfile>,
}

#[derive(Debug, Default)]
struct Collections {
    clubs: Vec<Club>,
    events: Vec<Event>,
    students: Vec<StudentProfile>,
}

/// In-process document store for local development and tests.
///
/// Keeps insertion order so listings match catalog order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        Self {
            inner: RwLock::new(Collections {
                clubs: seed.clubs,
                events: seed.events,
                students: seed.students,
            }),
        }
    }

    /// Load a JSON seed file of the form `{ "clubs": [], "events": [], "students": [] }`
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Seeded memory store with {} clubs, {} events, {} students",
            seed.clubs.len(),
            seed.events.len(),
            seed.students.len()
        );

        Ok(Self::new(seed))
    }

    pub async fn insert_club(&self, club: Club) {
        self.inner.write().await.clubs.push(club);
    }

    pub async fn insert_event(&self, event: Event) {
        self.inner.write().await.events.push(event);
    }

    pub async fn insert_student(&self, student: StudentProfile) {
        self.inner.write().await.students.push(student);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError> {
        Ok(self.inner.read().await.clubs.clone())
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.inner.read().await.events.clone())
    }

    async fn list_club_events(&self, club_id: &str) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .events
            .iter()
            .filter(|e| e.club_id == club_id)
            .cloned()
            .collect())
    }

    async fn get_student(&self, uid: &str) -> Result<Option<StudentProfile>, StoreError> {
        Ok(self.inner.read().await.students.iter().find(|s| s.id == uid).cloned())
    }

    async fn get_club(&self, club_id: &str) -> Result<Option<Club>, StoreError> {
        Ok(self.inner.read().await.clubs.iter().find(|c| c.id == club_id).cloned())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.inner.read().await.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn set_joined_clubs(&self, uid: &str, joined: &[String]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let student = inner
            .students
            .iter_mut()
            .find(|s| s.id == uid)
            .ok_or_else(|| StoreError::NotFound(format!("Student {}", uid)))?;
        student.joined_clubs = joined.to_vec();
        Ok(())
    }

    async fn add_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let club = inner
            .clubs
            .iter_mut()
            .find(|c| c.id == club_id)
            .ok_or_else(|| StoreError::NotFound(format!("Club {}", club_id)))?;
        club.followers = Followers::List(with_follower(&club.followers, uid));
        Ok(())
    }

    async fn remove_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let club = inner
            .clubs
            .iter_mut()
            .find(|c| c.id == club_id)
            .ok_or_else(|| StoreError::NotFound(format!("Club {}", club_id)))?;
        club.followers = Followers::List(without_follower(&club.followers, uid));
        Ok(())
    }

    async fn add_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))?;
        event.attendees = with_attendee(&event.attendees, uid);
        Ok(event.attendees.clone())
    }

    async fn remove_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))?;
        event.attendees = without_attendee(&event.attendees, uid);
        Ok(event.attendees.clone())
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.events.len();
        inner.events.retain(|e| e.id != event_id);
        if inner.events.len() == before {
            return Err(StoreError::NotFound(format!("Event {}", event_id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
