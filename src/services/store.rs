use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Club, Event, StudentProfile};

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to load seed data: {0}")]
    Seed(String),
}

/// Collection names in the document store
#[derive(Debug, Clone)]
pub struct StoreCollections {
    pub clubs: String,
    pub events: String,
    pub users: String,
}

impl Default for StoreCollections {
    fn default() -> Self {
        Self {
            clubs: "clubs".to_string(),
            events: "events".to_string(),
            users: "users".to_string(),
        }
    }
}

/// Read and write access to club, event and student documents.
///
/// Array updates are read-modify-write; no transactional guarantee spans
/// more than one call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every club document, in store order
    async fn list_clubs(&self) -> Result<Vec<Club>, StoreError>;

    /// Every event document, in store order
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// Events owned by one club account
    async fn list_club_events(&self, club_id: &str) -> Result<Vec<Event>, StoreError>;

    async fn get_student(&self, uid: &str) -> Result<Option<StudentProfile>, StoreError>;

    async fn get_club(&self, club_id: &str) -> Result<Option<Club>, StoreError>;

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError>;

    /// Replace the student's joined-club list
    async fn set_joined_clubs(&self, uid: &str, joined: &[String]) -> Result<(), StoreError>;

    /// Add `uid` to the club's followers unless already present
    async fn add_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError>;

    async fn remove_follower(&self, club_id: &str, uid: &str) -> Result<(), StoreError>;

    /// Add `uid` to the event's attendees unless already present; returns the new attendee list
    async fn add_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError>;

    async fn remove_attendee(&self, event_id: &str, uid: &str) -> Result<Vec<String>, StoreError>;

    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError>;

    /// Cheap connectivity probe
    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Follower list after adding `uid`; a legacy numeric count becomes a list
pub(crate) fn with_follower(followers: &crate::models::Followers, uid: &str) -> Vec<String> {
    let mut ids = followers.ids().to_vec();
    if !ids.iter().any(|id| id == uid) {
        ids.push(uid.to_string());
    }
    ids
}

pub(crate) fn without_follower(followers: &crate::models::Followers, uid: &str) -> Vec<String> {
    followers.ids().iter().filter(|id| id.as_str() != uid).cloned().collect()
}

pub(crate) fn with_attendee(attendees: &[String], uid: &str) -> Vec<String> {
    let mut updated = attendees.to_vec();
    if !updated.iter().any(|a| a == uid) {
        updated.push(uid.to_string());
    }
    updated
}

pub(crate) fn without_attendee(attendees: &[String], uid: &str) -> Vec<String> {
    attendees.iter().filter(|a| a.as_str() != uid).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Followers;

    #[test]
    fn test_follower_union_semantics() {
        let followers = Followers::List(vec!["u1".to_string()]);
        assert_eq!(with_follower(&followers, "u1"), vec!["u1"]);
        assert_eq!(with_follower(&followers, "u2"), vec!["u1", "u2"]);
        assert!(without_follower(&followers, "u1").is_empty());
    }

    #[test]
    fn test_legacy_count_becomes_list() {
        assert_eq!(with_follower(&Followers::Count(40), "u1"), vec!["u1"]);
    }

    #[test]
    fn test_attendee_union_semantics() {
        let attendees = vec!["u1".to_string()];
        assert_eq!(with_attendee(&attendees, "u1").len(), 1);
        assert_eq!(with_attendee(&attendees, "u2").len(), 2);
        assert!(without_attendee(&attendees, "u1").is_empty());
    }
}
