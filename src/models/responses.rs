use serde::{Deserialize, Serialize};

use crate::models::domain::{Club, Event, FeedView, RecommendationStrategy, RecommendedClub, UserKind};
use crate::models::requests::EventFilter;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendedClub>,
    pub strategy: RecommendationStrategy,
    pub total_candidates: usize,
}

/// One event card in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "attendeeCount")]
    pub attendee_count: usize,
    #[serde(rename = "signedUp")]
    pub signed_up: bool,
}

/// Response for the event feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub view: FeedView,
    pub events: Vec<FeedItem>,
    pub signed_up_count: usize,
}

/// One club in the browse listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseItem {
    #[serde(flatten)]
    pub club: Club,
    #[serde(rename = "followerCount")]
    pub follower_count: u64,
    pub following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseClubsResponse {
    pub clubs: Vec<BrowseItem>,
    pub total_results: usize,
}

/// Response for follow and unfollow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub changed: bool,
    #[serde(rename = "joinedClubs")]
    pub joined_clubs: Vec<String>,
}

/// Response for sign-up changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub event_id: String,
    pub signed_up: bool,
    pub attendee_count: usize,
}

/// Contact details of an attendee or follower
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub uid: String,
    pub email: String,
    pub major: String,
}

/// A dashboard event with its attendee roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEvent {
    #[serde(flatten)]
    pub event: Event,
    #[serde(rename = "attendeeDetails")]
    pub attendee_details: Vec<RosterEntry>,
}

/// Club dashboard statistics, event list and rosters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub filter: EventFilter,
    pub events: Vec<DashboardEvent>,
    pub event_count: usize,
    pub total_signups: usize,
    pub average_attendance: u64,
    pub follower_count: u64,
    pub followers: Vec<RosterEntry>,
}

/// Account status for the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: String,
    pub kind: Option<UserKind>,
    pub profile_complete: bool,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCheckResponse {
    pub eligible: bool,
    pub reason: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
