//! Club Feed - club recommendations and event feed for the campus club directory
//!
//! The core ranks clubs a student does not follow yet and filters the event
//! feed. Both operations are pure functions over a snapshot of the club
//! catalog, the event list and the student's profile.

pub mod config;
pub mod core;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{RecommendationEngine, RecommendationResult, RecommendationWeights, TagVocabulary};
pub use models::{Club, Event, FeedView, Followers, RecommendationStrategy, RecommendedClub, StudentProfile};
