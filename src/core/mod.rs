// Core algorithm exports
pub mod completion;
pub mod dashboard;
pub mod engine;
pub mod filters;
pub mod follow;
pub mod registration;
pub mod scoring;
pub mod tags;

pub use completion::{club_completeness, student_completeness, Completeness};
pub use dashboard::{event_stats, is_event_archived, partition_events, roster_entry, EventStats};
pub use engine::{RecommendationEngine, RecommendationResult};
pub use filters::{matches_browse_filter, BrowseFilter, ContentFilter};
pub use follow::{plan_follow, plan_unfollow};
pub use registration::{Ineligible, RegistrationPolicy};
pub use scoring::{recommendation_score, tag_overlap, RecommendationWeights};
pub use tags::TagVocabulary;
