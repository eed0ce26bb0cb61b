// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Club, Event, FeedView, Followers, RecommendationStrategy, RecommendedClub, StudentProfile, UserKind};
pub use requests::{BrowseClubsQuery, DashboardQuery, EventFilter, FeedQuery, FollowRequest, RecommendationsQuery, RegistrationCheckRequest, RegistrationKind};
pub use responses::{
    BrowseClubsResponse, BrowseItem, DashboardEvent, DashboardResponse, ErrorResponse, FeedItem, FeedResponse, FollowResponse,
    HealthResponse, RecommendationsResponse, RegistrationCheckResponse, RosterEntry, SignupResponse, UserStatusResponse,
};
