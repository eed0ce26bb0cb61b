// Service exports
pub mod appwrite;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod membership;
pub mod memory;
pub mod store;

pub use appwrite::AppwriteStore;
pub use auth::{AuthError, Claims, TokenVerifier};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::Catalog;
pub use membership::{follow_club, remove_signup, sign_up, unfollow_club, FollowOutcome};
pub use memory::{MemoryStore, SeedData};
pub use store::{DocumentStore, StoreCollections, StoreError};
