// Route exports
pub mod auth;
pub mod clubs;
pub mod feed;
pub mod membership;

use actix_web::web;
use std::sync::Arc;

use crate::core::{RecommendationEngine, RegistrationPolicy};
use crate::services::{Catalog, TokenVerifier};

pub use auth::AuthenticatedUser;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub engine: RecommendationEngine,
    pub verifier: Arc<TokenVerifier>,
    pub registration: Arc<RegistrationPolicy>,
    pub default_limit: usize,
    pub max_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(feed::configure)
            .configure(membership::configure)
            .configure(clubs::configure),
    );
}
