use actix_web::{web, HttpResponse};
use std::collections::HashSet;

use crate::core::{matches_browse_filter, BrowseFilter};
use crate::error::AppResult;
use crate::models::{
    BrowseClubsQuery, BrowseClubsResponse, BrowseItem, FeedItem, FeedQuery, FeedResponse, HealthResponse,
    RecommendationsQuery, RecommendationsResponse, StudentProfile,
};
use crate::routes::{AppState, AuthenticatedUser};

/// Configure recommendation, feed and browse routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations", web::get().to(recommendations))
        .route("/feed", web::get().to(event_feed))
        .route("/clubs", web::get().to(browse_clubs));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = state.catalog.store().health_check().await.unwrap_or(false);
    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// The caller's student record, or an empty profile for accounts without one
async fn load_profile(state: &AppState, uid: &str) -> AppResult<StudentProfile> {
    let profile = state.catalog.store().get_student(uid).await?;
    Ok(profile.unwrap_or_else(|| {
        tracing::debug!("No student record for {}, using an empty profile", uid);
        StudentProfile {
            id: uid.to_string(),
            ..Default::default()
        }
    }))
}

/// Club recommendations endpoint
///
/// GET /api/v1/recommendations?limit=5
async fn recommendations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<RecommendationsQuery>,
) -> AppResult<HttpResponse> {
    let limit = query.limit.unwrap_or(state.default_limit).min(state.max_limit);

    // Student record is always read fresh so both branches see the same joined list
    let profile = load_profile(&state, &user.uid).await?;
    let clubs = state.catalog.clubs().await?;

    let result = state
        .engine
        .recommend_clubs(&clubs, &profile.joined_clubs, &profile.tags, limit);

    tracing::info!(
        "Recommended {} clubs for {} ({:?}, {} candidates)",
        result.recommendations.len(),
        user.uid,
        result.strategy,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: result.recommendations,
        strategy: result.strategy,
        total_candidates: result.total_candidates,
    }))
}

/// Event feed endpoint
///
/// GET /api/v1/feed?view=forYou|following
async fn event_feed(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let profile = load_profile(&state, &user.uid).await?;
    let clubs = state.catalog.clubs().await?;
    let events = state.catalog.events().await?;

    let feed = state.engine.filter_event_feed(
        &events,
        &clubs,
        &profile.joined_clubs,
        &profile.tags,
        query.view,
    );

    let items: Vec<FeedItem> = feed
        .into_iter()
        .map(|event| FeedItem {
            attendee_count: event.attendee_count(),
            signed_up: event.has_attendee(&user.uid),
            event: event.clone(),
        })
        .collect();
    let signed_up_count = items.iter().filter(|item| item.signed_up).count();

    tracing::info!("Feed {:?} for {}: {} events", query.view, user.uid, items.len());

    Ok(HttpResponse::Ok().json(FeedResponse {
        view: query.view,
        events: items,
        signed_up_count,
    }))
}

/// Browse clubs endpoint
///
/// GET /api/v1/clubs?search=chess&tags=games,strategy
async fn browse_clubs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<BrowseClubsQuery>,
) -> AppResult<HttpResponse> {
    let filter = BrowseFilter::new(query.search.clone().unwrap_or_default(), query.selected_tags())
        .sanitized(state.engine.vocabulary());

    let profile = load_profile(&state, &user.uid).await?;
    let joined: HashSet<&str> = profile.joined_clubs.iter().map(String::as_str).collect();
    let clubs = state.catalog.clubs().await?;

    let items: Vec<BrowseItem> = clubs
        .into_iter()
        .filter(|club| matches_browse_filter(club, &filter))
        .map(|club| BrowseItem {
            follower_count: club.follower_count(),
            following: joined.contains(club.name.as_str()),
            club,
        })
        .collect();

    tracing::debug!("Browse matched {} clubs for {}", items.len(), user.uid);

    Ok(HttpResponse::Ok().json(BrowseClubsResponse {
        total_results: items.len(),
        clubs: items,
    }))
}
