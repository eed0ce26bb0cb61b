use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{FollowRequest, FollowResponse, SignupResponse};
use crate::routes::{AppState, AuthenticatedUser};
use crate::services::membership;

/// Configure follow and sign-up routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/clubs/follow", web::post().to(follow))
        .route("/clubs/unfollow", web::post().to(unfollow))
        .route("/events/{event_id}/signup", web::post().to(sign_up))
        .route("/events/{event_id}/signup", web::delete().to(remove_signup));
}

/// POST /api/v1/clubs/follow
///
/// Request body:
/// ```json
/// { "clubName": "string" }
/// ```
async fn follow(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<FollowRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;

    let outcome = membership::follow_club(&state.catalog, &user.uid, req.club_name.trim()).await?;

    Ok(HttpResponse::Ok().json(FollowResponse {
        changed: outcome.changed,
        joined_clubs: outcome.joined_clubs,
    }))
}

/// POST /api/v1/clubs/unfollow
async fn unfollow(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<FollowRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;

    let outcome = membership::unfollow_club(&state.catalog, &user.uid, req.club_name.trim()).await?;

    Ok(HttpResponse::Ok().json(FollowResponse {
        changed: outcome.changed,
        joined_clubs: outcome.joined_clubs,
    }))
}

/// POST /api/v1/events/{event_id}/signup
async fn sign_up(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let event_id = path.into_inner();
    let attendees = membership::sign_up(&state.catalog, &user.uid, &event_id).await?;

    Ok(HttpResponse::Ok().json(SignupResponse {
        event_id,
        signed_up: true,
        attendee_count: attendees.len(),
    }))
}

/// DELETE /api/v1/events/{event_id}/signup
async fn remove_signup(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let event_id = path.into_inner();
    let attendees = membership::remove_signup(&state.catalog, &user.uid, &event_id).await?;

    Ok(HttpResponse::Ok().json(SignupResponse {
        event_id,
        signed_up: false,
        attendee_count: attendees.len(),
    }))
}
