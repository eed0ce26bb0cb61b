use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{club_completeness, event_stats, partition_events, roster_entry, student_completeness};
use crate::error::{AppError, AppResult};
use crate::models::{
    DashboardEvent, DashboardQuery, DashboardResponse, RegistrationCheckRequest, RegistrationCheckResponse,
    RosterEntry, UserKind, UserStatusResponse,
};
use crate::services::DocumentStore;
use crate::routes::{AppState, AuthenticatedUser};

/// Configure club account, status and registration routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/clubs/me/dashboard", web::get().to(dashboard))
        .route("/events/{event_id}", web::delete().to(delete_event))
        .route("/me/status", web::get().to(user_status))
        .route("/registration/check", web::post().to(check_registration));
}

/// Club dashboard endpoint
///
/// GET /api/v1/clubs/me/dashboard?filter=active|archived
async fn dashboard(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<DashboardQuery>,
) -> AppResult<HttpResponse> {
    let store = state.catalog.store();
    let club = store
        .get_club(&user.uid)
        .await?
        .ok_or_else(|| AppError::Forbidden("Only club accounts have a dashboard".to_string()))?;

    let events = store.list_club_events(&user.uid).await?;
    let today = chrono::Utc::now().date_naive();
    let selected = partition_events(&events, today, query.filter);
    let stats = event_stats(&selected);

    tracing::info!(
        "Dashboard for {}: {} {:?} events, {} sign-ups",
        club.name,
        stats.event_count,
        query.filter,
        stats.total_signups
    );

    let mut rosters = RosterResolver::new(store.as_ref());
    let mut dashboard_events = Vec::with_capacity(selected.len());
    for event in selected {
        let attendee_details = rosters.resolve(&event.attendees).await?;
        dashboard_events.push(DashboardEvent {
            event: event.clone(),
            attendee_details,
        });
    }
    let followers = rosters.resolve(club.followers.ids()).await?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        filter: query.filter,
        events: dashboard_events,
        event_count: stats.event_count,
        total_signups: stats.total_signups,
        average_attendance: stats.average_attendance,
        follower_count: club.follower_count(),
        followers,
    }))
}

/// Looks up each uid once per request
struct RosterResolver<'a> {
    store: &'a dyn DocumentStore,
    seen: HashMap<String, RosterEntry>,
}

impl<'a> RosterResolver<'a> {
    fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            seen: HashMap::new(),
        }
    }

    async fn resolve(&mut self, uids: &[String]) -> AppResult<Vec<RosterEntry>> {
        let mut entries = Vec::with_capacity(uids.len());
        for uid in uids {
            if let Some(entry) = self.seen.get(uid) {
                entries.push(entry.clone());
                continue;
            }
            let profile = self.store.get_student(uid).await?;
            let entry = roster_entry(uid, profile.as_ref());
            self.seen.insert(uid.clone(), entry.clone());
            entries.push(entry);
        }
        Ok(entries)
    }
}

/// Delete an event owned by the calling club
///
/// DELETE /api/v1/events/{event_id}
async fn delete_event(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let event_id = path.into_inner();
    let store = state.catalog.store();

    let event = store
        .get_event(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    if event.club_id != user.uid {
        tracing::info!("{} tried to delete event {} owned by {}", user.uid, event_id, event.club_id);
        return Err(AppError::Forbidden("Only the owning club can delete this event".to_string()));
    }

    store.delete_event(&event_id).await?;
    state.catalog.invalidate_events().await;

    tracing::info!("Club {} deleted event {}", user.uid, event_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Account kind and profile completeness
///
/// GET /api/v1/me/status
async fn user_status(state: web::Data<AppState>, user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let store = state.catalog.store();

    let (kind, completeness) = match store.get_student(&user.uid).await? {
        Some(student) if student.is_student() => {
            (Some(UserKind::Student), student_completeness(&student))
        }
        _ => match store.get_club(&user.uid).await? {
            Some(club) => (Some(UserKind::Club), club_completeness(&club)),
            None => (None, Default::default()),
        },
    };

    let profile_complete = kind.is_some() && completeness.is_complete();

    Ok(HttpResponse::Ok().json(UserStatusResponse {
        user_id: user.uid,
        kind,
        profile_complete,
        missing: completeness.missing,
    }))
}

/// Sign-up eligibility check, no authentication required
///
/// POST /api/v1/registration/check
async fn check_registration(
    state: web::Data<AppState>,
    req: web::Json<RegistrationCheckRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;

    let response = match state.registration.check(&req.email, req.kind) {
        Ok(()) => RegistrationCheckResponse {
            eligible: true,
            reason: None,
        },
        Err(reason) => RegistrationCheckResponse {
            eligible: false,
            reason: Some(reason.to_string()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
