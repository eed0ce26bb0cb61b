//! Follow relationships and event sign-ups.
//!
//! Following is recorded on both sides: the club name in the student's
//! `joinedClubs` and the student's uid in the club's `followers`. The two
//! writes are independent, so a failure between them leaves one side stale.

use crate::core::{plan_follow, plan_unfollow};
use crate::services::catalog::Catalog;
use crate::services::store::StoreError;

/// Outcome of a follow or unfollow request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowOutcome {
    /// False when the request was already satisfied
    pub changed: bool,
    pub joined_clubs: Vec<String>,
}

pub async fn follow_club(catalog: &Catalog, uid: &str, club_name: &str) -> Result<FollowOutcome, StoreError> {
    update_follow(catalog, uid, club_name, true).await
}

pub async fn unfollow_club(catalog: &Catalog, uid: &str, club_name: &str) -> Result<FollowOutcome, StoreError> {
    update_follow(catalog, uid, club_name, false).await
}

async fn update_follow(
    catalog: &Catalog,
    uid: &str,
    club_name: &str,
    follow: bool,
) -> Result<FollowOutcome, StoreError> {
    let store = catalog.store();
    let student = store
        .get_student(uid)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Student {}", uid)))?;

    let planned = if follow {
        plan_follow(&student.joined_clubs, club_name)
    } else {
        plan_unfollow(&student.joined_clubs, club_name)
    };

    let Some(joined_clubs) = planned else {
        tracing::debug!("Follow state of {} for {} already up to date", club_name, uid);
        return Ok(FollowOutcome {
            changed: false,
            joined_clubs: student.joined_clubs,
        });
    };

    store.set_joined_clubs(uid, &joined_clubs).await?;

    let club = store.list_clubs().await?.into_iter().find(|c| c.name == club_name);
    match club {
        Some(club) if follow => store.add_follower(&club.id, uid).await?,
        Some(club) => store.remove_follower(&club.id, uid).await?,
        None => tracing::warn!("No club named {:?}; only the joined list was updated", club_name),
    }

    catalog.invalidate_clubs().await;

    tracing::info!(
        "{} {} {}",
        uid,
        if follow { "followed" } else { "unfollowed" },
        club_name
    );

    Ok(FollowOutcome {
        changed: true,
        joined_clubs,
    })
}

/// Add the student to an event's attendees; returns the new attendee list
pub async fn sign_up(catalog: &Catalog, uid: &str, event_id: &str) -> Result<Vec<String>, StoreError> {
    let attendees = catalog.store().add_attendee(event_id, uid).await?;
    catalog.invalidate_events().await;
    tracing::info!("{} signed up for event {}", uid, event_id);
    Ok(attendees)
}

pub async fn remove_signup(catalog: &Catalog, uid: &str, event_id: &str) -> Result<Vec<String>, StoreError> {
    let attendees = catalog.store().remove_attendee(event_id, uid).await?;
    catalog.invalidate_events().await;
    tracing::info!("{} removed sign-up for event {}", uid, event_id);
    Ok(attendees)
}
