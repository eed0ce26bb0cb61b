use chrono::NaiveDate;

use crate::models::{Event, EventFilter, RosterEntry, StudentProfile};

/// Shown in place of the email of an unknown uid
pub const UNKNOWN_EMAIL: &str = "Unknown";
/// Shown in place of a missing major
pub const UNKNOWN_MAJOR: &str = "N/A";

/// Date format of `Event::date`
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// An event is archived once its date has passed.
///
/// Events without a parseable date stay active.
#[inline]
pub fn is_event_archived(event: &Event, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(event.date.trim(), EVENT_DATE_FORMAT)
        .map(|date| date < today)
        .unwrap_or(false)
}

/// Events selected by the dashboard filter, in input order
pub fn partition_events(events: &[Event], today: NaiveDate, filter: EventFilter) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| match filter {
            EventFilter::Active => !is_event_archived(event, today),
            EventFilter::Archived => is_event_archived(event, today),
        })
        .collect()
}

/// Sign-up statistics over a set of events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    pub event_count: usize,
    pub total_signups: usize,
    /// Rounded mean attendees per event, zero without events
    pub average_attendance: u64,
}

pub fn event_stats(events: &[&Event]) -> EventStats {
    let event_count = events.len();
    let total_signups: usize = events.iter().map(|e| e.attendee_count()).sum();
    let average_attendance = if event_count > 0 {
        (total_signups as f64 / event_count as f64).round() as u64
    } else {
        0
    };

    EventStats {
        event_count,
        total_signups,
        average_attendance,
    }
}

/// Roster line for a uid, with placeholders when the profile is gone
pub fn roster_entry(uid: &str, profile: Option<&StudentProfile>) -> RosterEntry {
    match profile {
        Some(profile) => RosterEntry {
            uid: uid.to_string(),
            email: profile.email.clone(),
            major: if profile.major.trim().is_empty() {
                UNKNOWN_MAJOR.to_string()
            } else {
                profile.major.clone()
            },
        },
        None => RosterEntry {
            uid: uid.to_string(),
            email: UNKNOWN_EMAIL.to_string(),
            major: UNKNOWN_MAJOR.to_string(),
        },
    }
}
