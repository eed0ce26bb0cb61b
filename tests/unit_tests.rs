// Unit tests for Club Feed

use chrono::NaiveDate;
use club_feed::core::{
    club_completeness, event_stats, matches_browse_filter, partition_events, plan_follow, plan_unfollow,
    recommendation_score, student_completeness, tag_overlap, BrowseFilter, ContentFilter, Ineligible,
    RecommendationWeights, RegistrationPolicy, TagVocabulary,
};
use club_feed::models::{Club, Event, EventFilter, Followers, RegistrationKind, StudentProfile};
use std::collections::HashSet;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn club(name: &str, club_tags: &[&str], description: &str) -> Club {
    Club {
        id: name.to_lowercase(),
        name: name.to_string(),
        tags: tags(club_tags),
        description: description.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_followers_normalization() {
    let list: Followers = serde_json::from_str(r#"["a", "b", "c"]"#).unwrap();
    assert_eq!(list.normalized_count(), 3);

    let count: Followers = serde_json::from_str("12").unwrap();
    assert_eq!(count.normalized_count(), 12);

    let garbage: Followers = serde_json::from_str(r#""lots""#).unwrap();
    assert_eq!(garbage.normalized_count(), 0);

    let negative: Followers = serde_json::from_str("-4").unwrap();
    assert_eq!(negative.normalized_count(), 0);
}

#[test]
fn test_sparse_club_document() {
    let club: Club = serde_json::from_str(r#"{"name": "Chess", "tags": null}"#).unwrap();
    assert_eq!(club.name, "Chess");
    assert!(club.tags.is_empty());
    assert_eq!(club.follower_count(), 0);
}

#[test]
fn test_sparse_event_document() {
    let event: Event = serde_json::from_str(r#"{"clubName": "Chess", "attendees": null}"#).unwrap();
    assert_eq!(event.attendee_count(), 0);
    assert!(event.open_to_everyone);
}

#[test]
fn test_vocabulary_sanitize() {
    let vocabulary = TagVocabulary::new(["art", "music", "games"]);
    let sanitized = vocabulary.sanitize(&tags(&["music", "knitting", "art", "music"]));
    assert_eq!(sanitized, vec!["music", "art"]);
}

#[test]
fn test_overlap_ignores_duplicates() {
    let interests: HashSet<&str> = ["games", "strategy"].into_iter().collect();
    assert_eq!(tag_overlap(&tags(&["games", "games", "strategy"]), &interests), 2);
    assert_eq!(tag_overlap(&tags(&["art"]), &interests), 0);
    assert_eq!(tag_overlap(&[], &interests), 0);
}

#[test]
fn test_score_formula() {
    let weights = RecommendationWeights::default();
    assert!((recommendation_score(1, 0, &weights) - 3.0).abs() < 1e-9);
    assert!((recommendation_score(0, 3, &weights) - 0.3).abs() < 1e-9);
    assert!((recommendation_score(2, 10, &weights) - 7.0).abs() < 1e-9);
}

#[test]
fn test_content_filter_is_case_insensitive() {
    let filter = ContentFilter::default();

    let blocked = Event {
        event_name: "TESTING the waters".to_string(),
        ..Default::default()
    };
    let private = Event {
        club_name: "Chess".to_string(),
        description: "Members Only social".to_string(),
        ..Default::default()
    };
    let open = Event {
        event_name: "Pizza Night".to_string(),
        club_name: "Chess".to_string(),
        ..Default::default()
    };

    assert!(filter.is_blocked(&blocked));
    assert!(filter.is_blocked(&private));
    assert!(!filter.is_blocked(&open));
}

#[test]
fn test_browse_filter() {
    let chess = club("Chess", &["games", "strategy"], "Weekly tournaments");
    let art = club("Art", &["art"], "Open studio and chess-themed murals");

    let search = BrowseFilter::new("CHESS", vec![]);
    assert!(matches_browse_filter(&chess, &search));
    assert!(matches_browse_filter(&art, &search));

    let tagged = BrowseFilter::new("chess", tags(&["art"]));
    assert!(!matches_browse_filter(&chess, &tagged));
    assert!(matches_browse_filter(&art, &tagged));

    let unknown_tag = BrowseFilter::new("", tags(&["knitting"])).sanitized(&TagVocabulary::default());
    assert!(matches_browse_filter(&chess, &unknown_tag));
}

#[test]
fn test_follow_planning() {
    let joined = tags(&["Chess"]);
    assert_eq!(plan_follow(&joined, "Chess"), None);
    assert_eq!(plan_follow(&joined, "Art"), Some(tags(&["Chess", "Art"])));

    assert_eq!(plan_unfollow(&joined, "Art"), None);
    assert_eq!(plan_unfollow(&tags(&["Chess", "Art", "Chess"]), "Chess"), Some(tags(&["Art"])));
}

#[test]
fn test_student_completeness() {
    let mut profile = StudentProfile {
        name: "Sammy".to_string(),
        ..Default::default()
    };
    assert_eq!(student_completeness(&profile).missing, vec!["major"]);

    profile.major = "Biology".to_string();
    assert!(student_completeness(&profile).is_complete());
}

#[test]
fn test_club_completeness() {
    let mut club = club("Chess", &["games"], "one two three four five six seven eight nine ten");
    club.elevator_pitch = "Play chess".to_string();
    club.email = "chess@ucsc.edu".to_string();
    club.instagram = "@chess".to_string();
    club.image_urls = tags(&["https://example.org/a.png"]);
    assert!(club_completeness(&club).is_complete());

    club.description = "too short".to_string();
    club.image_urls.clear();
    let result = club_completeness(&club);
    assert!(!result.is_complete());
    assert_eq!(result.missing.len(), 2);
}

#[test]
fn test_registration_policy() {
    let policy = RegistrationPolicy::new("@ucsc.edu", ["chess@ucsc.edu"]);
    assert!(policy.check("Student@UCSC.EDU", RegistrationKind::Student).is_ok());
    assert!(matches!(
        policy.check("student@gmail.com", RegistrationKind::Student),
        Err(Ineligible::WrongDomain(_))
    ));
    assert!(policy.check("CHESS@ucsc.edu", RegistrationKind::Club).is_ok());
    assert_eq!(
        policy.check("student@ucsc.edu", RegistrationKind::Club),
        Err(Ineligible::NotApprovedClub)
    );
}

#[test]
fn test_dashboard_stats_over_selected_events() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let event = |date: &str, attendees: &[&str]| Event {
        date: date.to_string(),
        attendees: tags(attendees),
        ..Default::default()
    };
    let events = vec![
        event("2024-05-01", &["a", "b", "c", "d"]),
        event("2024-05-20", &["a"]),
        event("2024-06-01", &["a", "b"]),
    ];

    let active = partition_events(&events, today, EventFilter::Active);
    let stats = event_stats(&active);
    assert_eq!(stats.event_count, 2);
    assert_eq!(stats.total_signups, 3);
    assert_eq!(stats.average_attendance, 2);

    let archived = partition_events(&events, today, EventFilter::Archived);
    assert_eq!(event_stats(&archived).total_signups, 4);
}
