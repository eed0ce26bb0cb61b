use std::collections::HashSet;

use crate::core::tags::TagVocabulary;
use crate::models::{Club, Event};

/// Terms that keep an event out of every feed view
pub const DEFAULT_BLOCKED_TERMS: &[&str] = &["test", "members only"];

/// Moderation filter for test data and private events
///
/// An event is blocked when its name, description or club name contains
/// any blocked term, case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    blocked_terms: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blocked_terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn blocked_terms(&self) -> &[String] {
        &self.blocked_terms
    }

    #[inline]
    pub fn is_blocked(&self, event: &Event) -> bool {
        [&event.event_name, &event.description, &event.club_name]
            .iter()
            .any(|field| self.contains_blocked_term(field))
    }

    fn contains_blocked_term(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.blocked_terms.iter().any(|term| lowered.contains(term.as_str()))
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_TERMS.iter().copied())
    }
}

/// Whether the event belongs to a club the student follows
#[inline]
pub fn is_following_event(event: &Event, joined: &HashSet<&str>) -> bool {
    joined.contains(event.club_name.as_str())
}

/// Names of the clubs whose events belong in the "for you" view.
///
/// Followed clubs are never eligible. With no interests every other club is
/// eligible; otherwise the club must share at least one interest tag.
pub fn for_you_club_names<'a>(
    clubs: &'a [Club],
    joined: &HashSet<&str>,
    interests: &HashSet<&str>,
) -> HashSet<&'a str> {
    clubs
        .iter()
        .filter(|club| !joined.contains(club.name.as_str()))
        .filter(|club| {
            interests.is_empty() || club.tags.iter().any(|tag| interests.contains(tag.as_str()))
        })
        .map(|club| club.name.as_str())
        .collect()
}

/// Search text and tag selection from the browse page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub search: String,
    pub tags: Vec<String>,
}

impl BrowseFilter {
    pub fn new(search: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            search: search.into(),
            tags,
        }
    }

    /// Restrict the selected tags to the vocabulary
    pub fn sanitized(mut self, vocabulary: &TagVocabulary) -> Self {
        self.tags = vocabulary.sanitize(&self.tags);
        self
    }
}

/// Check a club against the browse search box and selected tags
#[inline]
pub fn matches_browse_filter(club: &Club, filter: &BrowseFilter) -> bool {
    let needle = filter.search.trim().to_lowercase();
    let matches_search = needle.is_empty()
        || club.name.to_lowercase().contains(&needle)
        || club.description.to_lowercase().contains(&needle);

    let matches_tags = filter.tags.is_empty()
        || club.tags.iter().any(|tag| filter.tags.contains(tag));

    matches_search && matches_tags
}
