use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{
    filters::{for_you_club_names, is_following_event, ContentFilter},
    scoring::{popularity_score, recommendation_score, tag_overlap, RecommendationWeights},
    tags::TagVocabulary,
};
use crate::models::{Club, Event, FeedView, RecommendationStrategy, RecommendedClub};

/// Result of ranking the club catalog for one student
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendedClub>,
    /// Clubs left after removing the ones already followed
    pub total_candidates: usize,
    pub strategy: RecommendationStrategy,
}

/// Club recommendation and event feed filtering.
///
/// Every call is a pure function of its arguments: the engine holds only
/// configuration, never a snapshot, so callers re-run it after any change
/// to clubs, events or the student's profile.
///
/// # Recommendation stages
/// 1. Exclude followed clubs
/// 2. Normalize follower counts
/// 3. Score by tag overlap and popularity (popularity alone without interests)
/// 4. Stable sort and truncate
///
/// # Feed stages
/// 1. Moderation filter
/// 2. View filter (following / for you)
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    weights: RecommendationWeights,
    vocabulary: Arc<TagVocabulary>,
    content_filter: ContentFilter,
}

impl RecommendationEngine {
    pub fn new(
        weights: RecommendationWeights,
        vocabulary: TagVocabulary,
        content_filter: ContentFilter,
    ) -> Self {
        Self {
            weights,
            vocabulary: Arc::new(vocabulary),
            content_filter,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            RecommendationWeights::default(),
            TagVocabulary::default(),
            ContentFilter::default(),
        )
    }

    pub fn weights(&self) -> &RecommendationWeights {
        &self.weights
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    pub fn content_filter(&self) -> &ContentFilter {
        &self.content_filter
    }

    /// Rank clubs the student does not follow yet.
    ///
    /// # Arguments
    /// * `clubs` - The full club catalog, in catalog order
    /// * `joined_club_names` - Names of clubs the student already follows
    /// * `interest_tags` - The student's interests; unknown tags are ignored
    /// * `limit` - Maximum number of recommendations to return
    ///
    /// Ties keep catalog order.
    pub fn recommend_clubs(
        &self,
        clubs: &[Club],
        joined_club_names: &[String],
        interest_tags: &[String],
        limit: usize,
    ) -> RecommendationResult {
        let joined: HashSet<&str> = joined_club_names.iter().map(String::as_str).collect();
        let interests = self.vocabulary.known_set(interest_tags);

        let strategy = if interests.is_empty() {
            RecommendationStrategy::Popularity
        } else {
            RecommendationStrategy::Interests
        };

        let mut ranked: Vec<RecommendedClub> = clubs
            .iter()
            // Stage 1: never recommend a followed club
            .filter(|club| !joined.contains(club.name.as_str()))
            // Stages 2 & 3: normalize followers once, then score
            .map(|club| {
                let follower_count = club.follower_count();
                let (overlap, score) = match strategy {
                    RecommendationStrategy::Popularity => {
                        (0, popularity_score(follower_count, &self.weights))
                    }
                    RecommendationStrategy::Interests => {
                        let overlap = tag_overlap(&club.tags, &interests);
                        (overlap, recommendation_score(overlap, follower_count, &self.weights))
                    }
                };

                RecommendedClub {
                    club: club.clone(),
                    tag_overlap: overlap,
                    follower_count,
                    score,
                }
            })
            .collect();

        let total_candidates = ranked.len();

        // Stage 4: stable sort keeps catalog order for equal keys
        match strategy {
            RecommendationStrategy::Popularity => {
                ranked.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
            }
            RecommendationStrategy::Interests => {
                ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
            }
        }

        ranked.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidate clubs ({:?})",
            ranked.len(),
            total_candidates,
            strategy
        );

        RecommendationResult {
            recommendations: ranked,
            total_candidates,
            strategy,
        }
    }

    /// Select the events shown in one feed view.
    ///
    /// Moderated events are dropped in both views. Output keeps input order.
    pub fn filter_event_feed<'a>(
        &self,
        events: &'a [Event],
        clubs: &[Club],
        joined_club_names: &[String],
        interest_tags: &[String],
        view: FeedView,
    ) -> Vec<&'a Event> {
        let joined: HashSet<&str> = joined_club_names.iter().map(String::as_str).collect();

        let visible = events
            .iter()
            .filter(|event| !self.content_filter.is_blocked(event));

        let feed: Vec<&Event> = match view {
            FeedView::Following => visible
                .filter(|event| is_following_event(event, &joined))
                .collect(),
            FeedView::ForYou => {
                let interests = self.vocabulary.known_set(interest_tags);
                let eligible = for_you_club_names(clubs, &joined, &interests);
                visible
                    .filter(|event| eligible.contains(event.club_name.as_str()))
                    .collect()
            }
        };

        tracing::debug!("Feed {:?}: {} of {} events", view, feed.len(), events.len());

        feed
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Followers;

    fn club(name: &str, tags: &[&str], followers: Followers) -> Club {
        Club {
            id: name.to_lowercase(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            followers,
            ..Default::default()
        }
    }

    fn uids(n: usize) -> Followers {
        Followers::List((0..n).map(|i| format!("u{}", i)).collect())
    }

    fn event(id: &str, name: &str, club_name: &str) -> Event {
        Event {
            id: id.to_string(),
            event_name: name.to_string(),
            club_name: club_name.to_string(),
            ..Default::default()
        }
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_interest_match_beats_popularity() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![
            club("Chess", &["games", "strategy"], uids(0)),
            club("Art", &["art"], uids(3)),
        ];

        let result = engine.recommend_clubs(&clubs, &[], &strings(&["strategy"]), 5);

        assert_eq!(result.strategy, RecommendationStrategy::Interests);
        let names: Vec<&str> = result.recommendations.iter().map(|r| r.club.name.as_str()).collect();
        assert_eq!(names, vec!["Chess", "Art"]);
        assert_eq!(result.recommendations[0].tag_overlap, 1);
        assert_eq!(result.recommendations[0].score, 3.0);
        assert!((result.recommendations[1].score - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_popularity_without_interests() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![
            club("Chess", &["games", "strategy"], uids(0)),
            club("Art", &["art"], uids(3)),
        ];

        let result = engine.recommend_clubs(&clubs, &[], &[], 5);

        assert_eq!(result.strategy, RecommendationStrategy::Popularity);
        assert_eq!(result.recommendations[0].club.name, "Art");
        assert_eq!(result.recommendations[1].club.name, "Chess");
    }

    #[test]
    fn test_unknown_interests_fall_back_to_popularity() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![club("Chess", &["not-a-tag"], uids(1)), club("Art", &["art"], uids(2))];

        let result = engine.recommend_clubs(&clubs, &[], &strings(&["not-a-tag"]), 5);

        assert_eq!(result.strategy, RecommendationStrategy::Popularity);
        assert!(result.recommendations.iter().all(|r| r.tag_overlap == 0));
        assert_eq!(result.recommendations[0].club.name, "Art");
    }

    #[test]
    fn test_followed_clubs_excluded() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![club("Chess", &["strategy"], uids(9)), club("Art", &["art"], uids(1))];

        let result = engine.recommend_clubs(&clubs, &strings(&["Chess"]), &strings(&["strategy"]), 5);

        assert_eq!(result.total_candidates, 1);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].club.name, "Art");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![
            club("A", &["art"], Followers::Count(2)),
            club("B", &["art"], uids(2)),
            club("C", &["art"], Followers::Count(2)),
        ];

        let popular = engine.recommend_clubs(&clubs, &[], &[], 10);
        let names: Vec<&str> = popular.recommendations.iter().map(|r| r.club.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let scored = engine.recommend_clubs(&clubs, &[], &strings(&["art"]), 10);
        let names: Vec<&str> = scored.recommendations.iter().map(|r| r.club.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_limit() {
        let engine = RecommendationEngine::with_defaults();
        let clubs: Vec<Club> = (0..8)
            .map(|i| club(&format!("Club {}", i), &["art"], uids(i)))
            .collect();

        assert!(engine.recommend_clubs(&clubs, &[], &[], 0).recommendations.is_empty());
        assert_eq!(engine.recommend_clubs(&clubs, &[], &[], 3).recommendations.len(), 3);
        assert_eq!(engine.recommend_clubs(&clubs, &[], &[], 100).recommendations.len(), 8);
    }

    #[test]
    fn test_empty_catalog() {
        let engine = RecommendationEngine::with_defaults();
        let result = engine.recommend_clubs(&[], &[], &strings(&["art"]), 5);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_following_feed() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![club("Chess", &["strategy"], uids(0)), club("Art", &["art"], uids(0))];
        let events = vec![event("e1", "Blitz night", "Chess"), event("e2", "Figure drawing", "Art")];

        let feed = engine.filter_event_feed(&events, &clubs, &strings(&["Chess"]), &[], FeedView::Following);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "e1");
    }

    #[test]
    fn test_for_you_feed_uses_interests() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![
            club("Chess", &["strategy"], uids(0)),
            club("Art", &["art"], uids(0)),
            club("Go", &["strategy"], uids(0)),
        ];
        let events = vec![
            event("e1", "Blitz night", "Chess"),
            event("e2", "Figure drawing", "Art"),
            event("e3", "Go lessons", "Go"),
        ];

        let feed = engine.filter_event_feed(
            &events,
            &clubs,
            &strings(&["Go"]),
            &strings(&["strategy"]),
            FeedView::ForYou,
        );

        let ids: Vec<&str> = feed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1"]);
    }

    #[test]
    fn test_for_you_without_interests_shows_all_unfollowed() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![club("Chess", &["strategy"], uids(0)), club("Art", &[], uids(0))];
        let events = vec![
            event("e1", "Blitz night", "Chess"),
            event("e2", "Figure drawing", "Art"),
            event("e3", "Orphan", "Unknown Club"),
        ];

        let feed = engine.filter_event_feed(&events, &clubs, &[], &[], FeedView::ForYou);

        let ids: Vec<&str> = feed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_moderated_events_dropped_in_both_views() {
        let engine = RecommendationEngine::with_defaults();
        let clubs = vec![club("Chess", &["strategy"], uids(0))];
        let events = vec![event("e1", "Pizza Night (Members Only)", "Chess")];
        let joined = strings(&["Chess"]);

        assert!(engine
            .filter_event_feed(&events, &clubs, &joined, &[], FeedView::Following)
            .is_empty());
        assert!(engine
            .filter_event_feed(&events, &clubs, &[], &[], FeedView::ForYou)
            .is_empty());
    }
}
