use std::collections::HashSet;

/// Weights of the club recommendation score
///
/// score = tag_overlap * tag_overlap_weight + follower_count * popularity_weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationWeights {
    pub tag_overlap: f64,
    pub popularity: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            tag_overlap: 3.0,
            popularity: 0.1,
        }
    }
}

/// Number of distinct club tags that appear in `interests`.
///
/// `interests` must already be restricted to the tag vocabulary, so an
/// unknown club tag can never be counted.
#[inline]
pub fn tag_overlap(club_tags: &[String], interests: &HashSet<&str>) -> usize {
    if interests.is_empty() || club_tags.is_empty() {
        return 0;
    }

    let distinct: HashSet<&str> = club_tags.iter().map(String::as_str).collect();
    distinct.iter().filter(|tag| interests.contains(*tag)).count()
}

/// Combined interest and popularity score for one club
#[inline]
pub fn recommendation_score(
    tag_overlap: usize,
    follower_count: u64,
    weights: &RecommendationWeights,
) -> f64 {
    tag_overlap as f64 * weights.tag_overlap + popularity_score(follower_count, weights)
}

/// Popularity term on its own, used when the student has no interests
#[inline]
pub fn popularity_score(follower_count: u64, weights: &RecommendationWeights) -> f64 {
    follower_count as f64 * weights.popularity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overlap_counts_distinct_tags() {
        let interests: HashSet<&str> = ["art", "music"].into_iter().collect();

        assert_eq!(tag_overlap(&tags(&["art", "art", "art"]), &interests), 1);
        assert_eq!(tag_overlap(&tags(&["art", "music", "games"]), &interests), 2);
        assert_eq!(tag_overlap(&tags(&["games"]), &interests), 0);
        assert_eq!(tag_overlap(&[], &interests), 0);
    }

    #[test]
    fn test_overlap_with_no_interests() {
        let interests = HashSet::new();
        assert_eq!(tag_overlap(&tags(&["art"]), &interests), 0);
    }

    #[test]
    fn test_score_formula() {
        let weights = RecommendationWeights::default();

        assert_eq!(recommendation_score(1, 0, &weights), 3.0);
        assert!((recommendation_score(0, 3, &weights) - 0.3).abs() < 1e-9);
        assert!((recommendation_score(2, 10, &weights) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_tag_match_outweighs_moderate_popularity() {
        let weights = RecommendationWeights::default();
        let niche = recommendation_score(1, 0, &weights);
        let popular = recommendation_score(0, 29, &weights);
        assert!(niche > popular);
    }
}
