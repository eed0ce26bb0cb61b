use std::collections::HashSet;

/// Tags offered by the club and interest pickers when no vocabulary is configured
pub const DEFAULT_TAGS: &[&str] = &[
    "academic",
    "art",
    "business",
    "community service",
    "cultural",
    "dance",
    "engineering",
    "environment",
    "games",
    "health",
    "journalism",
    "music",
    "outdoors",
    "political",
    "pre-professional",
    "religious",
    "science",
    "social",
    "sports",
    "strategy",
    "technology",
    "theater",
    "volunteering",
    "wellness",
];

/// The fixed set of valid tag strings.
///
/// Matching is exact; `"Art"` and `"art"` are different tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    tags: HashSet<String>,
}

impl TagVocabulary {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Keep known tags only, first occurrence wins
    pub fn sanitize(&self, tags: &[String]) -> Vec<String> {
        let mut seen = HashSet::with_capacity(tags.len());
        tags.iter()
            .filter(|tag| self.contains(tag))
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    /// Known tags as a borrowed set, for repeated overlap checks
    pub fn known_set<'a>(&self, tags: &'a [String]) -> HashSet<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|tag| self.contains(tag))
            .collect()
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_TAGS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_vocabulary() {
        let vocab = TagVocabulary::default();
        assert_eq!(vocab.len(), DEFAULT_TAGS.len());
        assert!(vocab.contains("strategy"));
        assert!(!vocab.contains("Strategy"));
    }

    #[test]
    fn test_sanitize_drops_unknown_and_duplicates() {
        let vocab = TagVocabulary::default();
        let cleaned = vocab.sanitize(&tags(&["art", "made-up", "games", "art", ""]));
        assert_eq!(cleaned, tags(&["art", "games"]));
    }

    #[test]
    fn test_known_set() {
        let vocab = TagVocabulary::new(["a", "b"]);
        let input = tags(&["a", "a", "z"]);
        let set = vocab.known_set(&input);
        assert_eq!(set.len(), 1);
        assert!(set.contains("a"));
    }
}
