use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Club record as stored in the `clubs` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Club {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub followers: Followers,
    #[serde(rename = "elevatorPitch", default, deserialize_with = "lenient::string")]
    pub elevator_pitch: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "imageUrls", default, deserialize_with = "lenient::string_list")]
    pub image_urls: Vec<String>,
    #[serde(rename = "clubIcon", default, deserialize_with = "lenient::string")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub instagram: String,
}

impl Club {
    /// Follower count after normalization
    pub fn follower_count(&self) -> u64 {
        self.followers.normalized_count()
    }
}

/// Follower field of a club document.
///
/// Older club documents store a bare number; newer ones store the follower
/// uids. Both shapes are accepted and anything else reads as `Missing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Followers {
    List(Vec<String>),
    Count(u64),
    #[default]
    Missing,
}

impl Followers {
    /// Non-negative follower count regardless of representation
    pub fn normalized_count(&self) -> u64 {
        match self {
            Followers::List(ids) => ids.len() as u64,
            Followers::Count(count) => *count,
            Followers::Missing => 0,
        }
    }

    /// Follower uids, empty for the legacy numeric shape
    pub fn ids(&self) -> &[String] {
        match self {
            Followers::List(ids) => ids,
            _ => &[],
        }
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.ids().iter().any(|id| id == uid)
    }
}

impl<'de> Deserialize<'de> for Followers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Ok(match value {
            Value::Array(items) => Followers::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Value::Number(n) => Followers::Count(
                n.as_u64()
                    .or_else(|| {
                        n.as_f64()
                            .filter(|f| f.is_finite() && *f > 0.0)
                            .map(|f| f.floor() as u64)
                    })
                    .unwrap_or(0),
            ),
            _ => Followers::Missing,
        })
    }
}

/// Event record as stored in the `events` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(rename = "clubId", default, deserialize_with = "lenient::string")]
    pub club_id: String,
    // Denormalized club name, not a reference to Club::id
    #[serde(rename = "clubName", default, deserialize_with = "lenient::string")]
    pub club_name: String,
    #[serde(rename = "eventName", default, deserialize_with = "lenient::string")]
    pub event_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(rename = "startTime", default, deserialize_with = "lenient::string")]
    pub start_time: String,
    #[serde(rename = "endTime", default, deserialize_with = "lenient::string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub attendees: Vec<String>,
    #[serde(rename = "openToEveryone", default = "default_true", deserialize_with = "lenient::flag")]
    pub open_to_everyone: bool,
    #[serde(rename = "bannerUrl", default, deserialize_with = "lenient::optional_string")]
    pub banner_url: Option<String>,
    #[serde(rename = "zoomLink", default, deserialize_with = "lenient::optional_string")]
    pub zoom_link: Option<String>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: String::new(),
            club_id: String::new(),
            club_name: String::new(),
            event_name: String::new(),
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            location: String::new(),
            description: String::new(),
            tags: Vec::new(),
            attendees: Vec::new(),
            open_to_everyone: true,
            banner_url: None,
            zoom_link: None,
        }
    }
}

impl Event {
    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    pub fn has_attendee(&self, uid: &str) -> bool {
        self.attendees.iter().any(|a| a == uid)
    }
}

fn default_true() -> bool { true }

/// Student record as stored in the `users` collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub major: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    /// Declared interests; may still hold tags outside the vocabulary
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(rename = "joinedClubs", default, deserialize_with = "lenient::string_list")]
    pub joined_clubs: Vec<String>,
}

impl StudentProfile {
    pub fn is_student(&self) -> bool {
        self.kind == "student"
    }
}

/// A recommended club with the values it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedClub {
    #[serde(flatten)]
    pub club: Club,
    #[serde(rename = "tagOverlap")]
    pub tag_overlap: usize,
    #[serde(rename = "followerCount")]
    pub follower_count: u64,
    pub score: f64,
}

/// How a recommendation list was ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStrategy {
    /// No usable interests: most followed clubs first
    Popularity,
    /// Tag overlap plus a popularity term
    Interests,
}

/// Event feed views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedView {
    #[default]
    #[serde(rename = "forYou", alias = "for_you")]
    ForYou,
    #[serde(rename = "following")]
    Following,
}

/// Kind of account behind an authenticated uid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Student,
    Club,
}

/// Deserializers that substitute the empty value for missing or
/// wrongly-shaped document fields instead of failing the whole record.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(!matches!(Value::deserialize(deserializer)?, Value::Bool(false)))
    }
}
