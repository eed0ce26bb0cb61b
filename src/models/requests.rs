use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::FeedView;

/// Query for the recommendations endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query for the event feed endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub view: FeedView,
}

/// Query for browsing the club catalog
///
/// `tags` is a comma-separated list of selected tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseClubsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl BrowseClubsQuery {
    pub fn selected_tags(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Request to follow or unfollow a club
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FollowRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(alias = "club_name", rename = "clubName")]
    pub club_name: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Dashboard event filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFilter {
    #[default]
    Active,
    Archived,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub filter: EventFilter,
}

/// Which sign-up flow an email is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    Student,
    Club,
}

/// Request to check sign-up eligibility for an email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationCheckRequest {
    #[validate(email)]
    pub email: String,
    pub kind: RegistrationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_tags_split() {
        let query = BrowseClubsQuery {
            search: None,
            tags: Some("art, music,,games ".to_string()),
        };
        assert_eq!(query.selected_tags(), vec!["art", "music", "games"]);
        assert!(BrowseClubsQuery::default().selected_tags().is_empty());
    }

    #[test]
    fn test_follow_request_validation() {
        let empty = FollowRequest { club_name: String::new() };
        assert!(empty.validate().is_err());

        let blank = FollowRequest { club_name: " \t ".to_string() };
        assert!(blank.validate().is_err());

        let ok = FollowRequest { club_name: "Chess".to_string() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_registration_request_validation() {
        let bad = RegistrationCheckRequest {
            email: "not-an-email".to_string(),
            kind: RegistrationKind::Student,
        };
        assert!(bad.validate().is_err());
    }
}
