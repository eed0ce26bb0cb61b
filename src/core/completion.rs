use crate::models::{Club, StudentProfile};

/// Minimum number of words in a complete club description
pub const MIN_DESCRIPTION_WORDS: usize = 10;

/// Outcome of a profile completeness check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completeness {
    /// Requirements that are not met, empty when complete
    pub missing: Vec<String>,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    fn require(&mut self, ok: bool, requirement: &str) {
        if !ok {
            self.missing.push(requirement.to_string());
        }
    }
}

#[inline]
fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A student profile needs a name and a major
pub fn student_completeness(profile: &StudentProfile) -> Completeness {
    let mut result = Completeness::default();
    result.require(is_filled(&profile.name), "name");
    result.require(is_filled(&profile.major), "major");
    result
}

/// A club profile needs its contact fields, a real description, an image and a tag
pub fn club_completeness(club: &Club) -> Completeness {
    let mut result = Completeness::default();
    result.require(is_filled(&club.name), "name");
    result.require(is_filled(&club.elevator_pitch), "elevatorPitch");
    result.require(is_filled(&club.description), "description");
    result.require(is_filled(&club.email), "email");
    result.require(is_filled(&club.instagram), "instagram");
    result.require(
        word_count(&club.description) >= MIN_DESCRIPTION_WORDS,
        "description must have at least 10 words",
    );
    result.require(!club.image_urls.is_empty(), "at least one image");
    result.require(!club.tags.is_empty(), "at least one tag");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_club() -> Club {
        Club {
            id: "club1".to_string(),
            name: "Chess".to_string(),
            elevator_pitch: "Play chess with us".to_string(),
            description: "We meet every week to play rapid and blitz games in the library".to_string(),
            email: "chess@ucsc.edu".to_string(),
            instagram: "@ucscchess".to_string(),
            image_urls: vec!["https://img.example/1.jpg".to_string()],
            tags: vec!["strategy".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_student_completeness() {
        let mut student = StudentProfile {
            name: "Sam".to_string(),
            major: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(student_completeness(&student).missing, vec!["major"]);

        student.major = "Physics".to_string();
        assert!(student_completeness(&student).is_complete());
    }

    #[test]
    fn test_complete_club() {
        assert!(club_completeness(&complete_club()).is_complete());
    }

    #[test]
    fn test_short_description_is_incomplete() {
        let mut club = complete_club();
        club.description = "Nine words is not quite enough for a club".to_string();
        assert_eq!(word_count(&club.description), 9);

        let result = club_completeness(&club);
        assert_eq!(result.missing, vec!["description must have at least 10 words"]);
    }

    #[test]
    fn test_missing_image_and_tag() {
        let mut club = complete_club();
        club.image_urls.clear();
        club.tags.clear();

        let result = club_completeness(&club);
        assert_eq!(result.missing, vec!["at least one image", "at least one tag"]);
    }
}
