//! Follow and unfollow planning over a student's joined-club list.
//!
//! The joined list is the student-side half of the follow relationship; the
//! club's follower list is updated separately by the membership service.

/// Joined list after following `club_name`, or `None` if already followed
pub fn plan_follow(joined: &[String], club_name: &str) -> Option<Vec<String>> {
    if joined.iter().any(|name| name == club_name) {
        return None;
    }

    let mut updated = joined.to_vec();
    updated.push(club_name.to_string());
    Some(updated)
}

/// Joined list after unfollowing `club_name`, or `None` if not followed
pub fn plan_unfollow(joined: &[String], club_name: &str) -> Option<Vec<String>> {
    if !joined.iter().any(|name| name == club_name) {
        return None;
    }

    Some(
        joined
            .iter()
            .filter(|name| name.as_str() != club_name)
            .cloned()
            .collect(),
    )
}
