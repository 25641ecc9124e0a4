//! Follow relation of a profile page.

use serde::{Deserialize, Serialize};

/// Reply of `GET /profile/{username}/follow`.
///
/// `followers` and `following` are lists of user ids. Anonymous viewers (and a
/// user looking at their own profile) get `user_logged_in = false` and no
/// `is_following` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowSummary {
    #[serde(default)]
    pub followers: Vec<u64>,
    #[serde(default)]
    pub following: Vec<u64>,
    #[serde(default)]
    pub is_following: bool,
    #[serde(default)]
    pub user_logged_in: bool,
}

/// Reply of `PUT /profile/{username}/follow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowToggle {
    pub is_following: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_summary_has_no_follow_state() {
        let summary: FollowSummary =
            serde_json::from_str(r#"{"following":[2],"followers":[3,4],"user_logged_in":false}"#)
                .unwrap();
        assert_eq!(summary.followers.len(), 2);
        assert!(!summary.is_following);
        assert!(!summary.user_logged_in);
    }
}
