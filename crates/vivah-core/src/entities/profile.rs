//! Profile data read from the external profile store
//!
//! The pipeline never edits these; it only copies display fields into
//! notification payloads and redacts contact data through the access gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RecordId, UserId};

/// Fields shown next to a notification or match entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub user_id: UserId,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub profession: Option<String>,
}

impl DisplayInfo {
    /// Display info carrying only the id, used when the profile store has nothing
    pub fn bare(user_id: UserId) -> Self {
        Self {
            user_id,
            name: None,
            photo_url: None,
            age: None,
            location: None,
            profession: None,
        }
    }
}

/// Always-visible profile fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileBasics {
    pub name: String,
    pub age: Option<i32>,
    pub photos: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profession: Option<String>,
}

/// Contact fields, gated by plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Profile as held by the profile store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub basics: ProfileBasics,
    pub contact: ContactDetails,
}

impl Profile {
    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            user_id: self.user_id.clone(),
            name: Some(self.basics.name.clone()),
            photo_url: self.basics.photos.first().cloned(),
            age: self.basics.age,
            location: self.basics.location.clone(),
            profession: self.basics.profession.clone(),
        }
    }
}

/// One entry of a user's match list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: RecordId,
    pub other: DisplayInfo,
    pub matched_at: DateTime<Utc>,
}

/// Unredacted record handed to the access gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub basics: ProfileBasics,
    pub contact: ContactDetails,
    pub matches: Vec<MatchSummary>,
}

impl ProfileRecord {
    pub fn new(profile: Profile, matches: Vec<MatchSummary>) -> Self {
        Self {
            user_id: profile.user_id,
            basics: profile.basics,
            contact: profile.contact,
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_info_uses_first_photo() {
        let profile = Profile {
            user_id: UserId::new("u1"),
            basics: ProfileBasics {
                name: "Asha".to_string(),
                age: Some(29),
                photos: vec!["p1.jpg".to_string(), "p2.jpg".to_string()],
                bio: None,
                location: Some("Pune".to_string()),
                profession: Some("Architect".to_string()),
            },
            contact: ContactDetails::default(),
        };

        let info = profile.display_info();
        assert_eq!(info.name.as_deref(), Some("Asha"));
        assert_eq!(info.photo_url.as_deref(), Some("p1.jpg"));
        assert_eq!(info.age, Some(29));
    }

    #[test]
    fn test_bare_display_info() {
        let info = DisplayInfo::bare(UserId::new("u9"));
        assert_eq!(info.user_id.as_str(), "u9");
        assert!(info.name.is_none());
    }
}
