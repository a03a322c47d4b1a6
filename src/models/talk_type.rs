use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The known agenda categories.
///
/// On the wire a category is a free string so that entries with categories
/// this build does not know about still flow through; this enum covers the
/// set the default ordering table ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TalkType {
    #[serde(rename = "forum topic")]
    ForumTopic,
    #[serde(rename = "lightning talk")]
    LightningTalk,
    #[serde(rename = "project update")]
    ProjectUpdate,
    #[serde(rename = "announcement")]
    Announcement,
    #[serde(rename = "after meeting slot")]
    AfterMeetingSlot,
}

/// Error returned when a category string is not a known talk type.
#[derive(Debug, Error)]
#[error("Invalid talk type '{0}'. Valid options: forum topic, lightning talk, project update, announcement, after meeting slot")]
pub struct ParseTalkTypeError(String);

impl TalkType {
    pub const ALL: [TalkType; 5] = [
        TalkType::ForumTopic,
        TalkType::LightningTalk,
        TalkType::ProjectUpdate,
        TalkType::Announcement,
        TalkType::AfterMeetingSlot,
    ];

    /// Rank of this category in the default agenda ordering; lower sorts
    /// earlier.
    pub fn default_rank(self) -> u32 {
        match self {
            TalkType::ForumTopic => 1,
            TalkType::LightningTalk => 2,
            TalkType::ProjectUpdate => 3,
            TalkType::Announcement => 4,
            TalkType::AfterMeetingSlot => 5,
        }
    }
}

impl fmt::Display for TalkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TalkType::ForumTopic => write!(f, "forum topic"),
            TalkType::LightningTalk => write!(f, "lightning talk"),
            TalkType::ProjectUpdate => write!(f, "project update"),
            TalkType::Announcement => write!(f, "announcement"),
            TalkType::AfterMeetingSlot => write!(f, "after meeting slot"),
        }
    }
}

impl FromStr for TalkType {
    type Err = ParseTalkTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forum topic" => Ok(TalkType::ForumTopic),
            "lightning talk" => Ok(TalkType::LightningTalk),
            "project update" => Ok(TalkType::ProjectUpdate),
            "announcement" => Ok(TalkType::Announcement),
            "after meeting slot" => Ok(TalkType::AfterMeetingSlot),
            _ => Err(ParseTalkTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talk_type_display() {
        assert_eq!(format!("{}", TalkType::ForumTopic), "forum topic");
        assert_eq!(format!("{}", TalkType::LightningTalk), "lightning talk");
        assert_eq!(format!("{}", TalkType::ProjectUpdate), "project update");
        assert_eq!(format!("{}", TalkType::Announcement), "announcement");
        assert_eq!(
            format!("{}", TalkType::AfterMeetingSlot),
            "after meeting slot"
        );
    }

    #[test]
    fn test_talk_type_from_str() {
        assert_eq!(
            TalkType::from_str("forum topic").unwrap(),
            TalkType::ForumTopic
        );
        assert_eq!(
            TalkType::from_str("Lightning Talk").unwrap(),
            TalkType::LightningTalk
        );
        assert_eq!(
            TalkType::from_str("ANNOUNCEMENT").unwrap(),
            TalkType::Announcement
        );
    }

    #[test]
    fn test_talk_type_from_str_invalid() {
        assert!(TalkType::from_str("keynote").is_err());
        assert!(TalkType::from_str("").is_err());
    }

    #[test]
    fn test_talk_type_json_matches_wire_category() {
        let json = serde_json::to_string(&TalkType::ForumTopic).unwrap();
        assert_eq!(json, "\"forum topic\"");

        let parsed: TalkType = serde_json::from_str("\"after meeting slot\"").unwrap();
        assert_eq!(parsed, TalkType::AfterMeetingSlot);
    }
}
