use crate::domain::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub username: String,
    /// Opaque secondary key. Missing or null on the wire becomes empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_id: String,
    pub rank: u32,
    pub mindshare: f64,
}

impl ParticipantRecord {
    /// Handle compares case-insensitively, identifier exactly. Empty values never match.
    pub fn matches(&self, handle: &str) -> bool {
        if handle.is_empty() {
            return false;
        }
        self.username.to_lowercase() == handle.to_lowercase()
            || (!self.user_id.is_empty() && self.user_id == handle)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ranked participants for one window, in the order the source published them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub window: TimeWindow,
    pub records: Vec<ParticipantRecord>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(window: TimeWindow, records: Vec<ParticipantRecord>) -> Self {
        Self {
            window,
            records,
            loaded_at: Utc::now(),
        }
    }

    /// First record matching `handle`; input order decides ties.
    pub fn find(&self, handle: &str) -> Option<&ParticipantRecord> {
        self.records.iter().find(|r| r.matches(handle))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(username: &str, user_id: &str, rank: u32) -> ParticipantRecord {
        ParticipantRecord {
            username: username.to_string(),
            user_id: user_id.to_string(),
            rank,
            mindshare: 0.01,
        }
    }

    #[test]
    fn handle_matches_ignoring_case() {
        let r = record("TheGreatOla", "123", 5);
        assert!(r.matches("thegreatola"));
        assert!(r.matches("THEGREATOLA"));
        assert!(!r.matches("thegreat"));
    }

    #[test]
    fn identifier_matches_exactly() {
        let r = record("alice", "AbC123", 1);
        assert!(r.matches("AbC123"));
        assert!(!r.matches("abc123"));
    }

    #[test]
    fn empty_handle_never_matches() {
        let r = record("", "", 1);
        assert!(!r.matches(""));
    }

    #[test]
    fn find_returns_first_in_input_order() {
        let snapshot = Snapshot::new(
            TimeWindow::SevenDay,
            vec![record("bob", "1", 9), record("Bob", "2", 3)],
        );
        assert_eq!(snapshot.find("BOB").map(|r| r.rank), Some(9));
    }

    #[test]
    fn find_falls_back_to_identifier() {
        let snapshot = Snapshot::new(
            TimeWindow::SevenDay,
            vec![record("carol", "999", 2), record("dave", "42", 7)],
        );
        assert_eq!(snapshot.find("42").map(|r| r.username.as_str()), Some("dave"));
    }

    #[test]
    fn deserializes_wire_shape() {
        let v = json!({
            "username": "TheGreatOla",
            "user_id": "1555",
            "rank": 5,
            "mindshare": 0.021,
            "tweet_counts": 40
        });
        let r: ParticipantRecord = serde_json::from_value(v).unwrap();
        assert_eq!(r.username, "TheGreatOla");
        assert_eq!(r.user_id, "1555");
        assert_eq!(r.rank, 5);
    }

    #[test]
    fn missing_or_null_user_id_is_empty() {
        let r: ParticipantRecord =
            serde_json::from_value(json!({"username": "a", "rank": 1, "mindshare": 0.5})).unwrap();
        assert_eq!(r.user_id, "");

        let r: ParticipantRecord = serde_json::from_value(
            json!({"username": "a", "user_id": null, "rank": 1, "mindshare": 0.5}),
        )
        .unwrap();
        assert_eq!(r.user_id, "");
    }

    #[test]
    fn missing_username_is_rejected() {
        let res = serde_json::from_value::<ParticipantRecord>(json!({"rank": 1, "mindshare": 0.5}));
        assert!(res.is_err());
    }
}
