use crate::domain::ParticipantRecord;
use serde::Deserialize;

/// Published leaderboard document. Only the ranked list is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardDocument {
    pub community_mindshare: CommunityMindshare,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommunityMindshare {
    pub top_1000_yappers: Vec<ParticipantRecord>,
}
