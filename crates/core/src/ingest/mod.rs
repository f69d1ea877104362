pub mod fs;
pub mod provider;
pub mod types;

use crate::config::Settings;
use crate::domain::{ParticipantRecord, TimeWindow};
use anyhow::Context;
use std::sync::Arc;

pub use fs::FsSnapshotSource;
pub use provider::{HttpSnapshotSource, SnapshotSource};

/// `"<collection> <key>.json"`, e.g. `community-mindshare 90d.json`.
pub fn resource_name(collection: &str, window: TimeWindow) -> String {
    format!("{collection} {}.json", window.retrieval_key())
}

pub fn parse_document(bytes: &[u8]) -> anyhow::Result<Vec<ParticipantRecord>> {
    let doc = serde_json::from_slice::<types::LeaderboardDocument>(bytes)
        .context("leaderboard document does not match community_mindshare.top_1000_yappers shape")?;
    Ok(doc.community_mindshare.top_1000_yappers)
}

/// HTTP when a base URL is configured, the local data directory otherwise.
pub fn source_from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn SnapshotSource>> {
    if settings.leaderboard_base_url.is_some() {
        let source = HttpSnapshotSource::from_settings(settings)?;
        return Ok(Arc::new(source));
    }
    Ok(Arc::new(FsSnapshotSource::new(
        settings.data_dir(),
        settings.collection(),
    )))
}
