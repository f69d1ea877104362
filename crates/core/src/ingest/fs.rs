use crate::domain::{ParticipantRecord, TimeWindow};
use crate::ingest::{parse_document, provider::SnapshotSource, resource_name};
use anyhow::Context;
use std::path::PathBuf;

/// Reads snapshot documents from a local directory.
#[derive(Debug, Clone)]
pub struct FsSnapshotSource {
    dir: PathBuf,
    collection: String,
}

impl FsSnapshotSource {
    pub fn new(dir: impl Into<PathBuf>, collection: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            collection: collection.into(),
        }
    }

    fn path(&self, window: TimeWindow) -> PathBuf {
        self.dir.join(resource_name(&self.collection, window))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for FsSnapshotSource {
    fn source_name(&self) -> &'static str {
        "filesystem"
    }

    async fn fetch(&self, window: TimeWindow) -> anyhow::Result<Vec<ParticipantRecord>> {
        let path = self.path(window);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_document(&bytes).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn reads_document_by_resource_name() {
        let dir = tempfile::tempdir().unwrap();
        let doc = json!({
            "community_mindshare": {
                "top_1000_yappers": [
                    {"username": "TheGreatOla", "user_id": "1", "rank": 5, "mindshare": 0.021}
                ]
            }
        });
        std::fs::write(dir.path().join("community-mindshare 30D.json"), doc.to_string()).unwrap();

        let source = FsSnapshotSource::new(dir.path(), "community-mindshare");
        let records = source.fetch(TimeWindow::ThirtyDay).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rank, 5);

        assert!(source.fetch(TimeWindow::SevenDay).await.is_err());
    }
}
