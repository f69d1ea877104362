use crate::config::Settings;
use crate::domain::{ParticipantRecord, TimeWindow};
use crate::ingest::{parse_document, resource_name};
use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch(&self, window: TimeWindow) -> Result<Vec<ParticipantRecord>>;
}

/// Fetches snapshot documents from a static file host. No retries: a failed
/// window stays absent for the session.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    http: reqwest::Client,
    base_url: Url,
    collection: String,
}

impl HttpSnapshotSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_leaderboard_base_url()?;
        Self::new(
            base_url,
            settings.collection(),
            Duration::from_secs(settings.timeout_secs()),
        )
    }

    pub fn new(base_url: &str, collection: &str, timeout: Duration) -> Result<Self> {
        // A trailing slash keeps the last path segment when joining.
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&base).with_context(|| format!("invalid leaderboard base url: {base_url}"))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build leaderboard http client")?;

        Ok(Self {
            http,
            base_url,
            collection: collection.to_string(),
        })
    }

    pub fn url(&self, window: TimeWindow) -> Result<Url> {
        let name = resource_name(&self.collection, window);
        self.base_url
            .join(&name)
            .with_context(|| format!("failed to build url for {name}"))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSnapshotSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, window: TimeWindow) -> Result<Vec<ParticipantRecord>> {
        let url = self.url(window)?;

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("leaderboard request failed: {url}"))?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("leaderboard HTTP {status}: {url}");
        }

        let bytes = res
            .bytes()
            .await
            .with_context(|| format!("failed to read leaderboard response: {url}"))?;
        parse_document(&bytes).with_context(|| format!("failed to parse {url}"))
    }
}
