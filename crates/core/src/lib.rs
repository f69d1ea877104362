pub mod domain;
pub mod ingest;
pub mod lookup;
pub mod storage;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_DATA_DIR: &str = "Leaderboard Data";
    pub const DEFAULT_COLLECTION: &str = "community-mindshare";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub leaderboard_base_url: Option<String>,
        pub leaderboard_data_dir: Option<String>,
        pub leaderboard_collection: Option<String>,
        pub leaderboard_timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let leaderboard_timeout_secs = match non_empty_var("LEADERBOARD_TIMEOUT_SECS") {
                Some(s) => Some(
                    s.parse::<u64>()
                        .with_context(|| format!("LEADERBOARD_TIMEOUT_SECS is not a number: {s}"))?,
                ),
                None => None,
            };

            Ok(Self {
                leaderboard_base_url: non_empty_var("LEADERBOARD_BASE_URL"),
                leaderboard_data_dir: non_empty_var("LEADERBOARD_DATA_DIR"),
                leaderboard_collection: non_empty_var("LEADERBOARD_COLLECTION"),
                leaderboard_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_leaderboard_base_url(&self) -> anyhow::Result<&str> {
            self.leaderboard_base_url
                .as_deref()
                .context("LEADERBOARD_BASE_URL is required")
        }

        pub fn data_dir(&self) -> &str {
            self.leaderboard_data_dir
                .as_deref()
                .unwrap_or(DEFAULT_DATA_DIR)
        }

        pub fn collection(&self) -> &str {
            self.leaderboard_collection
                .as_deref()
                .unwrap_or(DEFAULT_COLLECTION)
        }

        pub fn timeout_secs(&self) -> u64 {
            self.leaderboard_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}
