use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yapcheck_core::domain::TimeWindow;
use yapcheck_core::ingest::SnapshotSource;
use yapcheck_core::lookup::{LookupEngine, LookupOutcome};
use yapcheck_core::storage::SnapshotStore;

mod render;

#[derive(Debug, Parser)]
#[command(name = "yapcheck", about = "Look up a handle's mindshare rank per time window")]
struct Args {
    /// Handle to look up, prefixed with `@` (e.g. @thegreatola).
    query: String,

    /// Directory holding the leaderboard snapshot files.
    #[arg(long)]
    data_dir: Option<String>,

    /// Fetch snapshots over HTTP from this base URL instead of a directory.
    #[arg(long, conflicts_with = "data_dir")]
    base_url: Option<String>,

    /// Snapshot collection name used in resource names.
    #[arg(long)]
    collection: Option<String>,

    /// Only print these windows (7D, 30D, 3M/90d, 6M/180d, 12M/365d).
    #[arg(long = "window")]
    windows: Vec<TimeWindow>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let mut settings = yapcheck_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Some(collection) = &args.collection {
        settings.leaderboard_collection = Some(collection.clone());
    }
    if let Some(base_url) = &args.base_url {
        settings.leaderboard_base_url = Some(base_url.clone());
    }
    if let Some(dir) = &args.data_dir {
        settings.leaderboard_base_url = None;
        settings.leaderboard_data_dir = Some(dir.clone());
    }

    let source: Arc<dyn SnapshotSource> =
        match yapcheck_core::ingest::source_from_settings(&settings) {
            Ok(source) => source,
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                return Err(e);
            }
        };

    let store = Arc::new(SnapshotStore::new());
    let report = store.load_all(source.as_ref()).await;
    if report.loaded.is_empty() {
        tracing::warn!(source = source.source_name(), "no leaderboard snapshots available");
    }

    let engine = LookupEngine::new(store);
    match engine.lookup(&args.query) {
        Ok(outcome) => {
            let outcome = filter_windows(outcome, &args.windows);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render::table(&outcome));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if args.json {
                let body = serde_json::json!({"error": err.title(), "hint": err.hint()});
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render::invalid(&err));
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn filter_windows(mut outcome: LookupOutcome, windows: &[TimeWindow]) -> LookupOutcome {
    if windows.is_empty() {
        return outcome;
    }
    let labels: Vec<&str> = windows.iter().map(|w| w.label()).collect();
    outcome.rows.retain(|r| labels.contains(&r.timeframe));
    outcome
}

fn init_sentry(settings: &yapcheck_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
