use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yapcheck_core::lookup::{LookupEngine, LookupError};
use yapcheck_core::storage::{SnapshotStore, WindowStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = yapcheck_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let source = match yapcheck_core::ingest::source_from_settings(&settings) {
        Ok(source) => source,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "invalid leaderboard source configuration");
            return Err(e);
        }
    };

    let store = Arc::new(SnapshotStore::new());

    // Serve immediately; windows appear as their loads complete.
    {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store.load_all(source.as_ref()).await;
        });
    }

    let state = AppState {
        engine: LookupEngine::new(store),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/lookup", get(lookup))
        .route("/windows", get(windows))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    engine: LookupEngine,
}

#[derive(Debug, Deserialize)]
struct LookupParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
struct ApiLookupError {
    error: &'static str,
    hint: &'static str,
}

struct InvalidQuery(LookupError);

impl IntoResponse for InvalidQuery {
    fn into_response(self) -> Response {
        let body = ApiLookupError {
            error: self.0.title(),
            hint: self.0.hint(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<yapcheck_core::lookup::LookupOutcome>, InvalidQuery> {
    state
        .engine
        .lookup(&params.q)
        .map(Json)
        .map_err(InvalidQuery)
}

async fn windows(State(state): State<AppState>) -> Json<Vec<WindowStatus>> {
    Json(state.engine.store().status())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
