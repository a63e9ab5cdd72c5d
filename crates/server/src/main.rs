use std::{io, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use shared::{
    protocol::{
        health_route, process_route, status_route, HealthResponse, ProcessResponse,
        StatusSummary,
    },
    status::StatusTracker,
};
use tokio::sync::Mutex;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info, warn};

mod api;
mod config;
mod status_log;

use config::load_settings;
use status_log::StatusLog;

type ApiFailure = (StatusCode, Json<ProcessResponse>);

struct AppState {
    status: Mutex<StatusTracker>,
    log: StatusLog,
    clock: fn() -> NaiveDateTime,
}

impl AppState {
    fn new(log: StatusLog, clock: fn() -> NaiveDateTime) -> Self {
        Self {
            status: Mutex::new(StatusTracker::new(clock())),
            log,
            clock,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let state = AppState::new(StatusLog::new(settings.status_log_path.clone()), local_now);
    info!(path = %state.log.path().display(), "status log");
    let app = build_router(Arc::new(state), settings.body_limit_bytes);

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, body_limit_bytes = settings.body_limit_bytes, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route(health_route(), get(health))
        .route(process_route(), post(process))
        .route(status_route(), get(status_summary).post(change_status))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn process(body: Bytes) -> Result<Json<ProcessResponse>, ApiFailure> {
    let value = api::value_from_body(&body).map_err(|error| {
        warn!(%error, "rejected processing request");
        (StatusCode::BAD_REQUEST, Json(ProcessResponse::from(error)))
    })?;

    let result = api::double_value(value);
    debug!(value, result, "processed value");
    Ok(Json(ProcessResponse::success(result)))
}

async fn status_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusSummary>, ApiFailure> {
    let tracker = state.status.lock().await;
    let logged = state.log.entries().await.map_err(log_failure)?;
    Ok(Json(tracker.summarize(&logged, (state.clock)())))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<StatusSummary>, ApiFailure> {
    let next = api::status_from_body(&body).map_err(|error| {
        warn!(%error, "rejected status change");
        (StatusCode::BAD_REQUEST, Json(ProcessResponse::from(error)))
    })?;

    let mut tracker = state.status.lock().await;
    let now = (state.clock)();
    // The tracker only moves on once the closed interval is on disk.
    let mut updated = tracker.clone();
    let closed = updated.change_status(next, now);
    state.log.append(&closed).await.map_err(log_failure)?;
    *tracker = updated;
    info!(from = %closed.status, to = %next, seconds = closed.duration_secs(), "status changed");

    let logged = state.log.entries().await.map_err(log_failure)?;
    Ok(Json(tracker.summarize(&logged, now)))
}

fn log_failure(err: io::Error) -> ApiFailure {
    error!(error = %err, "status log unavailable");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ProcessResponse::failure(format!(
            "status log unavailable: {err}"
        ))),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
