//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::buildinfo::BuildInfo;
use crate::error::ApiError;

/// The fixed greeting payload.
pub const GREETING: &str = "Hello, World!";

/// Application state shared with handlers.
///
/// Explicitly owned and passed into the router at construction time; the
/// only mutable pieces are the readiness latch and the startup counter,
/// both atomic.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Process start time, for uptime reporting.
    started_at: Instant,
    /// Readiness latch, flipped once by [`AppState::mark_ready`].
    ready: Arc<AtomicBool>,
    /// Counts readiness transitions; read-only to all routes.
    startup_invocations: Arc<AtomicU64>,
    /// Serve the greeting as JSON instead of plain text.
    greeting_json: bool,
    /// Build metadata loaded at startup, if configured.
    build_info: Arc<Option<BuildInfo>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(greeting_json: bool, build_info: Option<BuildInfo>) -> Self {
        Self {
            started_at: Instant::now(),
            ready: Arc::new(AtomicBool::new(false)),
            startup_invocations: Arc::new(AtomicU64::new(0)),
            greeting_json,
            build_info: Arc::new(build_info),
        }
    }

    /// Signal that the service is ready to serve traffic.
    ///
    /// The startup counter is incremented on the first call only; repeated
    /// calls are no-ops. Returns whether this call made the transition.
    pub fn mark_ready(&self) -> bool {
        let transitioned = self
            .ready
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if transitioned {
            self.startup_invocations.fetch_add(1, Ordering::SeqCst);
        }
        transitioned
    }

    /// Check if the service has signalled readiness.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Current value of the startup counter.
    pub fn startup_invocations(&self) -> u64 {
        self.startup_invocations.load(Ordering::SeqCst)
    }

    /// Whole seconds since the state was created.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Greeting response, when JSON output is configured.
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    /// The greeting text.
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Instant the request was handled, RFC3339.
    pub timestamp: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the service is ready.
    pub ready: bool,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// "ok" once ready, "starting" before.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Whole seconds since process start.
    pub uptime_seconds: u64,
    /// Startup counter value.
    pub startup_invocations: u64,
}

/// Greeting handler - plain text by default, JSON when configured.
pub async fn hello(State(state): State<AppState>) -> Response {
    if state.greeting_json {
        Json(GreetingResponse { message: GREETING }).into_response()
    } else {
        GREETING.into_response()
    }
}

/// Health check handler - always 200, timestamp computed per request.
pub async fn healthz() -> Result<Json<HealthResponse>, ApiError> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Handler(format!("timestamp formatting: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok",
        timestamp,
    }))
}

/// Readiness check handler - no dependency checks are modeled.
pub async fn readyz() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}

/// Status handler - uptime and the startup counter.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = if state.is_ready() { "ok" } else { "starting" };

    Json(StatusResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        startup_invocations: state.startup_invocations(),
    })
}

/// Build-info handler - `{"build":{}}` when no file is configured.
pub async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    match state.build_info.as_ref() {
        Some(build) => Json(serde_json::json!({ "build": build })),
        None => Json(serde_json::json!({ "build": {} })),
    }
}

/// Fallback for any (method, path) pair outside the route table.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_ready_increments_counter_exactly_once() {
        let state = AppState::new(false, None);
        assert!(!state.is_ready());
        assert_eq!(state.startup_invocations(), 0);

        assert!(state.mark_ready());
        assert!(state.is_ready());
        assert_eq!(state.startup_invocations(), 1);

        // Repeated signals are no-ops.
        assert!(!state.mark_ready());
        assert!(!state.mark_ready());
        assert_eq!(state.startup_invocations(), 1);
    }

    #[test]
    fn counter_is_shared_across_clones() {
        let state = AppState::new(false, None);
        let clone = state.clone();

        assert!(clone.mark_ready());
        assert_eq!(state.startup_invocations(), 1);
        assert!(state.is_ready());
    }

    #[test]
    fn health_response_serializes_in_table_order() {
        let body = serde_json::to_string(&HealthResponse {
            status: "ok",
            timestamp: "2024-11-02T09:15:00Z".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            r#"{"status":"ok","timestamp":"2024-11-02T09:15:00Z"}"#
        );
    }
}
