//! Unified error types for the status service.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Unified error type for the status service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The listening socket could not be created.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the service tried to bind.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// Build-info file could not be read or parsed.
    #[error("build info at {path}: {reason}")]
    BuildInfo {
        /// Path of the offending file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server task panicked or was aborted.
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors surfaced by request handlers.
///
/// Both variants recover locally: the process keeps serving.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request matched no registered (method, path) pair.
    #[error("route not found")]
    RouteNotFound,

    /// Unexpected failure while constructing a response.
    #[error("handler error: {0}")]
    Handler(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RouteNotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Handler(reason) => {
                // Log the detail, never send it to the client.
                error!("handler failed: {reason}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
