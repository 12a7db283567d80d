//! HTTP API module for the greeting, probe, and status endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
