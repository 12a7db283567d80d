//! Minimal HTTP status service.
//!
//! Binds a TCP listener on a configured port and answers a small, fixed set
//! of GET routes with deterministic JSON or plain-text bodies:
//!
//! ```text
//! GET /            -> 200 text/plain        Hello, World!
//! GET /api/hello   -> 200 text/plain        Hello, World!
//! GET /healthz     -> 200 application/json  {"status":"ok","timestamp":"<RFC3339>"}
//! GET /readyz      -> 200 application/json  {"ready":true}
//! GET /api/status  -> 200 application/json  uptime and startup counter
//! GET /api/info    -> 200 application/json  stamped build metadata
//! anything else    -> 404, empty body
//! ```
//!
//! Handlers are pure functions of the request; the only shared mutable
//! state is an atomic startup counter incremented once when the service
//! becomes ready.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`buildinfo`]: Build metadata from a properties file
//! - [`api`]: Route table, handlers, and shared state
//! - [`server`]: Listener lifecycle and graceful shutdown
//! - [`utils`]: Utility functions

pub mod api;
pub mod buildinfo;
pub mod config;
pub mod error;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
