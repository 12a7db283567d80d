//! Application configuration loaded from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port. Port 0 requests an ephemeral port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the greeting as JSON instead of plain text.
    #[serde(default)]
    pub greeting_json: bool,

    // === Build Stamping ===
    /// Optional path to a build-info properties file.
    #[serde(default)]
    pub build_info_path: Option<PathBuf>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Address the listener binds, on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_port(), 8080);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn bind_addr_uses_configured_port() {
        let config = Config {
            port: 8081,
            greeting_json: false,
            build_info_path: None,
            rust_log: default_log_level(),
            verbose: false,
        };

        assert_eq!(config.bind_addr().port(), 8081);
        assert!(config.bind_addr().ip().is_unspecified());
    }
}
