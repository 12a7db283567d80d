//! HTTP status service entry point.

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use statusd::api::{create_router, AppState};
use statusd::buildinfo::BuildInfo;
use statusd::config::Config;
use statusd::error::ServiceError;
use statusd::server;
use statusd::utils::shutdown_signal;

/// Minimal HTTP status service.
#[derive(Parser, Debug)]
#[command(name = "statusd")]
#[command(about = "HTTP status service with health, readiness, and build-info endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides the PORT environment variable).
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the status service (default).
    Run {
        /// HTTP server port (overrides the PORT environment variable).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("statusd=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Run { port }) => cmd_run(port.or(args.port)).await,
        None => cmd_run(args.port).await,
    }
}

/// Run the service until a shutdown signal arrives.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::load().map_err(ServiceError::Config)?;
    if let Some(port) = port_override {
        config.port = port;
    }

    // Build stamping is an external collaborator; a missing or unreadable
    // file must not keep the service from starting.
    let build_info = match &config.build_info_path {
        Some(path) => match BuildInfo::from_path(path) {
            Ok(build) => Some(build),
            Err(e) => {
                warn!("build info unavailable: {e}");
                None
            }
        },
        None => None,
    };

    let state = AppState::new(config.greeting_json, build_info);
    let app = create_router(state.clone());

    let server = server::start(config.bind_addr(), app).await?;

    if state.mark_ready() {
        info!(
            startup_invocations = state.startup_invocations(),
            "service ready on {}",
            server.local_addr()
        );
    }

    shutdown_signal().await;
    info!("shutdown signal received, draining in-flight requests");
    server.shutdown().await?;
    info!("listener closed");

    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    let config = Config::load().map_err(ServiceError::Config)?;

    println!("Configuration OK");
    println!("  port:            {}", config.port);
    println!("  greeting_json:   {}", config.greeting_json);
    println!("  rust_log:        {}", config.rust_log);
    println!("  verbose:         {}", config.verbose);

    match &config.build_info_path {
        Some(path) => {
            let build = BuildInfo::from_path(path)?;
            println!("  build_info_path: {}", path.display());
            println!(
                "  build version:   {}",
                build.version.as_deref().unwrap_or("(not stamped)")
            );
        }
        None => println!("  build_info_path: (not set)"),
    }

    Ok(())
}
