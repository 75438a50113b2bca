//! Algo Arena service binary
//!
//! Parses the command line, resolves configuration and serves the HTTP API
//! until SIGINT or SIGTERM.

use algo_arena::config::{validate_config, AppConfig};
use algo_arena::service::{ApiServer, AppState, HealthCheck};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(30);

/// Elo-rated practice service for algorithm problems
#[derive(Parser, Debug)]
#[command(
    name = "algo-arena",
    version,
    about = "Elo-rated practice service for algorithm problems",
    long_about = "Algo Arena rates users and practice problems against each other with the Elo \
                 system, judges submitted solutions, and reports readiness and strongest-topic \
                 statistics over HTTP."
)]
struct Args {
    /// TOML file read before environment overrides
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Port the API listens on
    #[arg(long, value_name = "PORT")]
    http_port: Option<u16>,

    /// Elo k-factor applied to submissions and default updates
    #[arg(long, value_name = "K")]
    k_factor: Option<f64>,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    debug: bool,

    /// Resolve and validate configuration, then exit
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    /// Load the base configuration and layer command-line values on top
    fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_env()?,
        };

        if let Some(level) = &self.log_level {
            config.service.log_level = level.clone();
        }
        if self.debug {
            config.service.log_level = "debug".to_string();
        }
        if let Some(port) = self.http_port {
            config.service.http_port = port;
        }
        if let Some(k_factor) = self.k_factor {
            config.rating.k_factor = k_factor;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn log_configuration(config: &AppConfig) {
    info!(
        service = %config.service.name,
        version = algo_arena::VERSION,
        address = %config.http_addr(),
        log_level = %config.service.log_level,
        "Algo Arena configuration"
    );
    info!(
        k_factor = config.rating.k_factor,
        user_rating = config.rating.default_user_rating,
        problem_rating = config.rating.default_problem_rating,
        quiz_pass_threshold = config.rating.quiz_pass_threshold,
        "Rating settings"
    );
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Cannot install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
    }
}

/// Log a health summary on a fixed interval
async fn report_health(state: Arc<AppState>) {
    let mut ticker = tokio::time::interval(HEALTH_LOG_INTERVAL);

    loop {
        ticker.tick().await;

        match HealthCheck::check(&state).await {
            Ok(report) => info!(
                status = %report.status,
                rated_users = report.stats.rated_users,
                rated_problems = report.stats.rated_problems,
                attempts = report.stats.attempts_recorded,
                uptime = %report.stats.uptime_info,
                "Health report"
            ),
            Err(e) => warn!("Health report failed: {}", e),
        }
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone())?);
    let server = Arc::new(ApiServer::new(state.clone()));

    let mut serving = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };
    let reporter = tokio::spawn(report_health(state));

    let finished_early = tokio::select! {
        _ = shutdown_signal() => None,
        result = &mut serving => Some(result),
    };
    reporter.abort();

    if let Some(result) = finished_early {
        // The server stopped without being asked to
        return result?;
    }

    server.stop();
    match tokio::time::timeout(config.shutdown_timeout(), serving).await {
        Ok(joined) => joined??,
        Err(_) => warn!(
            "Server did not drain within {:?}, exiting anyway",
            config.shutdown_timeout()
        ),
    }

    info!("Algo Arena stopped");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    log_configuration(&config);

    if args.dry_run {
        info!("Configuration is valid, exiting (dry run)");
        return;
    }

    if let Err(e) = run(config).await {
        error!("Algo Arena failed: {:#}", e);
        std::process::exit(1);
    }
}
