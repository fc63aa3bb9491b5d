pub mod config;
pub mod cors;
pub mod params;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::{
    CalcSettings, DEFAULT_DEMOLITION_YEARS, DEFAULT_SEED, DEFAULT_TRIALS, calculate, recalculate,
};

pub use config::{CorsConfig, ServerConfig};
pub use params::ParamError;

#[derive(Parser, Debug)]
#[command(
    name = "holdings",
    about = "Projects stock and fund holdings: growth, tax, Monte Carlo risk, dividends and drawdown"
)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculation API over HTTP
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Run one calculation and print the JSON report
    Calc {
        /// Holding as NAME=yield%,dividend%,years,reserved,initial,domestic,volatility%,sheltered
        #[arg(long = "asset", required = true)]
        assets: Vec<String>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SettingsArgs {
    /// Seed of the per-request Monte Carlo generator
    #[arg(long, env = "SIMULATION_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Monte Carlo trials per holding
    #[arg(long, env = "SIMULATION_TRIALS", default_value_t = DEFAULT_TRIALS)]
    trials: usize,
    /// Drawdown length in years for the full calculation
    #[arg(long, env = "DEMOLITION_YEARS", default_value_t = DEFAULT_DEMOLITION_YEARS)]
    duration: u32,
}

impl SettingsArgs {
    fn into_settings(self) -> Result<CalcSettings, String> {
        if self.trials == 0 {
            return Err("--trials must be > 0".to_string());
        }
        if self.duration == 0 || self.duration > params::MAX_DURATION_YEARS {
            return Err(format!(
                "--duration must be between 1 and {}",
                params::MAX_DURATION_YEARS
            ));
        }
        Ok(CalcSettings {
            seed: self.seed,
            trials: self.trials,
            demolition_years: self.duration,
        })
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Serve {
            host,
            port,
            settings,
        } => {
            let config = ServerConfig {
                settings: settings.into_settings().map_err(RunError::Config)?,
                cors: CorsConfig::from_env(),
            };
            run_http_server(&host, port, config).await?;
        }
        Command::Calc { assets, settings } => {
            let settings = settings.into_settings().map_err(RunError::Config)?;
            let params = assets
                .iter()
                .map(|arg| params::parse_asset_arg(arg))
                .collect::<Result<Vec<_>, _>>()?;
            let report = calculate(params, &settings).map_err(ParamError::from)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

pub fn router(config: ServerConfig) -> Router {
    let config = Arc::new(config);
    Router::new()
        .route("/calculation", get(calculation_handler))
        .route("/re-calculation", get(re_calculation_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(
            config.clone(),
            cors::cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

pub async fn run_http_server(host: &str, port: u16, config: ServerConfig) -> std::io::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    tracing::info!(
        seed = config.settings.seed,
        trials = config.settings.trials,
        origins = ?config.cors.allowed_origins,
        "starting calculation API"
    );
    let app = router(config);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("holdings HTTP API listening on http://{addr}");
    tracing::info!("  GET /calculation");
    tracing::info!("  GET /re-calculation");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculation_handler(
    State(config): State<Arc<ServerConfig>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let query = params::first_values(query);
    tracing::info!(params = ?query, "calculation params");

    let result = params::parse_assets(&query)
        .and_then(|assets| calculate(assets, &config.settings).map_err(ParamError::from));
    match result {
        Ok(report) => {
            tracing::info!("calculation success");
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            tracing::error!(error = %err, params = ?query, "calculation error");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

async fn re_calculation_handler(Query(query): Query<Vec<(String, String)>>) -> Response {
    let query = params::first_values(query);
    tracing::info!(params = ?query, "re-calculation params");

    let result = params::split_duration(&query).and_then(|(assets, duration)| {
        recalculate(assets, duration).map_err(ParamError::from)
    });
    match result {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => {
            tracing::error!(error = %err, params = ?query, "re-calculation error");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
