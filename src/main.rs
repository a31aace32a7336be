//! Automobile Sales Dashboard - web server entry point.

use anyhow::Context;
use autosales_dashboard::{
    build_router, AppState, DashboardConfig, DataLoader, DataSource, ServerConfig,
};
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn main() -> ExitCode {
    let settings = ServerConfig::from_env();
    init_tracing(settings.log_json);

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "dashboard stopped");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: ServerConfig) -> anyhow::Result<()> {
    // Loaded before the runtime starts: the download client is blocking.
    let source = DataSource::parse(&settings.data_source);
    info!(source = %source, "loading sales dataset");
    let table = DataLoader::new()
        .load(&source)
        .with_context(|| format!("failed to load sales data from {source}"))?;
    info!(
        rows = table.row_count(),
        years = table.years().len(),
        "sales dataset loaded"
    );

    let state = AppState::new(table, DashboardConfig::default());
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(serve(state, &settings.bind_addr))
}

async fn serve(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %listener.local_addr()?, "dashboard listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("dashboard shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
