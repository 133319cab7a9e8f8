mod cli;

use std::net::SocketAddr;
use std::sync::Arc;

use astrologer_apod::ApodClient;
use astrologer_archive::ArchiveService;
use astrologer_core::Repository;
use astrologer_gateway::{App, AppState};
use astrologer_storage::{InMemoryRepository, PostgresRepository};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogFormat, StorageBackendArg};

const DEFAULT_LOG_FILTER: &str = "gateway=info,astrologer=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        apod_base_url = %config.apod_base_url,
        apod_timeout_secs = config.apod_timeout_secs,
        "starting gateway"
    );

    let source = ApodClient::new(config.apod_config())?;

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryRepository::new(), source).await?;
        }
        StorageBackendArg::Postgres => {
            let dsn = config
                .postgres_dsn
                .ok_or("postgres dsn is required when storage backend is postgres")?;
            let repository = PostgresRepository::connect(&dsn).await?;
            repository.migrate().await?;
            info!("connected to postgres and applied migrations");
            run_server(config.listen_addr, repository, source).await?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    repository: R,
    source: ApodClient,
) -> std::io::Result<()> {
    let archive = ArchiveService::new(repository, source);
    let app = App::router(AppState::new(Arc::new(archive)));

    let listener = TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
