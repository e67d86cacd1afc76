use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use identity_service::cli::{Cli, Commands};
use identity_service::identity_config::Config;
use identity_service::identity_core::hash_password;
use identity_service::logging::{init_tracing, shutdown_tracer};
use identity_service::router::init_router;
use identity_service::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Commands::HashSecret { secret } => {
            println!("{}", hash_password(&secret).await?);
            Ok(())
        }
        Commands::Serve { port } => serve(port).await,
    }
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = port {
        config.api.port = port;
    }

    init_tracing(&config.environment)?;
    info!(environment = %config.environment, "Application init started");

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let addr = config.api.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, swagger = config.api.swagger_enabled, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
