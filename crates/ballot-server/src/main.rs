use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ballot=info,tower_http=debug")),
        )
        .init();

    let args = cli::Args::parse();
    let mut config = config::Config::load(&args.config)?;

    // CLI --bind overrides the config file
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    if config.auth.jwt_secret.is_empty() {
        bail!("auth.jwt_secret is not set; add it to '{}' before starting", args.config);
    }

    ensure_db_dir(&config.database.url);

    let db = ballot_db::create_pool(&config.database.url, config.database.max_connections).await?;
    ballot_db::run_migrations(&db).await?;

    let state = ballot_core::AppState {
        db,
        config: ballot_core::AppConfig {
            jwt_secret: config.auth.jwt_secret.clone(),
            jwt_expiry_seconds: config.auth.jwt_expiry_seconds,
            registration_enabled: config.auth.registration_enabled,
            public_url: config.server.public_url.clone(),
        },
    };

    let app = ballot_api::build_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Listening on http://{}", config.server.bind_address);
    if let Some(url) = &config.server.public_url {
        tracing::info!("Public URL: {}", url);
    }
    tracing::info!("Database: {}", config.database.url);
    tracing::info!(
        "Registration: {}",
        if config.auth.registration_enabled { "open" } else { "closed" }
    );

    let shutdown_signal = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutting down...");
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

/// Create the database's parent directory so a fresh checkout can start
/// without manual setup.
fn ensure_db_dir(db_url: &str) {
    if let Some(db_path) = db_url
        .strip_prefix("sqlite://")
        .and_then(|s| s.split('?').next())
    {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
    }
}
