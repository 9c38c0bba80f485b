//! Football league API server
//!
//! Loads configuration, applies migrations and serves the REST API until a
//! shutdown signal arrives.

use anyhow::{Context, Result};
use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use league_service::infra::storage::migrations::Migrator;
use league_service::{build_service, Config};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::{path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "league-server")]
#[command(about = "Football league CRUD API server")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "league.yaml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .compact()
        .init();

    // Missing config file falls through to defaults; env vars win over YAML.
    let config: Config = Figment::new()
        .merge(Yaml::file(&args.config))
        .merge(Env::prefixed("LEAGUE_"))
        .extract()
        .context("invalid configuration")?;

    info!(database = %config.database_url, "connecting to database");
    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .context("failed to connect to database")?,
    );

    if config.run_migrations {
        Migrator::up(db.as_ref(), None).await?;
        info!("migrations applied");
    }

    let service = build_service(db);
    let router = league_service::api::rest::router(service).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
