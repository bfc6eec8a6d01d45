//! StagePass - A self-hosted concert discovery and review server

#![allow(dead_code)]

mod api;
mod config;
mod core;
mod db;
mod models;
mod stores;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// StagePass - Self-hosted concert discovery server
#[derive(Parser, Debug)]
#[command(name = "stagepass")]
#[command(version = "0.9.0")]
#[command(about = "A self-hosted concert discovery and review server")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 1984)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize logging, keeping sqlx statement logging quiet unless debugging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter =
        tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn,actix_server=warn", log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("StagePass v0.9.0 starting...");

    let paths = config::Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    start_stagepass(args.host, args.port).await
}

async fn start_stagepass(host: String, port: u16) -> Result<()> {
    info!("Running setup...");
    run_setup().await?;

    info!("Loading data into memory...");
    load_into_memory().await?;

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    use actix_cors::Cors;
    use actix_web::{middleware, App, HttpServer};

    HttpServer::new(|| {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

async fn run_setup() -> Result<()> {
    use crate::config::UserConfig;
    use crate::db::{run_migrations, setup_sqlite, UserTable};
    use crate::utils::auth::{generate_random_string, hash_password};

    // Generate server ID if missing (JWT secret and password salt)
    let mut config = UserConfig::load()?;
    if config.server_id.is_empty() {
        config.server_id = uuid::Uuid::new_v4().to_string();
        config.save()?;
    }

    setup_sqlite().await?;
    run_migrations().await?;

    // Bootstrap an admin account on first run
    if !UserTable::has_users().await? {
        let username =
            std::env::var("STAGEPASS_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());

        let password = match std::env::var("STAGEPASS_ADMIN_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => {
                let generated = generate_random_string(12);
                tracing::warn!(
                    "No STAGEPASS_ADMIN_PASSWORD set; generated admin password: {}",
                    generated
                );
                generated
            }
        };

        let hash = hash_password(&password)?;
        UserTable::insert_admin(&username, &hash).await?;
        info!("Created admin user '{}'", username);
    }

    Ok(())
}

async fn load_into_memory() -> Result<()> {
    use crate::stores::{ArtistStore, ConcertStore};

    info!("Loading concerts...");
    ConcertStore::load_all().await?;
    info!("Loaded {} concerts", ConcertStore::get().count());

    info!("Loading artists...");
    ArtistStore::load_all().await?;
    info!("Loaded {} artists", ArtistStore::get().count());

    Ok(())
}
