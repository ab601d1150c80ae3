use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use bank_server::db::CreateAccountRequest;
use bank_server::{configure, AppState, PgStorage, Settings};
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Account management server")]
struct Cli {
    /// Create the demo account before serving
    #[arg(long)]
    seed: bool,
}

async fn seed_accounts(state: &AppState) -> anyhow::Result<()> {
    let account = state
        .auth
        .create_account(CreateAccountRequest {
            first_name: "anthony".into(),
            last_name: "GG".into(),
            password: "hunter888".into(),
        })
        .await
        .context("failed to seed account")?;

    info!("Seeded account number {}", account.number);
    Ok(())
}

fn cors(settings: &Settings) -> Cors {
    if !settings.cors.enabled {
        return Cors::default();
    }

    let cors = if settings.cors.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        Cors::default()
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec!["Authorization", "Content-Type", "x-jwt-token"])
    };
    cors.max_age(settings.cors.max_age as usize)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();

    let config = Settings::new().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    info!("Configuration loaded successfully");

    let storage = PgStorage::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    storage.init().await.context("failed to create account table")?;
    let storage = Arc::new(storage);

    let state = AppState::new(config.clone(), storage.clone())?;

    if cli.seed {
        info!("Seeding the database");
        seed_accounts(&state).await?;
    }

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
        .with_context(|| format!("failed to bind {}:{}", config.server.host, config.server.port))?;
    info!("API server listening on {}:{}", config.server.host, config.server.port);

    let state = web::Data::new(state);
    let server_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config))
            .app_data(state.clone())
            .configure(configure)
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .context("server error")?;

    storage.close().await;
    Ok(())
}
