//! Gravida API server.
//!
//! Run with: cargo run -p gravida-web

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use gravida_db::{ConnectOptions, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = gravida_config::Config::load()?;

    let db = Database::connect(&ConnectOptions {
        host: config.database.host.clone(),
        port: config.database.port,
        user: config.database.user.clone(),
        password: config.database.password.clone(),
        dbname: config.database.dbname.clone(),
        max_connections: config.database.max_connections,
    })?;

    // Scoring must stay available while the database is down.
    if let Err(err) = db.initialize().await {
        tracing::warn!(error = %err, "database initialization failed; scoring stays up, storage will error until the database is reachable");
    } else {
        tracing::info!("database schema ready");
    }

    let state = gravida_web::state::AppState::new(db);
    let app = gravida_web::router::build_router(state);

    let addr = SocketAddr::new(
        config.server.host.parse()?,
        config.server.port,
    );
    tracing::info!(%addr, "gravida api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
