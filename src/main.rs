use std::env;
use std::net::SocketAddr;

use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskboard::db::connection::establish_connection;
use taskboard::{controllers, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_url: SocketAddr = env::var("APP_URL")?.parse()?;
    let pool = establish_connection();
    let app = controllers::router(AppState { pool });

    info!("Task board service listening on {}", app_url);
    let listener = tokio::net::TcpListener::bind(app_url).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
