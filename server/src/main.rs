mod config;
mod routes;

use config::{ConfigError, ServerConfig};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Leptos(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    let app = routes::leptos_app().map_err(StartupError::Leptos)?;
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    tracing::info!(addr = %config.addr(), "travel companion listening");
    axum::serve(listener, app).await?;
    Ok(())
}
