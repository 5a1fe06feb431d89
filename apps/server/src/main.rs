mod handlers;
mod router;

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use konspekt_core::{
    AzureOpenAiClient, DeckBuilder, GenerationConfig, TimedTextApi, YoutubeConfig, YoutubeDataApi,
};

use crate::router::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail fast on missing credentials, before binding the socket.
    let generation_config = GenerationConfig::from_env()?;
    let youtube_config = YoutubeConfig::from_env()?;

    let http = reqwest::Client::new();
    let decks = Arc::new(DeckBuilder::new(
        Arc::new(YoutubeDataApi::new(http.clone(), youtube_config)),
        Arc::new(TimedTextApi::new(http)),
        Arc::new(AzureOpenAiClient::new(generation_config)?),
    ));

    let port: u16 = std::env::var("KONSPEKT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let app = create_router(AppState { decks });
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "konspekt-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
