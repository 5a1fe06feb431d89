use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use konspekt_core::DeckBuilder;

use crate::handlers::{generate_slides_handler, health_handler, receive_tweet_handler};

#[derive(Clone)]
pub struct AppState {
    pub decks: Arc<DeckBuilder>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/tweet", post(receive_tweet_handler))
        .route(
            "/api/generate-slides/{video_id}",
            post(generate_slides_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
