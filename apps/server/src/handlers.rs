use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use konspekt_core::{KonspektError, SlideDeck, extract_video_id, find_youtube_link};

use crate::router::AppState;

/// Failure envelope: every pipeline error leaves as `{"error": "..."}` with a
/// status matching the original server's taxonomy.
pub struct ApiError(KonspektError);

impl From<KonspektError> for ApiError {
    fn from(err: KonspektError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            KonspektError::InvalidRequest { .. }
            | KonspektError::MetadataUnavailable { .. }
            | KonspektError::TranscriptUnavailable { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(status = %status, error = %self.0, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize)]
pub struct TweetPayload {
    pub tweet_content: Option<String>,
    pub tweet_id: Option<String>,
    pub author: Option<String>,
}

/// Post intake: detect a YouTube link in the tweet text and, when present,
/// run the full slide pipeline on the linked video.
pub async fn receive_tweet_handler(
    State(state): State<AppState>,
    Json(payload): Json<TweetPayload>,
) -> Result<Json<Value>, ApiError> {
    let Some(tweet_content) = payload.tweet_content.filter(|c| !c.trim().is_empty()) else {
        return Err(KonspektError::InvalidRequest {
            reason: "missing tweet_content".to_string(),
        }
        .into());
    };

    let Some(youtube_link) = find_youtube_link(&tweet_content) else {
        return Ok(Json(json!({ "message": "No YouTube link found" })));
    };

    let video_id = extract_video_id(&youtube_link).ok_or(KonspektError::InvalidRequest {
        reason: "unrecognized YouTube link".to_string(),
    })?;

    let deck = state.decks.build_deck(&video_id).await?;

    Ok(Json(json!({
        "message": "Slides generated successfully",
        "tweet_id": payload.tweet_id,
        "author": payload.author,
        "youtube_link": youtube_link,
        "slides": deck,
    })))
}

pub async fn generate_slides_handler(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<SlideDeck>, ApiError> {
    let deck = state.decks.build_deck(&video_id).await?;
    Ok(Json(deck))
}
