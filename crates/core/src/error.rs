use thiserror::Error;

#[derive(Error, Debug)]
pub enum KonspektError {
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Unable to retrieve metadata for video {video_id}: {reason}")]
    MetadataUnavailable { video_id: String, reason: String },

    #[error("Unable to retrieve transcript for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Generation failed during {stage}: {reason}")]
    GenerationFailed { stage: &'static str, reason: String },

    #[error("Generation output did not match the expected format: {reason}")]
    FormatDrift { reason: String },

    #[error("Missing configuration: {env_var} environment variable is not set")]
    MissingConfig { env_var: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, KonspektError>;
