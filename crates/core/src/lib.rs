//! Konspekt Core Library
//!
//! Core functionality for turning a YouTube video's transcript into a
//! structured slide deck through staged text-generation calls.

pub mod cache;
pub mod config;
pub mod deck;
pub mod error;
pub mod format;
pub mod generation;
pub mod link;
pub mod parse;
pub mod pipeline;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use cache::{get_cache_dir, get_deck_path, get_root_cache_dir, save_deck};
pub use config::{GenerationConfig, YoutubeConfig};
pub use deck::{SlideDeck, SlideRecord};
pub use error::{KonspektError, Result};
pub use format::{format_deck_readable, format_timestamp, format_transcript_with_timestamps};
pub use generation::{AzureOpenAiClient, TextGenerator};
pub use link::{extract_video_id, find_youtube_link};
pub use parse::{SlideFields, Subtopic, SubtopicOutline, parse_slide_fields, parse_subtopics};
pub use pipeline::{DeckBuilder, generate_comment, segment_transcript, synthesize_slide};
pub use types::{Transcript, TranscriptFragment, VideoMetadata};
pub use youtube::{MetadataProvider, TimedTextApi, TranscriptProvider, YoutubeDataApi};
