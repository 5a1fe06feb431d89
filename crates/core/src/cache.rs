//! Optional file dump for generated decks. Write-only: nothing is read back
//! into the pipeline.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::deck::SlideDeck;
use crate::error::Result;

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("konspekt")
}

/// Per-video dump directory. Video IDs are 11 URL-safe characters, so they
/// are used as-is.
pub fn get_cache_dir(video_id: &str) -> PathBuf {
    get_root_cache_dir().join(video_id)
}

pub fn get_deck_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("deck.json")
}

/// Write the deck as pretty JSON, creating the parent directory if needed.
pub async fn save_deck(deck: &SlideDeck, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(deck)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}
