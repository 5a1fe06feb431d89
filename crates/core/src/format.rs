use crate::deck::SlideDeck;
use crate::types::Transcript;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript fragments with timestamps
pub fn format_transcript_with_timestamps(transcript: &Transcript) -> String {
    transcript
        .fragments
        .iter()
        .map(|f| format!("[{}] {}", format_timestamp(f.start_seconds), f.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a slide deck as human-readable markdown
pub fn format_deck_readable(deck: &SlideDeck) -> String {
    let mut output = String::new();

    for (index, slide) in deck.iter().enumerate() {
        if slide.is_cover() {
            output.push_str(&format!("# {}\n\n", slide.title));
            if !slide.background_url.is_empty() {
                output.push_str(&format!("Cover image: {}\n\n", slide.background_url));
            }
            continue;
        }

        output.push_str(&format!("## Slide {}: {}\n\n", index, slide.title));
        if !slide.head.is_empty() {
            output.push_str(&format!("_{}_\n\n", slide.head));
        }
        if !slide.subtopic.is_empty() {
            output.push_str(&format!("**{}**\n\n", slide.subtopic));
        }
        for bullet in &slide.content {
            output.push_str(&format!("• {}\n", bullet));
        }
        output.push('\n');
    }

    output
}
