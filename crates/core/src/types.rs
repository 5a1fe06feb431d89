use serde::{Deserialize, Serialize};

/// One timed caption fragment as returned by the transcript provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

/// An ordered sequence of timed fragments. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub fragments: Vec<TranscriptFragment>,
}

impl Transcript {
    pub fn new(fragments: Vec<TranscriptFragment>) -> Self {
        Self { fragments }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate all fragment texts into one plain-text string for the
    /// generation pipeline.
    pub fn plain_text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn duration_seconds(&self) -> f64 {
        self.fragments
            .last()
            .map(|f| f.start_seconds + f.duration_seconds)
            .unwrap_or(0.0)
    }
}

/// Snippet-level video metadata, fetched once per video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, start: f64, duration: f64) -> TranscriptFragment {
        TranscriptFragment {
            text: text.to_string(),
            start_seconds: start,
            duration_seconds: duration,
        }
    }

    #[test]
    fn plain_text_joins_fragments_with_spaces() {
        let transcript = Transcript::new(vec![
            fragment("hello there", 0.0, 1.5),
            fragment(" general", 1.5, 1.0),
            fragment("kenobi ", 2.5, 1.0),
        ]);

        assert_eq!(transcript.plain_text(), "hello there general kenobi");
    }

    #[test]
    fn plain_text_skips_blank_fragments() {
        let transcript = Transcript::new(vec![
            fragment("one", 0.0, 1.0),
            fragment("  ", 1.0, 1.0),
            fragment("two", 2.0, 1.0),
        ]);

        assert_eq!(transcript.plain_text(), "one two");
    }

    #[test]
    fn duration_comes_from_last_fragment() {
        let transcript = Transcript::new(vec![
            fragment("a", 0.0, 2.0),
            fragment("b", 2.0, 3.5),
        ]);

        assert_eq!(transcript.duration_seconds(), 5.5);
        assert_eq!(Transcript::new(vec![]).duration_seconds(), 0.0);
    }
}
