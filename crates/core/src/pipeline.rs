//! The transcript-to-slides pipeline: segmentation, per-subtopic synthesis,
//! and deck assembly. Stages run strictly one after another; each generation
//! call is a single synchronous round-trip with no retries.

use std::sync::Arc;

use tracing::{info, warn};

use crate::deck::{SlideDeck, SlideRecord};
use crate::error::{KonspektError, Result};
use crate::generation::TextGenerator;
use crate::parse::{SubtopicOutline, parse_slide_fields, parse_subtopics};
use crate::youtube::{MetadataProvider, TranscriptProvider};

static SEGMENT_PROMPT: &str = r#"
Analyze the following video transcript and return a structured list of subtopics.
For each subtopic, include a brief summary and the text that corresponds to that subtopic.

Transcript: {transcript}

Format the response like this:
- Subtopic 1: (Subtopic title here)
  Text: (corresponding text here)
- Subtopic 2: (Subtopic title here)
  Text: (corresponding text here)
"#;

static SLIDE_PROMPT: &str = r#"
Based on the following video transcript section, create content for a slide presentation.
Please provide the output formatted as follows:

- Head: A short sentence summarizing the overall theme of the section.
- Title: A concise and relevant title for the slide.
- Subtopic: A subheading that captures the key focus of the section.
- Content: A list of bullet points summarizing the main points from the section. Should be less than 7 bullet points.

Transcript Section: {section}

Format the response exactly in the following format:
Head: (provide the head text here)
Title: (provide the title text here)
Subtopic: (provide the subtopic text here)
Content:
(provide the first bullet point here)
(provide the second bullet point here)
(and so on, each bullet point on a new line)
"#;

static COMMENT_PROMPT: &str = r#"
Write a short, friendly social media comment about a video.
Keep it under two sentences, no hashtags, no emoji.

Video title: {title}
Video summary: {summary}
"#;

// Large budget so long transcripts are not truncated; low temperature favors
// a stable enumeration over creativity.
const SEGMENT_MAX_TOKENS: u32 = 2000;
const SEGMENT_TEMPERATURE: f32 = 0.3;

// Mid-range temperature balances fidelity with fluent slide copy.
const SLIDE_MAX_TOKENS: u32 = 500;
const SLIDE_TEMPERATURE: f32 = 0.5;

const COMMENT_MAX_TOKENS: u32 = 120;
const COMMENT_TEMPERATURE: f32 = 0.7;

/// One generation call that enumerates the transcript's subtopics in the
/// fixed textual pattern the parser expects.
pub async fn segment_transcript(
    generator: &dyn TextGenerator,
    transcript_text: &str,
) -> Result<String> {
    let prompt = SEGMENT_PROMPT.replace("{transcript}", transcript_text);
    let raw = generator
        .generate(&prompt, SEGMENT_MAX_TOKENS, SEGMENT_TEMPERATURE)
        .await?;

    if raw.trim().is_empty() {
        return Err(KonspektError::FormatDrift {
            reason: "segmenter returned empty output".to_string(),
        });
    }

    Ok(raw)
}

/// One generation call per subtopic excerpt, parsed into a content slide.
pub async fn synthesize_slide(
    generator: &dyn TextGenerator,
    excerpt: &str,
) -> Result<SlideRecord> {
    let prompt = SLIDE_PROMPT.replace("{section}", excerpt);
    let raw = generator
        .generate(&prompt, SLIDE_MAX_TOKENS, SLIDE_TEMPERATURE)
        .await?;

    let fields = parse_slide_fields(&raw)?;
    Ok(SlideRecord::from_fields(fields))
}

/// Sequences metadata retrieval, transcript retrieval, segmentation,
/// per-subtopic synthesis, and deck assembly.
///
/// Collaborators are injected at construction; nothing here reads the
/// environment or keeps state across invocations.
pub struct DeckBuilder {
    metadata: Arc<dyn MetadataProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl DeckBuilder {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            metadata,
            transcripts,
            generator,
        }
    }

    /// Build the full deck for a video. Every stage before synthesis is a
    /// hard gate; a subtopic whose synthesis or parse fails is dropped with a
    /// warning and the rest of the deck still assembles. A cover-only deck is
    /// a success.
    pub async fn build_deck(&self, video_id: &str) -> Result<SlideDeck> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(KonspektError::InvalidRequest {
                reason: "missing video id".to_string(),
            });
        }

        let metadata = self.metadata.video_metadata(video_id).await?;
        let transcript = self.transcripts.transcript(video_id).await?;
        if transcript.is_empty() {
            return Err(KonspektError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: "transcript has no fragments".to_string(),
            });
        }

        let raw_outline =
            segment_transcript(self.generator.as_ref(), &transcript.plain_text()).await?;
        let outline = parse_subtopics(&raw_outline);
        info!(video_id, subtopics = outline.len(), "transcript segmented");

        let mut deck = SlideDeck::with_cover(SlideRecord::cover(&metadata));
        self.append_subtopic_slides(&mut deck, &outline).await;

        info!(video_id, slides = deck.len(), "deck assembled");
        Ok(deck)
    }

    async fn append_subtopic_slides(&self, deck: &mut SlideDeck, outline: &SubtopicOutline) {
        for subtopic in outline.iter() {
            match synthesize_slide(self.generator.as_ref(), &subtopic.excerpt).await {
                Ok(slide) => deck.push(slide),
                // A failed subtopic only shows up as a shorter deck.
                Err(e) => warn!(title = %subtopic.title, error = %e, "dropping subtopic"),
            }
        }
    }

    /// Short social comment about a video, from its title and a summary.
    /// Same client, different prompt; independent of the slide pipeline.
    pub async fn generate_comment(&self, title: &str, summary: &str) -> Result<String> {
        generate_comment(self.generator.as_ref(), title, summary).await
    }
}

/// Single-call comment variant, following the same generate-then-check shape
/// as the slide stages.
pub async fn generate_comment(
    generator: &dyn TextGenerator,
    title: &str,
    summary: &str,
) -> Result<String> {
    let prompt = COMMENT_PROMPT
        .replace("{title}", title)
        .replace("{summary}", summary);
    let comment = generator
        .generate(&prompt, COMMENT_MAX_TOKENS, COMMENT_TEMPERATURE)
        .await?;

    if comment.trim().is_empty() {
        return Err(KonspektError::FormatDrift {
            reason: "comment generation returned empty output".to_string(),
        });
    }

    Ok(comment)
}
