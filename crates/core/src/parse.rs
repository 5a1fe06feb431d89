//! Deterministic parsing of free-form generation output.
//!
//! The generator is prompted for two fixed textual patterns: a subtopic
//! enumeration and a four-field slide description. Neither is machine-readable,
//! so both parsers treat format drift as an expected, recoverable condition:
//! the subtopic parser skips malformed sections, the slide parser returns a
//! per-subtopic failure instead of panicking.

use tracing::warn;

use crate::error::{KonspektError, Result};

/// One named span of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtopic {
    pub title: String,
    pub excerpt: String,
}

/// Ordered list of subtopics in order of appearance in the generator output.
///
/// Titles are unique: inserting a title that already exists replaces the
/// earlier entry's excerpt in place, keeping its original position. Last
/// duplicate wins.
#[derive(Debug, Clone, Default)]
pub struct SubtopicOutline {
    entries: Vec<Subtopic>,
}

impl SubtopicOutline {
    pub fn insert(&mut self, title: String, excerpt: String) {
        if let Some(existing) = self.entries.iter_mut().find(|s| s.title == title) {
            warn!(title = %title, "duplicate subtopic title, replacing earlier excerpt");
            existing.excerpt = excerpt;
        } else {
            self.entries.push(Subtopic { title, excerpt });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subtopic> {
        self.entries.iter()
    }
}

/// The four labeled fields of a synthesized slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideFields {
    pub head: String,
    pub title: String,
    pub subtopic: String,
    pub bullets: Vec<String>,
}

const SECTION_SEPARATOR: &str = "\n- ";
const TEXT_SEPARATOR: &str = "\n  Text: ";
const SUBTOPIC_MARKER: &str = "Subtopic";

/// Parse the segmenter's raw enumeration into an ordered outline.
///
/// A section is accepted only if it carries the `Subtopic` marker and splits
/// on the `Text:` separator into exactly a title part and an excerpt part.
/// Anything else is logged and skipped; a malformed section never affects the
/// sections around it. Pure function of its input.
pub fn parse_subtopics(raw: &str) -> SubtopicOutline {
    let mut outline = SubtopicOutline::default();

    for section in raw.split(SECTION_SEPARATOR) {
        if !section.contains(SUBTOPIC_MARKER) {
            warn!(section = %preview(section), "skipping section without subtopic marker");
            continue;
        }

        let parts: Vec<&str> = section.split(TEXT_SEPARATOR).collect();
        let [title_part, text_part] = parts.as_slice() else {
            warn!(section = %preview(section), "skipping section without a single text separator");
            continue;
        };

        outline.insert(clean_title(title_part), text_part.trim().to_string());
    }

    outline
}

/// Strip the `Subtopic` marker, surrounding punctuation, and the ordinal the
/// prompt asks for (`- Subtopic <n>: <title>`), leaving only the title.
///
/// Removing the ordinal goes beyond a plain marker cleanup, which would keep
/// keys like `1: Intro`; the number belongs to the prompt's enumeration, not
/// the title. A title that merely begins with digits stays intact.
fn clean_title(title_part: &str) -> String {
    let cleaned = title_part.replace(SUBTOPIC_MARKER, "");
    let cleaned = cleaned.trim_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    strip_ordinal(cleaned).to_string()
}

fn strip_ordinal(title: &str) -> &str {
    let digits = title.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return title;
    }
    // Only treat the digits as an ordinal when they are delimited; a title
    // that happens to start with a number stays intact.
    match title[digits..].strip_prefix(':').or_else(|| title[digits..].strip_prefix('.')) {
        Some(rest) => rest.trim_start(),
        None => title,
    }
}

/// Parse the synthesizer's four-field output.
///
/// Expects `Head:` / `Title:` / `Subtopic:` / `Content:` leading lines, then
/// one bullet per hyphen-prefixed line. Fewer than four lines is format
/// drift, reported as a recoverable per-subtopic failure.
pub fn parse_slide_fields(raw: &str) -> Result<SlideFields> {
    let lines: Vec<&str> = raw.lines().collect();
    if lines.len() < 4 {
        return Err(KonspektError::FormatDrift {
            reason: format!("expected 4 labeled lines, got {}", lines.len()),
        });
    }

    let bullets = lines[4..]
        .iter()
        .filter(|line| line.starts_with('-'))
        .map(|line| {
            let trimmed = line.trim();
            trimmed
                .strip_prefix('-')
                .unwrap_or(trimmed)
                .trim()
                .to_string()
        })
        .collect();

    Ok(SlideFields {
        head: strip_label(lines[0], "Head:"),
        title: strip_label(lines[1], "Title:"),
        subtopic: strip_label(lines[2], "Subtopic:"),
        bullets,
    })
}

fn strip_label(line: &str, label: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_prefix(label).unwrap_or(trimmed).trim().to_string()
}

fn preview(section: &str) -> &str {
    let end = section
        .char_indices()
        .nth(80)
        .map(|(i, _)| i)
        .unwrap_or(section.len());
    &section[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "- Subtopic 1: Getting Started\n  Text: First steps of the video.\n- Subtopic 2: Advanced Usage\n  Text: Deeper material.\n- Subtopic 3: Wrap Up\n  Text: Closing remarks.";

    #[test]
    fn parses_every_well_formed_section_in_order() {
        let outline = parse_subtopics(WELL_FORMED);

        assert_eq!(outline.len(), 3);
        let titles: Vec<&str> = outline.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Getting Started", "Advanced Usage", "Wrap Up"]);
        let first = outline.iter().next().unwrap();
        assert_eq!(first.excerpt, "First steps of the video.");
    }

    #[test]
    fn malformed_section_is_skipped_without_losing_later_sections() {
        let raw = "- Subtopic 1: Good\n  Text: ok\n- Subtopic 2: Missing separator entirely\n- Subtopic 3: Also Good\n  Text: fine";
        let outline = parse_subtopics(raw);

        assert_eq!(outline.len(), 2);
        let titles: Vec<&str> = outline.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Good", "Also Good"]);
    }

    #[test]
    fn section_without_marker_is_skipped() {
        let raw = "- Chapter 1: Nope\n  Text: not a subtopic\n- Subtopic 1: Yes\n  Text: kept";
        let outline = parse_subtopics(raw);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline.iter().next().unwrap().title, "Yes");
    }

    #[test]
    fn section_with_two_text_separators_is_skipped() {
        let raw = "- Subtopic 1: Doubled\n  Text: one\n  Text: two\n- Subtopic 2: Clean\n  Text: kept";
        let outline = parse_subtopics(raw);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline.iter().next().unwrap().title, "Clean");
    }

    #[test]
    fn later_duplicate_title_overwrites_earlier_excerpt_in_place() {
        let raw = "- Subtopic 1: Repeated\n  Text: first\n- Subtopic 2: Other\n  Text: middle\n- Subtopic 3: Repeated\n  Text: second";
        let outline = parse_subtopics(raw);

        assert_eq!(outline.len(), 2);
        let entries: Vec<(&str, &str)> = outline
            .iter()
            .map(|s| (s.title.as_str(), s.excerpt.as_str()))
            .collect();
        assert_eq!(entries, [("Repeated", "second"), ("Other", "middle")]);
    }

    #[test]
    fn title_cleanup_handles_leading_list_hyphen_and_numeric_titles() {
        // First section keeps its leading "- " because nothing precedes it.
        let raw = "- Subtopic 1: 2024 Trends\n  Text: numbers ahead";
        let outline = parse_subtopics(raw);

        assert_eq!(outline.iter().next().unwrap().title, "2024 Trends");
    }

    #[test]
    fn parse_subtopics_is_idempotent() {
        let first: Vec<Subtopic> = parse_subtopics(WELL_FORMED).iter().cloned().collect();
        let second: Vec<Subtopic> = parse_subtopics(WELL_FORMED).iter().cloned().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_outline() {
        assert!(parse_subtopics("").is_empty());
    }

    #[test]
    fn slide_fields_parse_labeled_lines_and_bullets() {
        let fields =
            parse_slide_fields("Head: H\nTitle: T\nSubtopic: S\nContent:\n- a\n- b").unwrap();

        assert_eq!(fields.head, "H");
        assert_eq!(fields.title, "T");
        assert_eq!(fields.subtopic, "S");
        assert_eq!(fields.bullets, ["a", "b"]);
    }

    #[test]
    fn slide_fields_ignore_non_bullet_lines_after_content() {
        let fields = parse_slide_fields(
            "Head: H\nTitle: T\nSubtopic: S\nContent:\n- first\nplain commentary\n- second",
        )
        .unwrap();

        assert_eq!(fields.bullets, ["first", "second"]);
    }

    #[test]
    fn slide_fields_with_no_bullets_are_valid() {
        let fields = parse_slide_fields("Head: H\nTitle: T\nSubtopic: S\nContent:").unwrap();

        assert!(fields.bullets.is_empty());
    }

    #[test]
    fn short_output_is_format_drift_not_a_panic() {
        let err = parse_slide_fields("Head: H\nTitle: T").unwrap_err();

        assert!(matches!(
            err,
            crate::error::KonspektError::FormatDrift { .. }
        ));
    }

    #[test]
    fn missing_labels_fall_back_to_the_raw_line() {
        let fields = parse_slide_fields("just a line\nTitle: T\nSubtopic: S\nContent:").unwrap();

        assert_eq!(fields.head, "just a line");
        assert_eq!(fields.title, "T");
    }

    #[test]
    fn parse_slide_fields_is_idempotent() {
        let raw = "Head: H\nTitle: T\nSubtopic: S\nContent:\n- a";

        assert_eq!(
            parse_slide_fields(raw).unwrap(),
            parse_slide_fields(raw).unwrap()
        );
    }
}
