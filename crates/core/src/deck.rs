use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::parse::SlideFields;
use crate::types::VideoMetadata;

const USER_NAME: &str = "Created using konspekt";
const COVER_TEMPLATE: &str = "Default";
const COVER_LAYOUT: &str = "Blank_layout";
const CONTENT_TEMPLATE: &str = "Creative_Brief_011";
const CONTENT_LAYOUT: &str = "Col_1_img_0_layout";

/// One slide in the downstream presentation format. The media and styling
/// fields are part of the wire contract but always empty/default for
/// generated slides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideRecord {
    pub head: String,
    pub title: String,
    pub subtopic: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub template: String,
    pub content: Vec<String>,
    pub images: Vec<String>,
    pub media_types: Vec<String>,
    pub chart: Vec<serde_json::Value>,
    pub image_positions: Vec<serde_json::Value>,
    pub layout: String,
    pub logo: String,
    pub additional_images: Vec<String>,
    pub palette: String,
    pub transcript: String,
    pub logo_url: String,
    pub background_url: String,
    pub background_color: String,
    #[serde(rename = "titleFontFamily")]
    pub title_font_family: String,
    #[serde(rename = "subtitleFontFamily")]
    pub subtitle_font_family: String,
    #[serde(rename = "contentFontFamily")]
    pub content_font_family: String,
}

impl SlideRecord {
    fn blank(template: &str, layout: &str) -> Self {
        Self {
            head: String::new(),
            title: String::new(),
            subtopic: String::new(),
            user_name: USER_NAME.to_string(),
            template: template.to_string(),
            content: Vec::new(),
            images: Vec::new(),
            media_types: Vec::new(),
            chart: Vec::new(),
            image_positions: Vec::new(),
            layout: layout.to_string(),
            logo: "Default".to_string(),
            additional_images: Vec::new(),
            palette: String::new(),
            transcript: String::new(),
            logo_url: String::new(),
            background_url: String::new(),
            background_color: String::new(),
            title_font_family: String::new(),
            subtitle_font_family: String::new(),
            content_font_family: String::new(),
        }
    }

    /// The cover slide: video title plus the thumbnail as background, all
    /// content fields empty.
    pub fn cover(metadata: &VideoMetadata) -> Self {
        let mut slide = Self::blank(COVER_TEMPLATE, COVER_LAYOUT);
        slide.title = metadata.title.clone();
        slide.background_url = metadata.thumbnail_url.clone().unwrap_or_default();
        slide
    }

    /// A content slide built from parsed generation output.
    pub fn from_fields(fields: SlideFields) -> Self {
        let mut slide = Self::blank(CONTENT_TEMPLATE, CONTENT_LAYOUT);
        slide.head = fields.head;
        slide.title = fields.title;
        slide.subtopic = fields.subtopic;
        slide.content = fields.bullets;
        slide
    }

    pub fn is_cover(&self) -> bool {
        self.layout == COVER_LAYOUT
    }
}

/// The assembled deck: cover at index 0, content slides in outline order.
///
/// Serializes as a JSON object keyed by stringified index, the shape the
/// slide frontend consumes.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    slides: Vec<SlideRecord>,
}

impl SlideDeck {
    pub fn with_cover(cover: SlideRecord) -> Self {
        Self {
            slides: vec![cover],
        }
    }

    pub fn push(&mut self, slide: SlideRecord) {
        self.slides.push(slide);
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// True when every per-subtopic synthesis was dropped and only the cover
    /// survived.
    pub fn is_cover_only(&self) -> bool {
        self.slides.len() == 1
    }

    pub fn get(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideRecord> {
        self.slides.iter()
    }
}

impl Serialize for SlideDeck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slides.len()))?;
        for (index, slide) in self.slides.iter().enumerate() {
            map.serialize_entry(&index, slide)?;
        }
        map.end()
    }
}
