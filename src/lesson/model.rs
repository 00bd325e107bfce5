//! Lesson content model.
//!
//! An *outline* is the short descriptive stub a course generator returns; a
//! *content* is the fully expanded, block-structured document the classroom
//! displays. Blocks carry an explicit `order` field — the authoritative
//! ordering key — rather than relying on list position.

use serde::{Deserialize, Serialize};

/// Primary medium of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Video,
    Interactive,
    Quiz,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
            Self::Interactive => "interactive",
            Self::Quiz => "quiz",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A short descriptive lesson stub, as returned by course generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonOutline {
    pub title: String,
    pub description: String,
    pub kind: ContentKind,
    pub duration_minutes: u32,
}

/// Visual flavor of a callout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
    Info,
    Tip,
    Warning,
    Definition,
    Completion,
}

/// Variant-specific payload of a lesson block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    Paragraph { text: String },
    Heading { text: String, level: u8 },
    BulletList { items: Vec<String> },
    NumberedList { items: Vec<String> },
    Checklist { items: Vec<String> },
    Callout { kind: CalloutKind, text: String },
}

/// One displayable block of a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonBlock {
    /// Authoritative ordering key, assigned sequentially at append time.
    pub order: u32,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

/// Accessibility hints for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessibilityFlags {
    pub screen_reader_friendly: bool,
    pub captions_available: bool,
}

/// Metadata attached to synthesized content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonMetadata {
    pub difficulty: String,
    pub duration_seconds: u32,
    pub tags: Vec<String>,
    pub objectives: Vec<String>,
    pub accessibility: AccessibilityFlags,
}

/// A fully expanded lesson, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    pub title: String,
    pub description: String,
    pub blocks: Vec<LessonBlock>,
    pub metadata: LessonMetadata,
}

impl LessonContent {
    /// Blocks sorted by their `order` key (not list position).
    pub fn ordered_blocks(&self) -> Vec<&LessonBlock> {
        let mut blocks: Vec<&LessonBlock> = self.blocks.iter().collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }
}
