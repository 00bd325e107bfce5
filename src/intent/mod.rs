//! Intent classification for free-text learner messages.
//!
//! Classification is deliberately shallow — keyword and token heuristics, no
//! real natural-language understanding. The [`IntentStrategy`] trait is the
//! seam for swapping in a learned classifier later without touching the
//! dialogue state machines.

pub mod keyword;

pub use keyword::KeywordStrategy;

use serde::{Deserialize, Serialize};

/// What the learner's last message tells us about what they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A one-off question — answer it directly, keep the dialogue open.
    QuickQuestion,
    /// Unclear — ask a probing question.
    NeedsProbing,
    /// A clear request for a full course — stop probing, start generating.
    FullCourse,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::QuickQuestion => "quick_question",
            Self::NeedsProbing => "needs_probing",
            Self::FullCourse => "full_course",
        };
        write!(f, "{s}")
    }
}

/// Self-declared experience level detected from learner text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strategy interface for intent classification and heuristic extraction.
///
/// Implementations must be pure: no side effects, no failures. Ambiguous
/// input always resolves to [`Intent::NeedsProbing`].
pub trait IntentStrategy: Send + Sync {
    /// Classify a raw learner utterance.
    fn classify(&self, utterance: &str) -> Intent;

    /// Extract the learning topic from an utterance, stripping filler
    /// phrases ("i want to learn", "teach me", ...). Returns `None` when
    /// nothing topic-like remains.
    fn extract_topic(&self, utterance: &str) -> Option<String>;

    /// Detect a self-declared experience level, if any.
    fn detect_level(&self, utterance: &str) -> Option<ExperienceLevel>;
}
