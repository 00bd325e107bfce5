//! Lesson outlines, block-structured lesson content, and the synthesizer
//! that expands one into the other.

pub mod model;
pub mod synthesizer;

pub use model::{
    AccessibilityFlags, BlockPayload, CalloutKind, ContentKind, LessonBlock, LessonContent,
    LessonMetadata, LessonOutline,
};
pub use synthesizer::LessonContentSynthesizer;
