//! External collaborator interfaces.
//!
//! The engine owns no transport: text and course generation are consumed
//! through these traits and injected at construction (never referenced as
//! process-wide singletons), so tests run against in-crate doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::lesson::{ContentKind, LessonOutline};

/// Free-text generation collaborator (quick answers, clarifications).
///
/// Streaming, auth, and retry policy are the collaborator's concern.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Course generation collaborator: topic in, outline list out.
#[async_trait]
pub trait CourseGeneration: Send + Sync {
    async fn generate_course(&self, topic: &str) -> Result<GeneratedCourse, GenerationError>;
}

/// A generated course: a title, a description, and lesson outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCourse {
    pub title: String,
    pub description: String,
    pub lessons: Vec<LessonOutline>,
}

impl GeneratedCourse {
    pub fn has_lessons(&self) -> bool {
        !self.lessons.is_empty()
    }
}

/// The fixed default curriculum substituted whenever the generation
/// collaborator fails or returns an empty lesson list. Failure is never
/// surfaced to the learner as blocking.
pub fn default_curriculum(topic: &str) -> GeneratedCourse {
    let topic = if topic.trim().is_empty() {
        "your topic"
    } else {
        topic.trim()
    };

    GeneratedCourse {
        title: format!("Getting Started with {topic}"),
        description: format!("A starter path through {topic}, from first principles to practice."),
        lessons: vec![
            LessonOutline {
                title: format!("Introduction to {topic}"),
                description: format!("What {topic} is and why it matters."),
                kind: ContentKind::Text,
                duration_minutes: 10,
            },
            LessonOutline {
                title: "Core Concepts".to_string(),
                description: format!("The ideas everything else in {topic} builds on."),
                kind: ContentKind::Video,
                duration_minutes: 15,
            },
            LessonOutline {
                title: "Hands-On Practice".to_string(),
                description: format!("Apply the basics of {topic} yourself."),
                kind: ContentKind::Interactive,
                duration_minutes: 20,
            },
            LessonOutline {
                title: "Checkpoint Quiz".to_string(),
                description: "Check what has stuck so far.".to_string(),
                kind: ContentKind::Quiz,
                duration_minutes: 10,
            },
            LessonOutline {
                title: "Next Steps".to_string(),
                description: format!("Where to take {topic} from here."),
                kind: ContentKind::Text,
                duration_minutes: 10,
            },
        ],
    }
}
