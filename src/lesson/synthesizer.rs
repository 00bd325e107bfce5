//! Expands a lesson outline into displayable, block-structured content.
//!
//! Synthesis is pure and deterministic: the same outline and topic always
//! produce the same block sequence, with `order` values assigned 0..k as
//! blocks are appended. Safe to recompute repeatedly.

use tracing::debug;

use super::model::{
    AccessibilityFlags, BlockPayload, CalloutKind, ContentKind, LessonBlock, LessonContent,
    LessonMetadata,
};
use super::LessonOutline;

/// The same five generic objectives for every lesson — a known limitation,
/// not per-lesson-unique.
const OBJECTIVES: [&str; 5] = [
    "Understand the core ideas introduced in this lesson",
    "Recognize how the concepts fit into the bigger picture",
    "Apply what you learned in a small exercise",
    "Explain the key terms in your own words",
    "Know what to study next",
];

/// Appends blocks with sequentially assigned `order` values.
struct BlockWriter {
    blocks: Vec<LessonBlock>,
}

impl BlockWriter {
    fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    fn push(&mut self, payload: BlockPayload) {
        let order = self.blocks.len() as u32;
        self.blocks.push(LessonBlock { order, payload });
    }

    fn paragraph(&mut self, text: String) {
        self.push(BlockPayload::Paragraph { text });
    }

    fn heading(&mut self, text: &str, level: u8) {
        self.push(BlockPayload::Heading {
            text: text.to_string(),
            level,
        });
    }

    fn callout(&mut self, kind: CalloutKind, text: String) {
        self.push(BlockPayload::Callout { kind, text });
    }

    fn finish(self) -> Vec<LessonBlock> {
        self.blocks
    }
}

/// Expands outlines into lesson content.
#[derive(Debug, Clone, Copy, Default)]
pub struct LessonContentSynthesizer;

impl LessonContentSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Expand an outline for the given overarching topic.
    pub fn synthesize(&self, outline: &LessonOutline, topic: &str) -> LessonContent {
        debug!(lesson = %outline.title, kind = %outline.kind, "synthesizing lesson content");
        let mut w = BlockWriter::new();

        w.heading(&outline.title, 1);
        w.paragraph(outline.description.clone());

        match outline.kind {
            ContentKind::Text => self.text_section(&mut w, outline, topic),
            ContentKind::Video => self.video_section(&mut w, outline, topic),
            ContentKind::Interactive => self.interactive_section(&mut w, topic),
            ContentKind::Quiz => self.quiz_section(&mut w, topic),
        }

        self.common_tail(&mut w, topic);

        LessonContent {
            title: outline.title.clone(),
            description: outline.description.clone(),
            blocks: w.finish(),
            metadata: self.metadata(topic, outline.kind, outline.duration_minutes),
        }
    }

    /// The shorter quick-start first lesson, used when no outline exists.
    pub fn quick_start(&self, topic: &str) -> LessonContent {
        debug!(topic = topic, "synthesizing quick-start lesson");
        let mut w = BlockWriter::new();

        w.paragraph(format!(
            "Welcome! This is your first step into {topic}. In the next few minutes you'll \
             get a feel for what {topic} is about and where your learning path goes from here."
        ));
        w.callout(
            CalloutKind::Definition,
            format!(
                "{topic} is a skill you build in layers: a few core ideas, practiced \
                 repeatedly, open up everything that follows."
            ),
        );
        w.push(BlockPayload::BulletList {
            items: vec![
                format!("Learning {topic} sharpens how you think, not just what you know"),
                format!("Small daily sessions beat occasional marathons for {topic}"),
                format!("You can start using {topic} for real long before you master it"),
            ],
        });
        w.paragraph(format!(
            "Your path ahead: we'll begin with the fundamentals of {topic}, build up \
             through guided practice, and check progress with short quizzes. Each lesson \
             is small enough to finish in one sitting."
        ));
        w.callout(
            CalloutKind::Completion,
            "That's your orientation done — you're ready for lesson one.".to_string(),
        );

        LessonContent {
            title: format!("Getting Started with {topic}"),
            description: format!("A quick orientation before your {topic} course begins."),
            blocks: w.finish(),
            metadata: self.metadata(topic, ContentKind::Text, 5),
        }
    }

    fn text_section(&self, w: &mut BlockWriter, outline: &LessonOutline, topic: &str) {
        w.paragraph(format!(
            "This lesson gives you a working overview of {title}. Read it once for the \
             shape of the ideas, then come back to the key concepts as you practice {topic}.",
            title = outline.title
        ));
        w.heading("Key Concepts", 2);
        w.push(BlockPayload::BulletList {
            items: vec![
                format!("The vocabulary of {topic}: the terms you'll see everywhere"),
                format!("How the parts of {topic} relate to each other"),
                format!("The most common beginner mistakes in {topic} and how to avoid them"),
                format!("Where {topic} is used in the real world"),
                format!("How to practice {topic} deliberately"),
            ],
        });
        w.paragraph(format!(
            "None of these concepts live in isolation — as you move through the course \
             you'll see each one of them again in context, and each pass through {topic} \
             will make the earlier ideas click a little more."
        ));
    }

    fn video_section(&self, w: &mut BlockWriter, outline: &LessonOutline, topic: &str) {
        w.callout(
            CalloutKind::Info,
            format!(
                "This lesson includes video tutorials — about {} minutes of watching, \
                 broken into short segments you can pause and replay.",
                outline.duration_minutes
            ),
        );
        w.push(BlockPayload::NumberedList {
            items: vec![
                format!("Introduction and setup (0:00–2:30): what you need before diving into {topic}"),
                format!("Core walkthrough (2:30–7:00): {topic} demonstrated step by step"),
                format!("Worked example (7:00–11:00): a real {topic} problem solved on screen"),
                format!("Recap and pitfalls (11:00–end): the parts of {topic} people get wrong"),
            ],
        });
    }

    fn interactive_section(&self, w: &mut BlockWriter, topic: &str) {
        w.callout(
            CalloutKind::Tip,
            format!(
                "Hands-on time. Work through each exercise below in order — doing {topic} \
                 beats reading about it."
            ),
        );
        w.push(BlockPayload::Checklist {
            items: vec![
                format!("Warm up: repeat the basic {topic} motions from the last lesson"),
                format!("Guided exercise: follow the prompts to solve a small {topic} task"),
                format!("Variation: change one constraint and solve the {topic} task again"),
                format!("Self-check: explain out loud what you just did and why"),
                format!("Stretch goal: try the challenge version without hints"),
            ],
        });
    }

    fn quiz_section(&self, w: &mut BlockWriter, topic: &str) {
        w.callout(
            CalloutKind::Warning,
            format!(
                "Quiz ahead. Answer from memory first — look things up only after \
                 you've committed to an answer. This is where {topic} sticks."
            ),
        );
        w.push(BlockPayload::NumberedList {
            items: vec![
                format!("Recall: definitions and terms from your {topic} lessons so far"),
                format!("Recognition: pick the correct {topic} approach for each scenario"),
                format!("Application: solve two short {topic} problems"),
                format!("Reflection: one open question about where you'd use {topic} next"),
            ],
        });
    }

    /// Objectives, practice prompt, and completion — shared by every
    /// outline-based template.
    fn common_tail(&self, w: &mut BlockWriter, topic: &str) {
        w.heading("Learning Objectives", 2);
        w.push(BlockPayload::NumberedList {
            items: OBJECTIVES.iter().map(|o| o.to_string()).collect(),
        });
        w.paragraph(format!(
            "Practice prompt: (1) pick one idea from this lesson, (2) write it down in a \
             single sentence, (3) find one real example of it in {topic}, (4) try to use it \
             yourself once today, and (5) note what surprised you for next time."
        ));
        w.callout(
            CalloutKind::Completion,
            "Lesson complete — nice work. Your progress has been saved.".to_string(),
        );
    }

    fn metadata(&self, topic: &str, kind: ContentKind, duration_minutes: u32) -> LessonMetadata {
        LessonMetadata {
            // Difficulty is fixed rather than derived from the outline.
            difficulty: "beginner".to_string(),
            duration_seconds: duration_minutes * 60,
            tags: vec![
                topic.to_string(),
                kind.as_str().to_string(),
                "ai-generated".to_string(),
                "interactive".to_string(),
            ],
            objectives: OBJECTIVES.iter().map(|o| o.to_string()).collect(),
            accessibility: AccessibilityFlags {
                screen_reader_friendly: true,
                captions_available: kind == ContentKind::Video,
            },
        }
    }
}
