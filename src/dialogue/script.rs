//! The diagnostic question script.
//!
//! The script is immutable and consumed strictly in order; the engine never
//! moves backward through it.

use serde::{Deserialize, Serialize};

/// How a diagnostic question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    OpenEnded,
    MultipleChoice,
    Scale,
}

/// One scripted diagnostic question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticQuestion {
    /// Stable key used to route the answer into the blueprint builder.
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    /// Suggested short answers, surfaced as chips for multiple-choice and
    /// scale questions. Selecting a chip is equivalent to typing its text.
    pub options: &'static [&'static str],
}

impl DiagnosticQuestion {
    /// Whether this question surfaces suggestion chips.
    pub fn has_suggestions(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice | QuestionKind::Scale)
            && !self.options.is_empty()
    }
}

/// The reference diagnostic script: topic, goal, timeline, style, level,
/// motivation.
pub fn default_script() -> &'static [DiagnosticQuestion] {
    const SCRIPT: &[DiagnosticQuestion] = &[
        DiagnosticQuestion {
            id: "interests",
            prompt: "What would you like to learn? Tell me about a topic or skill you're curious about.",
            kind: QuestionKind::OpenEnded,
            options: &[],
        },
        DiagnosticQuestion {
            id: "goal",
            prompt: "What do you want to be able to do once you've learned it?",
            kind: QuestionKind::OpenEnded,
            options: &[],
        },
        DiagnosticQuestion {
            id: "timeline",
            prompt: "How much time can you put in?",
            kind: QuestionKind::MultipleChoice,
            options: &[
                "A few minutes a day",
                "About an hour a day",
                "A few hours a week",
                "As much as it takes",
            ],
        },
        DiagnosticQuestion {
            id: "style",
            prompt: "How do you like to learn?",
            kind: QuestionKind::MultipleChoice,
            options: &[
                "Reading and notes",
                "Watching videos",
                "Hands-on practice",
                "A mix of everything",
            ],
        },
        DiagnosticQuestion {
            id: "experience",
            prompt: "How much experience do you already have, from 1 (none) to 5 (a lot)?",
            kind: QuestionKind::Scale,
            options: &["1", "2", "3", "4", "5"],
        },
        DiagnosticQuestion {
            id: "motivation",
            prompt: "And last one — what's driving you to learn this now?",
            kind: QuestionKind::OpenEnded,
            options: &[],
        },
    ];
    SCRIPT
}
