//! Question budget tracking for the free-text probing path.
//!
//! The tracker bounds how many probing questions may be asked before course
//! delivery is forced: Idle → Probing(n), n ∈ {0,1,2} → ForcedDelivery.
//! Once forced, every further turn forces delivery too — the dialogue is
//! guaranteed to terminate into generation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::intent::{ExperienceLevel, Intent};

/// Maximum probing questions before delivery is forced.
pub const MAX_PROBES: u8 = 3;

/// Probe templates, selected by the pre-increment question index.
const PROBE_TEMPLATES: [&str; MAX_PROBES as usize] = [
    "What specifically do you want to learn about that?",
    "What's your experience level with it so far?",
    "Last question — would you like a quick answer, or a full course?",
];

/// Tracker phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPhase {
    /// No probing has happened yet.
    Idle,
    /// `n` probing questions asked so far.
    Probing(u8),
    /// Budget exhausted or full course requested; generation must proceed.
    ForcedDelivery,
}

/// What the engine should do with the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Quick question: answer it directly, budget untouched (reset to 0).
    AnswerDirectly,
    /// Ask the selected probing question.
    AskProbe { template: &'static str, index: u8 },
    /// Proceed to course generation regardless of further input.
    ForceDelivery,
}

/// Bounds the probing dialogue and carries the heuristic detections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBudgetTracker {
    questions_asked: u8,
    forced: bool,
    started: bool,
    pub detected_topic: Option<String>,
    pub detected_level: Option<ExperienceLevel>,
}

impl QuestionBudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BudgetPhase {
        if self.forced {
            BudgetPhase::ForcedDelivery
        } else if self.started {
            BudgetPhase::Probing(self.questions_asked)
        } else {
            BudgetPhase::Idle
        }
    }

    /// Number of probing questions asked since the last reset.
    pub fn questions_asked(&self) -> u8 {
        self.questions_asked
    }

    /// Whether the controller must proceed to generation regardless of
    /// further input.
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Record one classified turn and decide what to do with it.
    ///
    /// A quick question resets the counter without consuming budget. A
    /// probing turn selects its template by the pre-increment index, then
    /// increments; the turn that brings the count to [`MAX_PROBES`] still
    /// asks its (final) probe but flips the forced flag, so the answer to it
    /// — whatever it classifies as — forces delivery.
    pub fn record_turn(&mut self, intent: Intent) -> TurnOutcome {
        if self.forced {
            return TurnOutcome::ForceDelivery;
        }
        self.started = true;

        match intent {
            Intent::FullCourse => {
                debug!("full course requested, forcing delivery");
                self.forced = true;
                self.questions_asked = 0;
                TurnOutcome::ForceDelivery
            }
            Intent::QuickQuestion => {
                self.questions_asked = 0;
                TurnOutcome::AnswerDirectly
            }
            Intent::NeedsProbing => {
                let index = self.questions_asked;
                self.questions_asked += 1;
                if self.questions_asked >= MAX_PROBES {
                    debug!("question budget exhausted, forcing delivery");
                    self.forced = true;
                    self.questions_asked = 0;
                }
                TurnOutcome::AskProbe {
                    template: PROBE_TEMPLATES[index as usize],
                    index,
                }
            }
        }
    }

    /// Fold new heuristic detections in; `None` keeps the previous value.
    pub fn note_detection(&mut self, topic: Option<String>, level: Option<ExperienceLevel>) {
        if let Some(topic) = topic {
            self.detected_topic = Some(topic);
        }
        if let Some(level) = level {
            self.detected_level = Some(level);
        }
    }

    /// Explicit start-over: counter, phase, and detections all cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
