//! The diagnostic dialogue engine.
//!
//! Drives two paths that share one blueprint and one conversation log:
//!
//! - **Scripted**: a fixed ordered question script ([`super::script`]),
//!   consumed one step per answer, each answer routed into the blueprint
//!   builder keyed by the current question id.
//! - **Probing chat**: free-text messages classified per turn; quick
//!   questions are answered via the text-generation collaborator, unclear
//!   ones consume the question budget, and a full-course request (or an
//!   exhausted budget) forces delivery.
//!
//! All state here is single-owner. Callers that share the engine across
//! tasks wrap it in a `tokio::sync::Mutex` held across [`handle_chat`]'s
//! collaborator call, so messages arriving mid-generation are serialized
//! FIFO — no cancellation.
//!
//! [`handle_chat`]: DiagnosticDialogueEngine::handle_chat

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::blueprint::{BlueprintGraphBuilder, LearningBlueprint, RadialLayoutEngine};
use crate::config::EngineConfig;
use crate::error::{DialogueError, Result};
use crate::intent::{Intent, IntentStrategy};
use crate::services::TextGeneration;

use super::budget::{QuestionBudgetTracker, TurnOutcome};
use super::message::ConversationMessage;
use super::script::{default_script, DiagnosticQuestion};

/// Shown when the text-generation collaborator fails; dialogue and budget
/// state are left untouched.
const FALLBACK_ANSWER: &str =
    "I couldn't reach my knowledge source just now — could you rephrase that, or tell me \
     a bit more about what you'd like to learn?";

const COMPLETION_MESSAGE: &str =
    "Perfect, that's everything I need. Let me put your learning plan together!";

const FORCED_DELIVERY_MESSAGE: &str =
    "Great — I have enough to work with. Building your course now!";

/// Outcome of one scripted answer.
#[derive(Debug, Clone)]
pub enum AnswerOutcome {
    /// The next question has been emitted.
    NextQuestion,
    /// Script finished; here is the blueprint snapshot.
    Completed(LearningBlueprint),
    /// The answer demanded a full course; skip the rest of the script.
    ForcedDelivery(LearningBlueprint),
}

/// Outcome of one free-text chat turn.
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    /// A quick question was answered in place.
    Answered,
    /// A probing question was asked.
    Probed { index: u8 },
    /// Delivery is forced; generate a course from what was detected.
    ForceDelivery {
        topic: Option<String>,
        level: Option<String>,
    },
}

/// Serializable view of the dialogue for UI subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct DialogueSnapshot {
    pub messages: Vec<ConversationMessage>,
    pub suggestions: Vec<String>,
    pub thinking: bool,
    pub completed: bool,
}

/// Drives the diagnostic dialogue and owns its state.
pub struct DiagnosticDialogueEngine {
    script: &'static [DiagnosticQuestion],
    step: usize,
    completed: bool,
    messages: Vec<ConversationMessage>,
    suggestions: Vec<String>,
    thinking: bool,
    builder: BlueprintGraphBuilder,
    budget: QuestionBudgetTracker,
    strategy: Arc<dyn IntentStrategy>,
    text_gen: Arc<dyn TextGeneration>,
    max_suggestions: usize,
}

impl DiagnosticDialogueEngine {
    pub fn new(
        config: &EngineConfig,
        strategy: Arc<dyn IntentStrategy>,
        text_gen: Arc<dyn TextGeneration>,
    ) -> Self {
        Self::with_script(config, strategy, text_gen, default_script())
    }

    /// Construct with a custom question script (kept static and ordered).
    pub fn with_script(
        config: &EngineConfig,
        strategy: Arc<dyn IntentStrategy>,
        text_gen: Arc<dyn TextGeneration>,
        script: &'static [DiagnosticQuestion],
    ) -> Self {
        let layout = RadialLayoutEngine::from_config(config);
        Self {
            script,
            step: 0,
            completed: false,
            messages: Vec::new(),
            suggestions: Vec::new(),
            thinking: false,
            builder: BlueprintGraphBuilder::new(strategy.clone(), layout),
            budget: QuestionBudgetTracker::new(),
            strategy,
            text_gen,
            max_suggestions: config.max_suggestions,
        }
    }

    /// Emit the first scripted question.
    pub fn open(&mut self) -> Result<()> {
        if self.script.is_empty() {
            return Err(DialogueError::EmptyScript.into());
        }
        self.emit_current_question();
        Ok(())
    }

    /// Handle the answer to the current scripted question.
    ///
    /// Chip selection is equivalent to submitting the chip's text. The step
    /// index only ever moves forward, by exactly one per answer; there is no
    /// "previous" transition.
    pub fn submit_answer(&mut self, text: &str) -> Result<AnswerOutcome> {
        if self.completed {
            return Err(DialogueError::AlreadyCompleted.into());
        }

        self.messages.push(ConversationMessage::user(text));
        self.suggestions.clear();

        // Route the answer into the blueprint before checking intent, so a
        // full-course demand at the interests step still captures the topic.
        if let Some(question_id) = self.script.get(self.step).map(|q| q.id) {
            self.builder.record_answer(question_id, text);
        }
        self.note_detections(text);

        if self.strategy.classify(text) == Intent::FullCourse {
            info!(step = self.step, "full course requested mid-script, forcing delivery");
            self.budget.record_turn(Intent::FullCourse);
            self.completed = true;
            self.messages
                .push(ConversationMessage::system(FORCED_DELIVERY_MESSAGE));
            return Ok(AnswerOutcome::ForcedDelivery(self.builder.snapshot()));
        }

        self.step += 1;
        if self.step >= self.script.len() {
            self.completed = true;
            self.messages
                .push(ConversationMessage::system(COMPLETION_MESSAGE));
            info!("diagnostic script complete");
            return Ok(AnswerOutcome::Completed(self.builder.snapshot()));
        }

        self.emit_current_question();
        Ok(AnswerOutcome::NextQuestion)
    }

    /// Handle one free-text chat message (the probing path).
    ///
    /// The thinking flag wraps only the collaborator call and is cleared on
    /// both the success and failure paths by structured completion of the
    /// single match below.
    pub async fn handle_chat(&mut self, text: &str) -> ChatOutcome {
        self.messages.push(ConversationMessage::user(text));
        self.suggestions.clear();
        self.note_detections(text);

        let intent = self.strategy.classify(text);
        debug!(%intent, "chat turn classified");

        match self.budget.record_turn(intent) {
            TurnOutcome::AnswerDirectly => {
                self.thinking = true;
                let generated = self.text_gen.generate(text).await;
                self.thinking = false;

                let reply = match generated {
                    Ok(answer) => answer,
                    Err(e) => {
                        // Recovered locally; budget and dialogue state are
                        // unaffected by the failure.
                        warn!(error = %e, "text generation failed, using fallback");
                        FALLBACK_ANSWER.to_string()
                    }
                };
                self.messages.push(ConversationMessage::system(reply));
                ChatOutcome::Answered
            }
            TurnOutcome::AskProbe { template, index } => {
                self.messages.push(ConversationMessage::system(template));
                ChatOutcome::Probed { index }
            }
            TurnOutcome::ForceDelivery => {
                self.messages
                    .push(ConversationMessage::system(FORCED_DELIVERY_MESSAGE));
                ChatOutcome::ForceDelivery {
                    topic: self.budget.detected_topic.clone(),
                    level: self
                        .budget
                        .detected_level
                        .map(|l| l.as_str().to_string()),
                }
            }
        }
    }

    /// Explicit start-over: script position, log, chips, budget, detections,
    /// and blueprint are all cleared.
    pub fn start_over(&mut self) {
        info!("dialogue start-over");
        self.step = 0;
        self.completed = false;
        self.thinking = false;
        self.messages.clear();
        self.suggestions.clear();
        self.budget.reset();
        self.builder.reset();
    }

    fn emit_current_question(&mut self) {
        let script = self.script;
        let question = &script[self.step];
        self.messages.push(ConversationMessage::system(question.prompt));
        self.suggestions = if question.has_suggestions() {
            question
                .options
                .iter()
                .take(self.max_suggestions)
                .map(|o| o.to_string())
                .collect()
        } else {
            Vec::new()
        };
    }

    fn note_detections(&mut self, text: &str) {
        self.budget
            .note_detection(self.strategy.extract_topic(text), self.strategy.detect_level(text));
    }

    /// The question currently awaiting an answer, if the script is running.
    pub fn current_question(&self) -> Option<&DiagnosticQuestion> {
        if self.completed {
            None
        } else {
            self.script.get(self.step)
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn blueprint(&self) -> &LearningBlueprint {
        self.builder.blueprint()
    }

    pub fn budget(&self) -> &QuestionBudgetTracker {
        &self.budget
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn snapshot(&self) -> DialogueSnapshot {
        DialogueSnapshot {
            messages: self.messages.clone(),
            suggestions: self.suggestions.clone(),
            thinking: self.thinking,
            completed: self.completed,
        }
    }
}
