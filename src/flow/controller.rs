//! The async onboarding flow controller.
//!
//! Owns the flow state and the dialogue engine behind one mutex, executes
//! the effects produced by [`super::state::transition`], and publishes
//! [`FlowSnapshot`]s on a watch channel. The lock is held across
//! collaborator calls, so concurrent inputs are serialized FIFO — the
//! engine never races itself, and nothing here can stall indefinitely on
//! the external generator.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::blueprint::LearningBlueprint;
use crate::config::EngineConfig;
use crate::dialogue::{
    AnswerOutcome, ChatOutcome, DiagnosticDialogueEngine, DialogueSnapshot,
};
use crate::error::Result;
use crate::intent::IntentStrategy;
use crate::lesson::{LessonContent, LessonContentSynthesizer};
use crate::services::{CourseGeneration, TextGeneration};

use super::state::{transition, FlowEffect, FlowEvent, FlowState};

/// The course the classroom displays: outline metadata plus fully
/// synthesized lesson content. Always has at least one lesson.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveCourse {
    pub title: String,
    pub description: String,
    pub lessons: Vec<LessonContent>,
}

/// Point-in-time view published to UI subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub state: FlowState,
    pub blueprint: Option<LearningBlueprint>,
    pub course: Option<ActiveCourse>,
    /// True while a collaborator call is outstanding.
    pub thinking: bool,
    pub dialogue: DialogueSnapshot,
}

struct Inner {
    state: FlowState,
    engine: DiagnosticDialogueEngine,
    blueprint: Option<LearningBlueprint>,
    course: Option<ActiveCourse>,
    generating: bool,
}

/// Sequences avatar selection → diagnostic dialogue → course generation →
/// classroom.
pub struct OnboardingFlowController {
    inner: Mutex<Inner>,
    course_gen: Arc<dyn CourseGeneration>,
    synthesizer: LessonContentSynthesizer,
    tx: watch::Sender<FlowSnapshot>,
}

impl OnboardingFlowController {
    pub fn new(
        config: &EngineConfig,
        strategy: Arc<dyn IntentStrategy>,
        text_gen: Arc<dyn TextGeneration>,
        course_gen: Arc<dyn CourseGeneration>,
    ) -> Self {
        let engine = DiagnosticDialogueEngine::new(config, strategy, text_gen);
        let inner = Inner {
            state: FlowState::SelectingAvatar,
            engine,
            blueprint: None,
            course: None,
            generating: false,
        };
        let (tx, _rx) = watch::channel(Self::snapshot_of(&inner));
        Self {
            inner: Mutex::new(inner),
            course_gen,
            synthesizer: LessonContentSynthesizer::new(),
            tx,
        }
    }

    /// Subscribe to flow snapshots. The receiver always holds the latest.
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.tx.subscribe()
    }

    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state
    }

    pub async fn active_course(&self) -> Option<ActiveCourse> {
        self.inner.lock().await.course.clone()
    }

    pub async fn blueprint(&self) -> Option<LearningBlueprint> {
        self.inner.lock().await.blueprint.clone()
    }

    /// Avatar picked. A pre-filled default blueprint bypasses the dialogue
    /// and goes straight to generation.
    pub async fn select_avatar(&self, prefilled: Option<LearningBlueprint>) {
        let mut inner = self.inner.lock().await;
        self.dispatch(&mut inner, FlowEvent::AvatarSelected { prefilled })
            .await;
    }

    /// Answer the current scripted diagnostic question.
    pub async fn submit_answer(&self, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state != FlowState::DiagnosticDialogue {
            warn!(state = %inner.state, "answer ignored outside the dialogue");
            return Ok(());
        }

        let outcome = inner.engine.submit_answer(text)?;
        match outcome {
            AnswerOutcome::NextQuestion => self.publish(&inner),
            AnswerOutcome::Completed(blueprint)
            | AnswerOutcome::ForcedDelivery(blueprint) => {
                self.dispatch(&mut inner, FlowEvent::DialogueFinished { blueprint })
                    .await;
            }
        }
        Ok(())
    }

    /// Handle a free-text chat message (the probing path).
    ///
    /// Messages arriving while a prior generation call is outstanding wait
    /// on the controller lock — strict FIFO, no cancellation.
    pub async fn handle_chat(&self, text: &str) {
        let mut inner = self.inner.lock().await;
        if inner.state != FlowState::DiagnosticDialogue {
            warn!(state = %inner.state, "chat message ignored outside the dialogue");
            return;
        }

        match inner.engine.handle_chat(text).await {
            ChatOutcome::Answered | ChatOutcome::Probed { .. } => self.publish(&inner),
            ChatOutcome::ForceDelivery { topic, level } => {
                // The chat path carries detections, not a full blueprint;
                // build one from whatever was picked up.
                let mut blueprint = if inner.engine.blueprint().topic_node().is_some() {
                    inner.engine.blueprint().clone()
                } else {
                    LearningBlueprint::prefilled(
                        topic.unwrap_or_else(|| "your topic".to_string()),
                    )
                };
                if let Some(level) = level {
                    blueprint.level = level;
                }
                self.dispatch(&mut inner, FlowEvent::DialogueFinished { blueprint })
                    .await;
            }
        }
    }

    /// Explicit start-over for the dialogue. The flow machine itself has no
    /// backward transitions; outside the dialogue this is a no-op.
    pub async fn start_over(&self) {
        let mut inner = self.inner.lock().await;
        if inner.state != FlowState::DiagnosticDialogue {
            warn!(state = %inner.state, "start-over ignored outside the dialogue");
            return;
        }
        inner.engine.start_over();
        if let Err(e) = inner.engine.open() {
            warn!(error = %e, "failed to reopen dialogue after start-over");
        }
        self.publish(&inner);
    }

    /// The first displayable lesson: the active course's first lesson, or —
    /// when no outline is available yet — the quick-start template.
    pub async fn first_lesson(&self) -> LessonContent {
        let inner = self.inner.lock().await;
        if let Some(course) = &inner.course {
            if let Some(first) = course.lessons.first() {
                return first.clone();
            }
        }
        let topic = inner
            .blueprint
            .as_ref()
            .map(|b| b.topic.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "your topic".to_string());
        self.synthesizer.quick_start(&topic)
    }

    /// Run one event and all the events its effects produce.
    async fn dispatch(&self, inner: &mut Inner, event: FlowEvent) {
        let mut queue = vec![event];
        while let Some(event) = queue.pop() {
            let (next, effects) = transition(inner.state, event);
            if next != inner.state {
                info!(from = %inner.state, to = %next, "flow transition");
            }
            inner.state = next;

            for effect in effects {
                match effect {
                    FlowEffect::OpenDialogue => {
                        if let Err(e) = inner.engine.open() {
                            warn!(error = %e, "failed to open dialogue");
                        }
                    }
                    FlowEffect::AdoptBlueprint(blueprint) => {
                        inner.blueprint = Some(blueprint);
                    }
                    FlowEffect::GenerateCourse { topic } => {
                        inner.generating = true;
                        self.publish(inner);

                        let result = self.course_gen.generate_course(&topic).await;
                        inner.generating = false;

                        let course = match result {
                            Ok(course) => Some(course),
                            Err(e) => {
                                warn!(error = %e, topic = %topic, "course generation failed");
                                None
                            }
                        };
                        queue.push(FlowEvent::CourseGenerated { topic, course });
                    }
                    FlowEffect::ActivateCourse(course) => {
                        let topic = inner
                            .blueprint
                            .as_ref()
                            .map(|b| b.topic.as_str())
                            .unwrap_or("your topic");
                        let lessons = course
                            .lessons
                            .iter()
                            .map(|outline| self.synthesizer.synthesize(outline, topic))
                            .collect();
                        inner.course = Some(ActiveCourse {
                            title: course.title,
                            description: course.description,
                            lessons,
                        });
                    }
                }
            }
        }
        self.publish(inner);
    }

    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(Self::snapshot_of(inner));
    }

    fn snapshot_of(inner: &Inner) -> FlowSnapshot {
        FlowSnapshot {
            state: inner.state,
            blueprint: inner.blueprint.clone(),
            course: inner.course.clone(),
            thinking: inner.generating || inner.engine.is_thinking(),
            dialogue: inner.engine.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::intent::KeywordStrategy;
    use crate::lesson::{ContentKind, LessonOutline};
    use crate::services::GeneratedCourse;

    struct EchoText;

    #[async_trait::async_trait]
    impl TextGeneration for EchoText {
        async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct StubCourses {
        lessons: usize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl CourseGeneration for StubCourses {
        async fn generate_course(
            &self,
            topic: &str,
        ) -> std::result::Result<GeneratedCourse, GenerationError> {
            if self.fail {
                return Err(GenerationError::Network("connection reset".into()));
            }
            Ok(GeneratedCourse {
                title: format!("{topic} course"),
                description: "generated".into(),
                lessons: (0..self.lessons)
                    .map(|i| LessonOutline {
                        title: format!("Lesson {i}"),
                        description: "desc".into(),
                        kind: ContentKind::Text,
                        duration_minutes: 10,
                    })
                    .collect(),
            })
        }
    }

    fn controller(courses: StubCourses) -> OnboardingFlowController {
        OnboardingFlowController::new(
            &EngineConfig::default(),
            Arc::new(KeywordStrategy::new()),
            Arc::new(EchoText),
            Arc::new(courses),
        )
    }

    #[tokio::test]
    async fn avatar_shortcut_reaches_classroom() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        c.select_avatar(Some(LearningBlueprint::prefilled("spanish"))).await;

        assert_eq!(c.state().await, FlowState::ClassroomActive);
        let course = c.active_course().await.unwrap();
        assert_eq!(course.title, "spanish course");
        assert_eq!(course.lessons.len(), 2);
    }

    #[tokio::test]
    async fn avatar_without_blueprint_opens_dialogue() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        c.select_avatar(None).await;

        assert_eq!(c.state().await, FlowState::DiagnosticDialogue);
        let snapshot = c.subscribe().borrow().clone();
        assert_eq!(snapshot.dialogue.messages.len(), 1);
    }

    #[tokio::test]
    async fn full_dialogue_reaches_classroom() {
        let c = controller(StubCourses { lessons: 3, fail: false });
        c.select_avatar(None).await;

        for answer in [
            "I want to learn Swift Programming",
            "build an iphone app",
            "About an hour a day",
            "Hands-on practice",
            "complete beginner",
            "ship my own app",
        ] {
            c.submit_answer(answer).await.unwrap();
        }

        assert_eq!(c.state().await, FlowState::ClassroomActive);
        let blueprint = c.blueprint().await.unwrap();
        assert_eq!(blueprint.topic, "swift programming");
        assert!(c.active_course().await.unwrap().lessons.len() >= 3);
    }

    #[tokio::test]
    async fn empty_course_never_reaches_classroom_empty() {
        let c = controller(StubCourses { lessons: 0, fail: false });
        c.select_avatar(Some(LearningBlueprint::prefilled("chess"))).await;

        assert_eq!(c.state().await, FlowState::ClassroomActive);
        let course = c.active_course().await.unwrap();
        assert!(!course.lessons.is_empty(), "default curriculum must be substituted");
    }

    #[tokio::test]
    async fn failed_generation_substitutes_default_curriculum() {
        let c = controller(StubCourses { lessons: 0, fail: true });
        c.select_avatar(Some(LearningBlueprint::prefilled("chess"))).await;

        assert_eq!(c.state().await, FlowState::ClassroomActive);
        let course = c.active_course().await.unwrap();
        assert!(!course.lessons.is_empty());
        assert!(course.title.contains("chess"));
    }

    #[tokio::test]
    async fn chat_force_delivery_reaches_classroom() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        c.select_avatar(None).await;

        c.handle_chat("teach me everything about databases").await;

        assert_eq!(c.state().await, FlowState::ClassroomActive);
        let blueprint = c.blueprint().await.unwrap();
        assert_eq!(blueprint.topic, "databases");
    }

    #[tokio::test]
    async fn answers_outside_dialogue_are_ignored() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        // Still selecting avatar.
        c.submit_answer("hello").await.unwrap();
        assert_eq!(c.state().await, FlowState::SelectingAvatar);
    }

    #[tokio::test]
    async fn start_over_restarts_the_script() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        c.select_avatar(None).await;
        c.submit_answer("piano").await.unwrap();
        c.submit_answer("play jazz standards").await.unwrap();

        c.start_over().await;
        let snapshot = c.subscribe().borrow().clone();
        assert_eq!(snapshot.dialogue.messages.len(), 1, "log cleared, first question re-emitted");
        assert!(snapshot.blueprint.is_none());
        assert_eq!(c.state().await, FlowState::DiagnosticDialogue);
    }

    #[tokio::test]
    async fn first_lesson_prefers_active_course() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        c.select_avatar(Some(LearningBlueprint::prefilled("go"))).await;
        let lesson = c.first_lesson().await;
        assert_eq!(lesson.title, "Lesson 0");
    }

    #[tokio::test]
    async fn first_lesson_falls_back_to_quick_start() {
        let c = controller(StubCourses { lessons: 2, fail: false });
        let lesson = c.first_lesson().await;
        assert!(lesson.title.contains("Getting Started"));
    }

    #[tokio::test]
    async fn snapshots_are_published_per_turn() {
        let c = controller(StubCourses { lessons: 1, fail: false });
        let mut rx = c.subscribe();
        assert_eq!(rx.borrow().state, FlowState::SelectingAvatar);

        c.select_avatar(None).await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().state, FlowState::DiagnosticDialogue);
    }
}
