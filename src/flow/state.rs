//! The onboarding flow state machine.
//!
//! Implemented as a pure `(State, Event) → (State, Effects)` function: the
//! controller owns the state and executes the effects, and the UI observes
//! snapshots rather than the machine itself. Transitions are strictly
//! one-directional; there are no back-transitions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::blueprint::LearningBlueprint;
use crate::services::{default_curriculum, GeneratedCourse};

/// Where the learner is in onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    SelectingAvatar,
    DiagnosticDialogue,
    GeneratingCourse,
    ClassroomActive,
}

impl FlowState {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: FlowState) -> bool {
        use FlowState::*;
        matches!(
            (self, target),
            (SelectingAvatar, DiagnosticDialogue)
                // Shortcut: avatar selection supplied a pre-filled blueprint.
                | (SelectingAvatar, GeneratingCourse)
                | (DiagnosticDialogue, GeneratingCourse)
                | (GeneratingCourse, ClassroomActive)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ClassroomActive)
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectingAvatar => "selecting_avatar",
            Self::DiagnosticDialogue => "diagnostic_dialogue",
            Self::GeneratingCourse => "generating_course",
            Self::ClassroomActive => "classroom_active",
        };
        write!(f, "{s}")
    }
}

/// Inputs to the flow machine.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// Avatar picked; a pre-filled blueprint bypasses the dialogue entirely.
    AvatarSelected { prefilled: Option<LearningBlueprint> },
    /// The diagnostic dialogue handed off its blueprint (completed or
    /// forced delivery — the machine treats them identically).
    DialogueFinished { blueprint: LearningBlueprint },
    /// Course generation finished. `course` is `None` on collaborator
    /// failure; an empty lesson list is treated the same way.
    CourseGenerated {
        topic: String,
        course: Option<GeneratedCourse>,
    },
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::AvatarSelected { .. } => "avatar_selected",
            Self::DialogueFinished { .. } => "dialogue_finished",
            Self::CourseGenerated { .. } => "course_generated",
        }
    }
}

/// Work the controller must perform after a transition.
#[derive(Debug, Clone)]
pub enum FlowEffect {
    /// Open the diagnostic dialogue (emit its first question).
    OpenDialogue,
    /// Remember this blueprint as the handed-off snapshot.
    AdoptBlueprint(LearningBlueprint),
    /// Invoke the course-generation collaborator for this topic.
    GenerateCourse { topic: String },
    /// Make this course the active one and enter the classroom. Guaranteed
    /// to have a non-empty lesson list.
    ActivateCourse(GeneratedCourse),
}

/// The transition function. Pure: no state is mutated here; invalid events
/// leave the state unchanged and produce no effects.
pub fn transition(state: FlowState, event: FlowEvent) -> (FlowState, Vec<FlowEffect>) {
    match (state, event) {
        (FlowState::SelectingAvatar, FlowEvent::AvatarSelected { prefilled: None }) => {
            (FlowState::DiagnosticDialogue, vec![FlowEffect::OpenDialogue])
        }
        (
            FlowState::SelectingAvatar,
            FlowEvent::AvatarSelected {
                prefilled: Some(blueprint),
            },
        ) => {
            let topic = blueprint.topic.clone();
            (
                FlowState::GeneratingCourse,
                vec![
                    FlowEffect::AdoptBlueprint(blueprint),
                    FlowEffect::GenerateCourse { topic },
                ],
            )
        }
        (FlowState::DiagnosticDialogue, FlowEvent::DialogueFinished { blueprint }) => {
            let topic = blueprint.topic.clone();
            (
                FlowState::GeneratingCourse,
                vec![
                    FlowEffect::AdoptBlueprint(blueprint),
                    FlowEffect::GenerateCourse { topic },
                ],
            )
        }
        (FlowState::GeneratingCourse, FlowEvent::CourseGenerated { topic, course }) => {
            // A failed, missing, or empty-lesson course is silently replaced
            // with the default curriculum; this transition never stalls and
            // never surfaces a hard failure.
            let course = match course {
                Some(c) if c.has_lessons() => c,
                _ => {
                    warn!(topic = %topic, "no usable generated course, substituting default curriculum");
                    default_curriculum(&topic)
                }
            };
            (FlowState::ClassroomActive, vec![FlowEffect::ActivateCourse(course)])
        }
        (state, event) => {
            warn!(state = %state, event = event.name(), "event ignored in this state");
            (state, Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{ContentKind, LessonOutline};

    fn course(lessons: usize) -> GeneratedCourse {
        GeneratedCourse {
            title: "Piano Basics".into(),
            description: "A course".into(),
            lessons: (0..lessons)
                .map(|i| LessonOutline {
                    title: format!("Lesson {i}"),
                    description: "desc".into(),
                    kind: ContentKind::Text,
                    duration_minutes: 10,
                })
                .collect(),
        }
    }

    #[test]
    fn valid_transition_table() {
        use FlowState::*;
        assert!(SelectingAvatar.can_transition_to(DiagnosticDialogue));
        assert!(SelectingAvatar.can_transition_to(GeneratingCourse));
        assert!(DiagnosticDialogue.can_transition_to(GeneratingCourse));
        assert!(GeneratingCourse.can_transition_to(ClassroomActive));

        assert!(ClassroomActive.is_terminal());
        assert!(!GeneratingCourse.is_terminal());
    }

    #[test]
    fn no_backward_transitions() {
        use FlowState::*;
        assert!(!DiagnosticDialogue.can_transition_to(SelectingAvatar));
        assert!(!GeneratingCourse.can_transition_to(DiagnosticDialogue));
        assert!(!ClassroomActive.can_transition_to(GeneratingCourse));
        assert!(!ClassroomActive.can_transition_to(SelectingAvatar));
    }

    #[test]
    fn display_matches_serde() {
        for state in [
            FlowState::SelectingAvatar,
            FlowState::DiagnosticDialogue,
            FlowState::GeneratingCourse,
            FlowState::ClassroomActive,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(format!("\"{state}\""), json);
        }
    }

    #[test]
    fn avatar_without_blueprint_opens_dialogue() {
        let (state, effects) = transition(
            FlowState::SelectingAvatar,
            FlowEvent::AvatarSelected { prefilled: None },
        );
        assert_eq!(state, FlowState::DiagnosticDialogue);
        assert!(matches!(effects.as_slice(), [FlowEffect::OpenDialogue]));
    }

    #[test]
    fn avatar_with_blueprint_skips_dialogue() {
        let bp = LearningBlueprint::prefilled("spanish");
        let (state, effects) = transition(
            FlowState::SelectingAvatar,
            FlowEvent::AvatarSelected { prefilled: Some(bp) },
        );
        assert_eq!(state, FlowState::GeneratingCourse);
        match effects.as_slice() {
            [FlowEffect::AdoptBlueprint(bp), FlowEffect::GenerateCourse { topic }] => {
                assert_eq!(bp.topic, "spanish");
                assert_eq!(topic, "spanish");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn dialogue_finish_starts_generation() {
        let bp = LearningBlueprint::prefilled("chess");
        let (state, effects) = transition(
            FlowState::DiagnosticDialogue,
            FlowEvent::DialogueFinished { blueprint: bp },
        );
        assert_eq!(state, FlowState::GeneratingCourse);
        assert!(matches!(
            effects.as_slice(),
            [FlowEffect::AdoptBlueprint(_), FlowEffect::GenerateCourse { .. }]
        ));
    }

    #[test]
    fn generated_course_activates_classroom() {
        let (state, effects) = transition(
            FlowState::GeneratingCourse,
            FlowEvent::CourseGenerated {
                topic: "piano".into(),
                course: Some(course(3)),
            },
        );
        assert_eq!(state, FlowState::ClassroomActive);
        match effects.as_slice() {
            [FlowEffect::ActivateCourse(c)] => assert_eq!(c.lessons.len(), 3),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn empty_course_is_replaced_with_default_curriculum() {
        let (state, effects) = transition(
            FlowState::GeneratingCourse,
            FlowEvent::CourseGenerated {
                topic: "piano".into(),
                course: Some(course(0)),
            },
        );
        assert_eq!(state, FlowState::ClassroomActive);
        match effects.as_slice() {
            [FlowEffect::ActivateCourse(c)] => {
                assert!(c.has_lessons());
                assert!(c.title.contains("piano"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn missing_course_is_replaced_with_default_curriculum() {
        let (state, effects) = transition(
            FlowState::GeneratingCourse,
            FlowEvent::CourseGenerated {
                topic: "piano".into(),
                course: None,
            },
        );
        assert_eq!(state, FlowState::ClassroomActive);
        assert!(matches!(effects.as_slice(), [FlowEffect::ActivateCourse(c)] if c.has_lessons()));
    }

    #[test]
    fn invalid_events_are_ignored() {
        let (state, effects) = transition(
            FlowState::ClassroomActive,
            FlowEvent::AvatarSelected { prefilled: None },
        );
        assert_eq!(state, FlowState::ClassroomActive);
        assert!(effects.is_empty());

        let (state, effects) = transition(
            FlowState::SelectingAvatar,
            FlowEvent::CourseGenerated {
                topic: "x".into(),
                course: None,
            },
        );
        assert_eq!(state, FlowState::SelectingAvatar);
        assert!(effects.is_empty());
    }
}
