//! Error types for the onboarding engine.
//!
//! Nothing in this core is fatal for the learner: classification ambiguity,
//! backend failures, empty generated courses, and malformed blueprints all
//! have local recovery paths. The types here exist so collaborators and
//! callers can still observe *what* went wrong.

/// Top-level error type for the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Dialogue error: {0}")]
    Dialogue(#[from] DialogueError),
}

/// Failures from the external text/course generation collaborators.
///
/// Streaming, auth, and retry policy belong to the collaborator; this crate
/// only distinguishes "the network ate it" from "the backend said no".
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Dialogue-engine errors.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("Dialogue already completed; start over to run it again")]
    AlreadyCompleted,

    #[error("Empty diagnostic script")]
    EmptyScript,
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
