//! The diagnostic dialogue: conversation log, question script, probing
//! budget, and the engine that drives them.

pub mod budget;
pub mod engine;
pub mod message;
pub mod script;

pub use budget::{BudgetPhase, QuestionBudgetTracker, TurnOutcome, MAX_PROBES};
pub use engine::{AnswerOutcome, ChatOutcome, DiagnosticDialogueEngine, DialogueSnapshot};
pub use message::{ConversationMessage, Sender};
pub use script::{default_script, DiagnosticQuestion, QuestionKind};
