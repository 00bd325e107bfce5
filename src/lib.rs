//! Pathlight — conversational onboarding engine for a learning app.
//!
//! Elicits a learner's goals through a bounded multi-turn dialogue, builds a
//! structured learning blueprint graph from the answers, lays the graph out
//! for display, and synthesizes lesson content from outlines. Text and
//! course generation are external collaborators injected through the traits
//! in [`services`].

pub mod blueprint;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod flow;
pub mod intent;
pub mod lesson;
pub mod services;
