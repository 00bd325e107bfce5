//! Onboarding flow sequencing.

pub mod controller;
pub mod state;

pub use controller::{ActiveCourse, FlowSnapshot, OnboardingFlowController};
pub use state::{transition, FlowEffect, FlowEvent, FlowState};
