//! The learning blueprint: a small typed graph built turn-by-turn from
//! diagnostic answers, plus the radial layout used to display it.

pub mod builder;
pub mod layout;
pub mod model;

pub use builder::BlueprintGraphBuilder;
pub use layout::RadialLayoutEngine;
pub use model::{BlueprintNode, LearningBlueprint, NodeKind, Point};
