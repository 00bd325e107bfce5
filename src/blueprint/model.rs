//! Blueprint graph model types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 2D position in the layout container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Kind of a blueprint node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The root — what the learner wants to learn. Exactly one per blueprint.
    Topic,
    Goal,
    Module,
    Skill,
    Milestone,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Topic => "topic",
            Self::Goal => "goal",
            Self::Module => "module",
            Self::Skill => "skill",
            Self::Milestone => "milestone",
        };
        write!(f, "{s}")
    }
}

/// A typed vertex in the blueprint graph.
///
/// The model permits arbitrary connections, but the builder only ever
/// produces a star: non-topic nodes carry exactly one connection, back to
/// the topic node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintNode {
    pub id: Uuid,
    pub title: String,
    pub kind: NodeKind,
    /// Ids of nodes this node connects to.
    pub connections: Vec<Uuid>,
    /// Display position, filled in by the layout engine.
    pub position: Point,
}

impl BlueprintNode {
    pub fn new(title: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            connections: Vec::new(),
            position: Point::default(),
        }
    }
}

/// The structured capture of a learner's goals, built incrementally during
/// the diagnostic dialogue and handed off as a snapshot when it completes.
///
/// String fields are empty until the corresponding question is answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningBlueprint {
    pub topic: String,
    pub goal: String,
    pub pace: String,
    pub style: String,
    pub level: String,
    pub motivation: String,
    pub nodes: Vec<BlueprintNode>,
}

impl LearningBlueprint {
    /// The topic (root) node, if one has been created yet.
    pub fn topic_node(&self) -> Option<&BlueprintNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Topic)
    }

    /// A minimal pre-filled blueprint, used by the avatar-selection shortcut
    /// that bypasses the dialogue entirely.
    pub fn prefilled(topic: impl Into<String>) -> Self {
        let topic = topic.into();
        let root = BlueprintNode::new(topic.clone(), NodeKind::Topic);
        Self {
            topic,
            level: "beginner".to_string(),
            nodes: vec![root],
            ..Self::default()
        }
    }
}
