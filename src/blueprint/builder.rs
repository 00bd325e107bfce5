//! Incremental blueprint construction from diagnostic answers.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::intent::IntentStrategy;

use super::layout::RadialLayoutEngine;
use super::model::{BlueprintNode, LearningBlueprint, NodeKind};

/// Builds the blueprint graph turn-by-turn.
///
/// The first node created is the topic root with no outgoing connections;
/// every node created after it gets exactly one connection back to the root,
/// so the graph is a star in practice. The full radial layout is recomputed
/// after every structural change.
pub struct BlueprintGraphBuilder {
    blueprint: LearningBlueprint,
    strategy: Arc<dyn IntentStrategy>,
    layout: RadialLayoutEngine,
    topic_id: Option<Uuid>,
}

impl BlueprintGraphBuilder {
    pub fn new(strategy: Arc<dyn IntentStrategy>, layout: RadialLayoutEngine) -> Self {
        Self {
            blueprint: LearningBlueprint::default(),
            strategy,
            layout,
            topic_id: None,
        }
    }

    /// Route a diagnostic answer into the blueprint, keyed by question id.
    ///
    /// Unknown ids are ignored with a warning — a script/builder mismatch
    /// should never halt the dialogue.
    pub fn record_answer(&mut self, question_id: &str, answer: &str) {
        let answer = answer.trim();
        if answer.is_empty() {
            return;
        }

        match question_id {
            "interests" => {
                let topic = self
                    .strategy
                    .extract_topic(answer)
                    .unwrap_or_else(|| answer.to_lowercase());
                debug!(topic = %topic, "recording topic");
                self.blueprint.topic = topic.clone();
                self.add_node(topic, NodeKind::Topic);
            }
            "goal" => {
                self.blueprint.goal = answer.to_string();
                self.add_node(answer.to_string(), NodeKind::Goal);
            }
            "timeline" => {
                self.blueprint.pace = answer.to_string();
            }
            "style" => {
                self.blueprint.style = answer.to_string();
            }
            "experience" => {
                let level = self
                    .strategy
                    .detect_level(answer)
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_else(|| answer.to_lowercase());
                self.blueprint.level = level.clone();
                self.add_node(format!("{level} level"), NodeKind::Skill);
            }
            "motivation" => {
                self.blueprint.motivation = answer.to_string();
                self.add_node(answer.to_string(), NodeKind::Milestone);
            }
            other => {
                warn!(question_id = other, "unknown question id, answer ignored");
            }
        }
    }

    /// Add a node, wiring non-topic nodes back to the root and recomputing
    /// the layout.
    fn add_node(&mut self, title: String, kind: NodeKind) {
        if kind == NodeKind::Topic && self.topic_id.is_some() {
            // Exactly one topic node: a repeated interests answer retitles
            // the existing root instead of adding a second one.
            if let Some(root) = self
                .blueprint
                .nodes
                .iter_mut()
                .find(|n| n.kind == NodeKind::Topic)
            {
                root.title = title;
            }
            return;
        }

        let mut node = BlueprintNode::new(title, kind);
        if kind == NodeKind::Topic {
            self.topic_id = Some(node.id);
        } else if let Some(root_id) = self.topic_id {
            node.connections.push(root_id);
        }
        self.blueprint.nodes.push(node);
        self.layout.layout(&mut self.blueprint.nodes);
    }

    /// Current blueprint (live reference).
    pub fn blueprint(&self) -> &LearningBlueprint {
        &self.blueprint
    }

    /// Clone the blueprint for handoff to the controller.
    pub fn snapshot(&self) -> LearningBlueprint {
        self.blueprint.clone()
    }

    /// Discard all progress (explicit start-over).
    pub fn reset(&mut self) {
        self.blueprint = LearningBlueprint::default();
        self.topic_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::model::Point;
    use crate::intent::KeywordStrategy;

    fn builder() -> BlueprintGraphBuilder {
        BlueprintGraphBuilder::new(
            Arc::new(KeywordStrategy::new()),
            RadialLayoutEngine::new(Point::new(0.0, 0.0), 100.0, 60.0),
        )
    }

    #[test]
    fn interests_answer_creates_single_topic_node() {
        let mut b = builder();
        b.record_answer("interests", "I want to learn Swift Programming");

        let bp = b.blueprint();
        assert_eq!(bp.topic, "swift programming");
        let topics: Vec<_> = bp.nodes.iter().filter(|n| n.kind == NodeKind::Topic).collect();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "swift programming");
        assert!(topics[0].connections.is_empty());
    }

    #[test]
    fn later_nodes_connect_back_to_root() {
        let mut b = builder();
        b.record_answer("interests", "guitar");
        b.record_answer("goal", "play at open mics");
        b.record_answer("experience", "complete beginner");
        b.record_answer("motivation", "always wanted to");

        let bp = b.blueprint();
        let root_id = bp.topic_node().unwrap().id;
        assert_eq!(bp.nodes.len(), 4);
        for node in bp.nodes.iter().filter(|n| n.kind != NodeKind::Topic) {
            assert_eq!(node.connections, vec![root_id], "{} must link to root", node.title);
        }
    }

    #[test]
    fn timeline_and_style_set_fields_without_nodes() {
        let mut b = builder();
        b.record_answer("interests", "chess");
        b.record_answer("timeline", "30 minutes a day");
        b.record_answer("style", "hands-on practice");

        let bp = b.blueprint();
        assert_eq!(bp.pace, "30 minutes a day");
        assert_eq!(bp.style, "hands-on practice");
        assert_eq!(bp.nodes.len(), 1);
    }

    #[test]
    fn experience_answer_maps_level_keyword() {
        let mut b = builder();
        b.record_answer("interests", "painting");
        b.record_answer("experience", "I have some experience already");
        assert_eq!(b.blueprint().level, "intermediate");
    }

    #[test]
    fn repeated_interests_answer_keeps_one_root() {
        let mut b = builder();
        b.record_answer("interests", "spanish");
        b.record_answer("interests", "i want to learn italian");

        let bp = b.blueprint();
        let topics: Vec<_> = bp.nodes.iter().filter(|n| n.kind == NodeKind::Topic).collect();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "italian");
        assert_eq!(bp.topic, "italian");
    }

    #[test]
    fn unknown_question_id_is_ignored() {
        let mut b = builder();
        b.record_answer("favorite_color", "blue");
        assert_eq!(b.blueprint(), &LearningBlueprint::default());
    }

    #[test]
    fn empty_answer_is_ignored() {
        let mut b = builder();
        b.record_answer("interests", "   ");
        assert!(b.blueprint().nodes.is_empty());
    }

    #[test]
    fn layout_runs_after_each_node() {
        let mut b = builder();
        b.record_answer("interests", "astronomy");
        b.record_answer("goal", "identify constellations");

        let bp = b.blueprint();
        let root = bp.topic_node().unwrap();
        assert_eq!(root.position, Point::new(0.0, 0.0));
        let goal = bp.nodes.iter().find(|n| n.kind == NodeKind::Goal).unwrap();
        assert!((goal.position.distance_to(root.position) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut b = builder();
        b.record_answer("interests", "baking");
        b.record_answer("goal", "sourdough");
        b.reset();
        assert_eq!(b.blueprint(), &LearningBlueprint::default());

        // Root is re-created cleanly after a reset.
        b.record_answer("interests", "roasting");
        assert_eq!(b.blueprint().nodes.len(), 1);
    }
}
