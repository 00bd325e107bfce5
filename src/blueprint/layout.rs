//! Radial layout for the blueprint graph.
//!
//! The layout is recomputed in full whenever the node count changes — an
//! O(n) pass over the nodes, never an incremental patch. Pure and
//! idempotent: laying out the same graph twice yields the same positions.

use std::f32::consts::PI;

use tracing::debug;

use super::model::{BlueprintNode, NodeKind, Point};
use crate::config::EngineConfig;

/// Start angle: -π/2 puts the first node at the top of the ring, and
/// increasing angles proceed clockwise in screen coordinates (y down).
const START_ANGLE: f32 = -PI / 2.0;

/// Computes display positions for blueprint nodes.
#[derive(Debug, Clone)]
pub struct RadialLayoutEngine {
    center: Point,
    radius: f32,
    fallback_radius: f32,
}

impl RadialLayoutEngine {
    pub fn new(center: Point, radius: f32, fallback_radius: f32) -> Self {
        Self {
            center,
            radius,
            fallback_radius,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let (cx, cy) = config.container_center();
        Self::new(Point::new(cx, cy), config.layout_radius, config.fallback_radius)
    }

    /// Lay out all nodes: topic at the container center, every other node on
    /// a ring of radius R at equal angular spacing.
    ///
    /// A blueprint with no topic node is malformed but never an error: all
    /// nodes are spaced evenly on a smaller fallback ring instead.
    pub fn layout(&self, nodes: &mut [BlueprintNode]) {
        if nodes.is_empty() {
            return;
        }

        let has_topic = nodes.iter().any(|n| n.kind == NodeKind::Topic);
        if has_topic {
            self.layout_star(nodes);
        } else {
            debug!(count = nodes.len(), "no topic node, using fallback ring layout");
            self.layout_ring(nodes, self.fallback_radius);
        }
    }

    fn layout_star(&self, nodes: &mut [BlueprintNode]) {
        let satellite_count = nodes.iter().filter(|n| n.kind != NodeKind::Topic).count();
        let step = if satellite_count > 0 {
            2.0 * PI / satellite_count as f32
        } else {
            0.0
        };

        let mut index = 0usize;
        for node in nodes.iter_mut() {
            if node.kind == NodeKind::Topic {
                node.position = self.center;
            } else {
                let angle = START_ANGLE + index as f32 * step;
                node.position = Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                );
                index += 1;
            }
        }
    }

    fn layout_ring(&self, nodes: &mut [BlueprintNode], radius: f32) {
        let step = 2.0 * PI / nodes.len() as f32;
        for (index, node) in nodes.iter_mut().enumerate() {
            let angle = START_ANGLE + index as f32 * step;
            node.position = Point::new(
                self.center.x + radius * angle.cos(),
                self.center.y + radius * angle.sin(),
            );
        }
    }
}
