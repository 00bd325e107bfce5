//! Configuration types.

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Radius at which non-topic blueprint nodes are placed.
    pub layout_radius: f32,
    /// Smaller ring radius used when the blueprint has no topic node.
    pub fallback_radius: f32,
    /// Layout container size (nodes are centered in this box).
    pub container_width: f32,
    pub container_height: f32,
    /// Maximum suggestion chips surfaced per question.
    pub max_suggestions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout_radius: 120.0,
            fallback_radius: 80.0,
            container_width: 360.0,
            container_height: 360.0,
            max_suggestions: 4,
        }
    }
}

impl EngineConfig {
    /// Center of the layout container.
    pub fn container_center(&self) -> (f32, f32) {
        (self.container_width / 2.0, self.container_height / 2.0)
    }
}
