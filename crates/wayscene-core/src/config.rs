//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the animation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds for the leading edge to traverse one segment.
    pub segment_duration: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            segment_duration: 2.0,
        }
    }
}
