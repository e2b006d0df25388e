use std::sync::Arc;

use crate::classifier::interface::{ClassifyError, Prediction};
use crate::hand_detector::interface::HandPose;
use crate::model_registry::ModelRegistry;

/// Classifies poses against whichever model is active at call time. Each
/// call commits to the model reference captured at its start, so a
/// concurrent hot-swap never mixes two models within one prediction.
pub struct GesturePredictor {
    registry: Arc<ModelRegistry>,
}

impl GesturePredictor {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// `Ok(None)` when no model is active; predictions stay disabled until
    /// one is activated.
    pub fn predict(&self, pose: &HandPose) -> Result<Option<Prediction>, ClassifyError> {
        let Some(active) = self.registry.active() else {
            return Ok(None);
        };
        active.infer(pose).map(Some)
    }
}
