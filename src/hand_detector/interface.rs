use thiserror::Error;

use crate::device_camera::interface::Frame;

/// Landmarks per detected hand, matching the vendor detector's layout.
pub const HAND_LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// Full ordered landmark array for one detected hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub keypoints: Vec<Keypoint>,
}

impl HandPose {
    /// Points confident enough to draw. The classifier always receives the
    /// full unfiltered array.
    pub fn display_points(&self, min_confidence: f32) -> Vec<(f32, f32)> {
        self.keypoints
            .iter()
            .filter(|keypoint| keypoint.confidence > min_confidence)
            .map(|keypoint| (keypoint.x, keypoint.y))
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("hand pose request failed: {0}")]
    Backend(String),
}

pub trait HandPoseDetector: Send + Sync {
    /// Detects at most one hand. `None` when no hand is in the frame.
    fn detect(&self, frame: &Frame) -> Result<Option<HandPose>, DetectError>;
}
