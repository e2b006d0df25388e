use rand::Rng;

use crate::device_camera::interface::Frame;
use crate::hand_detector::interface::{
    DetectError, HandPose, HandPoseDetector, Keypoint, HAND_LANDMARK_COUNT,
};

pub struct HandPoseDetectorFake {
    presence_rate: f64,
}

impl HandPoseDetectorFake {
    pub fn new(presence_rate: f64) -> Self {
        Self { presence_rate }
    }

    pub fn always_present() -> Self {
        Self::new(1.0)
    }

    pub fn never_present() -> Self {
        Self::new(0.0)
    }
}

impl HandPoseDetector for HandPoseDetectorFake {
    fn detect(&self, _frame: &Frame) -> Result<Option<HandPose>, DetectError> {
        let mut rng = rand::rng();

        if !rng.random_bool(self.presence_rate) {
            return Ok(None);
        }

        let keypoints = (0..HAND_LANDMARK_COUNT)
            .map(|_| Keypoint {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                confidence: rng.random_range(0.3..1.0),
            })
            .collect();

        Ok(Some(HandPose { keypoints }))
    }
}
