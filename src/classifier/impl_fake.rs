use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;

use crate::classifier::interface::{
    ClassifierBackend, ClassifyError, LoadedModel, ModelLoadError, Prediction,
};
use crate::hand_detector::interface::{HandPose, HAND_LANDMARK_COUNT};

/// Fake backend whose "compiled artifacts" are text files listing one label
/// per line.
pub struct ClassifierBackendFake {}

impl ClassifierBackendFake {
    pub fn new() -> Self {
        Self {}
    }
}

impl ClassifierBackend for ClassifierBackendFake {
    fn load(&self, path: &Path) -> Result<LoadedModel, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let labels: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if labels.is_empty() {
            return Err(ModelLoadError::Malformed {
                path: path.to_path_buf(),
                reason: "artifact lists no labels".to_string(),
            });
        }

        Ok(LoadedModel {
            path: path.to_path_buf(),
            labels,
        })
    }

    fn infer(&self, model: &LoadedModel, pose: &HandPose) -> Result<Prediction, ClassifyError> {
        if pose.keypoints.len() != HAND_LANDMARK_COUNT {
            return Err(ClassifyError::MalformedInput {
                got: pose.keypoints.len(),
                expected: HAND_LANDMARK_COUNT,
            });
        }

        let mut rng = rand::rng();
        let mut probabilities = BTreeMap::new();
        let mut total = 0.0;
        for label in &model.labels {
            let weight: f64 = rng.random_range(0.01..1.0);
            probabilities.insert(label.clone(), weight);
            total += weight;
        }
        for probability in probabilities.values_mut() {
            *probability /= total;
        }

        let label = Prediction::top_label(&probabilities)
            .map(|(label, _)| label.to_string())
            .ok_or_else(|| ClassifyError::Backend("model has no labels".to_string()))?;

        Ok(Prediction {
            label,
            probabilities,
        })
    }
}
