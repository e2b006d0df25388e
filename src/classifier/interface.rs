use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::hand_detector::interface::HandPose;

/// One classification outcome: the predicted label plus the probability the
/// model assigned to every label it knows. Probabilities need not sum to
/// exactly 1 due to rounding inside the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probabilities: BTreeMap<String, f64>,
}

impl Prediction {
    /// Highest-probability label. Ties resolve to the lexicographically
    /// first label, which the ordered map makes deterministic.
    pub fn top_label(probabilities: &BTreeMap<String, f64>) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, probability) in probabilities {
            if best.map_or(true, |(_, current)| *probability > current) {
                best = Some((label.as_str(), *probability));
            }
        }
        best
    }

    pub fn max_probability(&self) -> f64 {
        Self::top_label(&self.probabilities)
            .map(|(_, probability)| probability)
            .unwrap_or(0.0)
    }

    /// Max probability rounded to the nearest percent, e.g. "91%".
    pub fn confidence_percent(&self) -> String {
        format!("{}%", (self.max_probability() * 100.0).round() as i64)
    }

    /// Label title-cased for display.
    pub fn display_label(&self) -> String {
        let mut chars = self.label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// A compiled model artifact loaded into memory, ready for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub labels: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {path}")]
    NotFound { path: PathBuf },
    #[error("model artifact at {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },
    #[error("failed to read model artifact at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("pose has {got} landmarks, expected {expected}")]
    MalformedInput { got: usize, expected: usize },
    #[error("classifier backend failure: {0}")]
    Backend(String),
}

pub trait ClassifierBackend: Send + Sync {
    fn load(&self, path: &Path) -> Result<LoadedModel, ModelLoadError>;
    fn infer(&self, model: &LoadedModel, pose: &HandPose) -> Result<Prediction, ClassifyError>;
}
