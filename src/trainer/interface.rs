use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Sender;

use thiserror::Error;

/// Augmentation applied while training. Fixed policy: all three transforms
/// stay enabled; this is not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AugmentationOptions {
    pub rotate: bool,
    pub translate: bool,
    pub horizontally_flip: bool,
}

impl AugmentationOptions {
    pub fn standard() -> Self {
        Self {
            rotate: true,
            translate: true,
            horizontally_flip: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingRequest {
    pub model_name: String,
    pub training_directory: PathBuf,
    pub validation_directory: Option<PathBuf>,
    /// Where the compiled artifact must be written.
    pub output_path: PathBuf,
    pub augmentation: AugmentationOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingProgress {
    pub phase: String,
    pub completed: f64,
}

#[derive(Debug, Clone)]
pub struct TrainedArtifact {
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training was cancelled")]
    Cancelled,
    #[error("training dataset is invalid: {0}")]
    InvalidDataset(String),
    #[error("failed to write model artifact to {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Opaque long-running trainer. Blocks until done, reporting phase and
/// completion fraction through `progress` and honoring `cancel` between
/// steps.
pub trait TrainerBackend: Send + Sync {
    fn train(
        &self,
        request: &TrainingRequest,
        progress: Sender<TrainingProgress>,
        cancel: &AtomicBool,
    ) -> Result<TrainedArtifact, TrainError>;
}
