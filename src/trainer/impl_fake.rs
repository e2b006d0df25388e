use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::trainer::interface::{
    TrainError, TrainedArtifact, TrainerBackend, TrainingProgress, TrainingRequest,
};

const PHASES: &[&str] = &["Extracting keypoints", "Training", "Evaluating"];
const STEPS_PER_PHASE: usize = 4;

/// Fake trainer: walks the phases on a delay, then writes a labels artifact
/// derived from the dataset's move directories.
pub struct TrainerBackendFake {
    step_delay: Duration,
}

impl TrainerBackendFake {
    pub fn new() -> Self {
        Self {
            step_delay: Duration::from_millis(30),
        }
    }

    pub fn with_step_delay(step_delay: Duration) -> Self {
        Self { step_delay }
    }
}

impl TrainerBackend for TrainerBackendFake {
    fn train(
        &self,
        request: &TrainingRequest,
        progress: Sender<TrainingProgress>,
        cancel: &AtomicBool,
    ) -> Result<TrainedArtifact, TrainError> {
        let labels = label_directories(&request.training_directory)?;

        let total_steps = PHASES.len() * STEPS_PER_PHASE;
        for (phase_index, phase) in PHASES.iter().enumerate() {
            for step in 0..STEPS_PER_PHASE {
                if cancel.load(Ordering::SeqCst) {
                    return Err(TrainError::Cancelled);
                }
                let completed = (phase_index * STEPS_PER_PHASE + step) as f64 / total_steps as f64;
                let _ = progress.send(TrainingProgress {
                    phase: phase.to_string(),
                    completed,
                });
                std::thread::sleep(self.step_delay);
            }
        }

        std::fs::write(&request.output_path, labels.join("\n")).map_err(|source| {
            TrainError::WriteArtifact {
                path: request.output_path.clone(),
                source,
            }
        })?;

        Ok(TrainedArtifact {
            path: request.output_path.clone(),
        })
    }
}

fn label_directories(training_directory: &Path) -> Result<Vec<String>, TrainError> {
    let entries = std::fs::read_dir(training_directory)
        .map_err(|source| TrainError::InvalidDataset(source.to_string()))?;

    let mut labels: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    labels.sort();

    if labels.is_empty() {
        return Err(TrainError::InvalidDataset(
            "dataset has no label directories".to_string(),
        ));
    }
    Ok(labels)
}
