use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::model_registry::ModelRegistry;
use crate::trainer::interface::{
    AugmentationOptions, TrainError, TrainerBackend, TrainingRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Inactive,
    Active,
    Finished,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct TrainingSession {
    pub phase: String,
    pub completed: f64,
    pub state: SessionState,
}

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("training is not supported on this platform")]
    CapabilityUnavailable,
    #[error("a training session is already active")]
    AlreadyActive,
    #[error("model name must not be empty")]
    MissingModelName,
    #[error("dataset {name} does not have enough examples per move")]
    DatasetNotTrainable { name: String },
}

struct SessionSlot {
    session: TrainingSession,
    /// Bumped on every submit and reset; a job completion whose generation
    /// is stale leaves the session alone.
    generation: u64,
}

/// Owns at most one training session at a time: submits the dataset to the
/// opaque trainer, forwards its progress, registers the artifact on success
/// and cancels the underlying job on reset.
pub struct TrainingSessionManager {
    config: Config,
    backend: Arc<dyn TrainerBackend>,
    registry: Arc<ModelRegistry>,
    slot: Arc<Mutex<SessionSlot>>,
    cancel: Mutex<Option<Arc<AtomicBool>>>,
}

impl TrainingSessionManager {
    pub fn new(
        config: Config,
        backend: Arc<dyn TrainerBackend>,
        registry: Arc<ModelRegistry>,
    ) -> Self {
        Self {
            config,
            backend,
            registry,
            slot: Arc::new(Mutex::new(SessionSlot {
                session: TrainingSession::default(),
                generation: 0,
            })),
            cancel: Mutex::new(None),
        }
    }

    pub fn training_supported(&self) -> bool {
        self.config.training_supported
    }

    pub fn session(&self) -> TrainingSession {
        self.slot.lock().unwrap().session.clone()
    }

    /// Submission stays disabled until a model name is chosen and every
    /// move has enough examples.
    pub fn can_submit(&self, model_name: &str, dataset: &Dataset) -> bool {
        !model_name.trim().is_empty()
            && dataset.has_enough_examples(self.config.min_examples_per_move)
    }

    pub fn train(
        &self,
        model_name: &str,
        dataset: &Dataset,
        validation: Option<&Dataset>,
    ) -> Result<(), TrainingError> {
        if !self.config.training_supported {
            return Err(TrainingError::CapabilityUnavailable);
        }
        if model_name.trim().is_empty() {
            return Err(TrainingError::MissingModelName);
        }
        if !dataset.has_enough_examples(self.config.min_examples_per_move) {
            return Err(TrainingError::DatasetNotTrainable {
                name: dataset.name.clone(),
            });
        }

        let generation = {
            let mut slot = self.slot.lock().unwrap();
            if slot.session.state == SessionState::Active {
                return Err(TrainingError::AlreadyActive);
            }
            slot.generation += 1;
            slot.session = TrainingSession {
                phase: "Preparing".to_string(),
                completed: 0.0,
                state: SessionState::Active,
            };
            slot.generation
        };

        let cancel = Arc::new(AtomicBool::new(false));
        *self.cancel.lock().unwrap() = Some(cancel.clone());

        let request = TrainingRequest {
            model_name: model_name.to_string(),
            training_directory: dataset.resource_directory.clone(),
            validation_directory: validation
                .map(|validation| validation.resource_directory.clone()),
            output_path: self
                .config
                .models_dir
                .join(format!("{}.{}", model_name, self.config.model_extension)),
            augmentation: AugmentationOptions::standard(),
        };

        let (progress_tx, progress_rx) = channel::<crate::trainer::interface::TrainingProgress>();

        // Forward progress into the session for as long as this job is the
        // current generation (sempal-style forwarder thread).
        let slot = self.slot.clone();
        std::thread::spawn(move || {
            while let Ok(update) = progress_rx.recv() {
                let mut slot = slot.lock().unwrap();
                if slot.generation == generation && slot.session.state == SessionState::Active {
                    slot.session.phase = update.phase;
                    slot.session.completed = update.completed;
                }
            }
        });

        let backend = self.backend.clone();
        let registry = self.registry.clone();
        let slot = self.slot.clone();
        std::thread::spawn(move || {
            let result = backend.train(&request, progress_tx, &cancel);

            let mut slot = slot.lock().unwrap();
            if slot.generation != generation {
                tracing::debug!("training job finished after reset, discarding result");
                return;
            }
            match result {
                Ok(artifact) => {
                    let info = registry.register_trained(&artifact.path);
                    tracing::info!(model = %info.name, "training finished");
                    slot.session.state = SessionState::Finished;
                    slot.session.completed = 1.0;
                }
                Err(TrainError::Cancelled) => {
                    tracing::info!("training cancelled");
                    slot.session = TrainingSession::default();
                }
                Err(error) => {
                    tracing::warn!(%error, "training failed");
                    slot.session.state = SessionState::Error;
                }
            }
        });

        Ok(())
    }

    /// Valid from any state: cancels an in-progress job and returns the
    /// session to Inactive.
    pub fn reset(&self) {
        {
            let mut slot = self.slot.lock().unwrap();
            slot.generation += 1;
            slot.session = TrainingSession::default();
        }
        if let Some(cancel) = self.cancel.lock().unwrap().take() {
            cancel.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::impl_fake::ClassifierBackendFake;
    use crate::dataset::DatasetKind;
    use crate::trainer::impl_fake::TrainerBackendFake;
    use std::path::Path;
    use std::time::{Duration, Instant};

    fn dataset_with_examples(root: &Path, per_move: usize) -> Dataset {
        let moves = vec!["a".to_string(), "b".to_string()];
        for label in &moves {
            let label_dir = root.join(label);
            std::fs::create_dir_all(&label_dir).unwrap();
            for index in 0..per_move {
                std::fs::write(label_dir.join(format!("{index}.png")), [0u8; 4]).unwrap();
            }
        }
        Dataset::new("letters", DatasetKind::Training, root, &moves)
    }

    fn manager_at(models_dir: &Path, step_delay: Duration) -> TrainingSessionManager {
        let config = Config {
            models_dir: models_dir.to_path_buf(),
            min_examples_per_move: 2,
            ..Config::default()
        };
        let registry = Arc::new(ModelRegistry::new(
            &config,
            Arc::new(ClassifierBackendFake::new()),
        ));
        TrainingSessionManager::new(
            config,
            Arc::new(TrainerBackendFake::with_step_delay(step_delay)),
            registry,
        )
    }

    fn wait_for(manager: &TrainingSessionManager, state: SessionState) -> TrainingSession {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let session = manager.session();
            if session.state == state {
                return session;
            }
            assert!(
                Instant::now() < deadline,
                "timed out waiting for {:?}, last session {:?}",
                state,
                session
            );
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn submission_is_gated_on_name_and_examples() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(1));

        let thin = dataset_with_examples(data.path(), 1);
        assert!(!manager.can_submit("letters-v2", &thin));
        assert!(matches!(
            manager.train("letters-v2", &thin, None),
            Err(TrainingError::DatasetNotTrainable { .. })
        ));

        let full = dataset_with_examples(data.path(), 2);
        assert!(!manager.can_submit("", &full));
        assert!(matches!(
            manager.train("  ", &full, None),
            Err(TrainingError::MissingModelName)
        ));

        assert!(manager.can_submit("letters-v2", &full));
    }

    #[test]
    fn successful_training_registers_the_artifact() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(1));
        let dataset = dataset_with_examples(data.path(), 3);

        manager.train("letters-v2", &dataset, None).unwrap();
        let session = wait_for(&manager, SessionState::Finished);
        assert_eq!(session.completed, 1.0);

        let last = manager.registry.last_trained().unwrap();
        assert_eq!(last.name, "letters-v2");
        assert!(last.path.is_file());
    }

    #[test]
    fn progress_reaches_the_session() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(10));
        let dataset = dataset_with_examples(data.path(), 3);

        manager.train("letters-v2", &dataset, None).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let session = manager.session();
            if session.state == SessionState::Active && !session.phase.is_empty()
                && session.phase != "Preparing"
            {
                break;
            }
            if session.state == SessionState::Finished {
                break;
            }
            assert!(Instant::now() < deadline, "no progress observed");
            std::thread::sleep(Duration::from_millis(2));
        }
        wait_for(&manager, SessionState::Finished);
    }

    #[test]
    fn failed_training_registers_nothing() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        // The artifact cannot be written because the models directory does
        // not exist, so the backend fails after training.
        let missing_models_dir = models.path().join("missing");
        let manager = manager_at(&missing_models_dir, Duration::from_millis(1));
        let dataset = dataset_with_examples(data.path(), 3);

        manager.train("doomed", &dataset, None).unwrap();
        wait_for(&manager, SessionState::Error);
        assert!(manager.registry.last_trained().is_none());
    }

    #[test]
    fn reset_while_active_cancels_and_goes_inactive() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(50));
        let dataset = dataset_with_examples(data.path(), 3);

        manager.train("letters-v2", &dataset, None).unwrap();
        assert_eq!(manager.session().state, SessionState::Active);

        manager.reset();
        assert_eq!(manager.session().state, SessionState::Inactive);

        // The cancelled job must not resurrect the session or register a
        // model once it unwinds.
        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(manager.session().state, SessionState::Inactive);
        assert!(manager.registry.last_trained().is_none());
    }

    #[test]
    fn reset_while_inactive_is_a_no_op() {
        let models = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(1));

        assert_eq!(manager.session().state, SessionState::Inactive);
        manager.reset();
        assert_eq!(manager.session().state, SessionState::Inactive);
    }

    #[test]
    fn training_unsupported_fails_immediately() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let dataset = dataset_with_examples(data.path(), 3);

        let config = Config {
            models_dir: models.path().to_path_buf(),
            min_examples_per_move: 2,
            training_supported: false,
            ..Config::default()
        };
        let registry = Arc::new(ModelRegistry::new(
            &config,
            Arc::new(ClassifierBackendFake::new()),
        ));
        let manager = TrainingSessionManager::new(
            config,
            Arc::new(TrainerBackendFake::new()),
            registry,
        );

        assert!(!manager.training_supported());
        assert!(matches!(
            manager.train("letters-v2", &dataset, None),
            Err(TrainingError::CapabilityUnavailable)
        ));
        assert_eq!(manager.session().state, SessionState::Inactive);
    }

    #[test]
    fn second_submission_while_active_is_rejected() {
        let models = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let manager = manager_at(models.path(), Duration::from_millis(50));
        let dataset = dataset_with_examples(data.path(), 3);

        manager.train("letters-v2", &dataset, None).unwrap();
        assert!(matches!(
            manager.train("letters-v3", &dataset, None),
            Err(TrainingError::AlreadyActive)
        ));
        manager.reset();
    }
}
