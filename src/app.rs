use std::sync::mpsc::RecvError;
use std::sync::Arc;

use crate::classifier::interface::ClassifierBackend;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::hand_detector::interface::HandPoseDetector;
use crate::model_registry::ModelRegistry;
use crate::pipeline::runtime::InferenceScheduler;
use crate::prediction_sink::interface::PredictionSink;
use crate::predictor::GesturePredictor;
use crate::trainer::interface::TrainerBackend;
use crate::training::TrainingSessionManager;

/// Explicit wiring of the whole application; everything that needs shared
/// state gets it from here rather than from a global.
pub struct AppContext {
    pub config: Config,
    pub registry: Arc<ModelRegistry>,
    pub scheduler: InferenceScheduler,
    pub training: Arc<TrainingSessionManager>,
}

impl AppContext {
    pub fn new(
        config: Config,
        device_camera: Arc<dyn DeviceCamera>,
        hand_detector: Arc<dyn HandPoseDetector>,
        classifier_backend: Arc<dyn ClassifierBackend>,
        trainer_backend: Arc<dyn TrainerBackend>,
        sink: Arc<dyn PredictionSink>,
    ) -> Self {
        let registry = Arc::new(ModelRegistry::new(&config, classifier_backend));
        let predictor = Arc::new(GesturePredictor::new(registry.clone()));
        let scheduler = InferenceScheduler::new(
            config.clone(),
            device_camera,
            hand_detector,
            predictor,
            sink,
        );
        let training = Arc::new(TrainingSessionManager::new(
            config.clone(),
            trainer_backend,
            registry.clone(),
        ));

        Self {
            config,
            registry,
            scheduler,
            training,
        }
    }

    /// Installs the bundled default model when present, then prefers the
    /// most recently trained one. Neither being available is not an error;
    /// the pipeline simply runs with predictions disabled.
    pub fn activate_startup_model(&self) {
        match self.registry.default_model() {
            Ok(Some(default)) => match self.registry.activate(&default) {
                Ok(()) => tracing::info!(model = %default.name, "default model activated"),
                Err(error) => tracing::warn!(%error, "failed to activate default model"),
            },
            Ok(None) => tracing::info!("no default model found, predictions disabled"),
            Err(error) => tracing::warn!(%error, "failed to resolve default model"),
        }

        if let Err(error) = self.registry.discover() {
            tracing::warn!(%error, "model discovery failed");
        }

        if let Some(last_trained) = self.registry.last_trained() {
            match self.registry.activate(&last_trained) {
                Ok(()) => tracing::info!(model = %last_trained.name, "using last trained model"),
                Err(error) => tracing::warn!(%error, "failed to activate last trained model"),
            }
        }
    }

    pub fn run(&self) -> Result<(), RecvError> {
        self.activate_startup_model();
        self.scheduler.run()
    }
}
