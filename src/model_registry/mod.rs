use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::classifier::interface::{
    ClassifierBackend, ClassifyError, LoadedModel, ModelLoadError, Prediction,
};
use crate::config::Config;
use crate::hand_detector::interface::HandPose;

/// Identity and metadata of one compiled model artifact. Identity is the
/// path; two infos with the same path are the same model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_default: bool,
}

/// The currently installed classifier. In-flight predictions hold the `Arc`
/// they captured, so a swap never mixes two models within one call.
pub struct ActiveModel {
    pub info: ModelInfo,
    model: LoadedModel,
    backend: Arc<dyn ClassifierBackend>,
}

impl ActiveModel {
    pub fn infer(&self, pose: &HandPose) -> Result<Prediction, ClassifyError> {
        self.backend.infer(&self.model, pose)
    }

    pub fn labels(&self) -> &[String] {
        &self.model.labels
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read models directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] ModelLoadError),
}

pub struct ModelRegistry {
    models_dir: PathBuf,
    default_model_name: String,
    model_extension: String,
    backend: Arc<dyn ClassifierBackend>,
    known: Mutex<BTreeMap<PathBuf, ModelInfo>>,
    active: RwLock<Option<Arc<ActiveModel>>>,
}

impl ModelRegistry {
    pub fn new(config: &Config, backend: Arc<dyn ClassifierBackend>) -> Self {
        Self {
            models_dir: config.models_dir.clone(),
            default_model_name: config.default_model_name.clone(),
            model_extension: config.model_extension.clone(),
            backend,
            known: Mutex::new(BTreeMap::new()),
            active: RwLock::new(None),
        }
    }

    /// Scans the models directory for artifacts not already known. Inserts
    /// and returns only the new ones; a second scan with nothing added on
    /// disk returns an empty list.
    pub fn discover(&self) -> Result<Vec<ModelInfo>, RegistryError> {
        let entries =
            std::fs::read_dir(&self.models_dir).map_err(|source| RegistryError::ReadDir {
                path: self.models_dir.clone(),
                source,
            })?;

        let mut candidates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches_extension = path
                .extension()
                .and_then(|extension| extension.to_str())
                .map(|extension| extension == self.model_extension)
                .unwrap_or(false);
            if matches_extension {
                candidates.push(self.model_info_from_path(&path));
            }
        }

        let mut known = self.known.lock().unwrap();
        let mut new_models = Vec::new();
        for info in candidates {
            if known.contains_key(&info.path) {
                continue;
            }
            known.insert(info.path.clone(), info.clone());
            new_models.push(info);
        }
        Ok(new_models)
    }

    /// Resolves the bundled default model by its well-known file name.
    /// `Ok(None)` when it is absent; callers degrade rather than fail.
    pub fn default_model(&self) -> Result<Option<ModelInfo>, RegistryError> {
        let path = self.models_dir.join(&self.default_model_name);
        if !path.is_file() {
            return Ok(None);
        }
        let info = self.model_info_from_path(&path);
        self.insert(info.clone());
        Ok(Some(info))
    }

    /// Most recently created non-default model, or `None` when nothing has
    /// been trained or discovered yet.
    pub fn last_trained(&self) -> Option<ModelInfo> {
        let known = self.known.lock().unwrap();
        known
            .values()
            .filter(|info| !info.is_default)
            .max_by_key(|info| info.created_at)
            .cloned()
    }

    pub fn known_models(&self) -> Vec<ModelInfo> {
        self.known.lock().unwrap().values().cloned().collect()
    }

    /// Set semantics keyed by path: returns false without touching the set
    /// when the model is already known.
    pub fn insert(&self, info: ModelInfo) -> bool {
        let mut known = self.known.lock().unwrap();
        if known.contains_key(&info.path) {
            return false;
        }
        known.insert(info.path.clone(), info);
        true
    }

    /// Loads the artifact and installs it as the active model in one swap.
    /// Predictions already running keep the model they captured.
    pub fn activate(&self, info: &ModelInfo) -> Result<(), RegistryError> {
        let model = self.backend.load(&info.path)?;
        self.insert(info.clone());
        let active = ActiveModel {
            info: info.clone(),
            model,
            backend: self.backend.clone(),
        };
        *self.active.write().unwrap() = Some(Arc::new(active));
        Ok(())
    }

    pub fn active(&self) -> Option<Arc<ActiveModel>> {
        self.active.read().unwrap().clone()
    }

    /// Registers a freshly trained artifact into the known set.
    pub fn register_trained(&self, path: &Path) -> ModelInfo {
        let info = self.model_info_from_path(path);
        self.insert(info.clone());
        info
    }

    fn model_info_from_path(&self, path: &Path) -> ModelInfo {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unnamed")
            .to_string();
        let is_default = path
            .file_name()
            .and_then(|file_name| file_name.to_str())
            .map(|file_name| file_name == self.default_model_name)
            .unwrap_or(false);
        let created_at = std::fs::metadata(path)
            .and_then(|metadata| metadata.created().or_else(|_| metadata.modified()))
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        ModelInfo {
            path: path.to_path_buf(),
            name,
            created_at,
            is_default,
        }
    }
}
