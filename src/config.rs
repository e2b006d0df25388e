use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub keypoint_min_confidence: f32,
    pub models_dir: PathBuf,
    pub default_model_name: String,
    pub model_extension: String,
    pub datasets_dir: PathBuf,
    pub min_examples_per_move: usize,
    pub quiz_mode: bool,
    pub quiz_confidence_threshold: f64,
    pub training_supported: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            keypoint_min_confidence: 0.5,
            models_dir: PathBuf::from("models"),
            default_model_name: "asl-classifier.hpc".to_string(),
            model_extension: "hpc".to_string(),
            datasets_dir: PathBuf::from("datasets"),
            min_examples_per_move: 10,
            quiz_mode: false,
            quiz_confidence_threshold: 80.0,
            training_supported: true,
        }
    }
}
