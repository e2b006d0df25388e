pub mod app;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod device_camera;
pub mod hand_detector;
pub mod labels;
pub mod logging;
pub mod metrics;
pub mod model_registry;
pub mod pipeline;
pub mod prediction_sink;
pub mod predictor;
pub mod quiz;
pub mod trainer;
pub mod training;
