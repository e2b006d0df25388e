use std::sync::Arc;

use sign_buddy::app::AppContext;
use sign_buddy::classifier::impl_fake::ClassifierBackendFake;
use sign_buddy::config::Config;
use sign_buddy::device_camera::impl_fake::DeviceCameraFake;
use sign_buddy::hand_detector::impl_fake::HandPoseDetectorFake;
use sign_buddy::labels;
use sign_buddy::logging;
use sign_buddy::prediction_sink::impl_console::PredictionSinkConsole;
use sign_buddy::prediction_sink::interface::PredictionSink;
use sign_buddy::quiz::Quiz;
use sign_buddy::trainer::impl_fake::TrainerBackendFake;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::default();
    seed_default_model(&config)?;

    let sink: Arc<dyn PredictionSink> = if config.quiz_mode {
        Arc::new(PredictionSinkConsole::with_quiz(Quiz::new(
            config.quiz_confidence_threshold,
        )))
    } else {
        Arc::new(PredictionSinkConsole::new())
    };

    let app = AppContext::new(
        config,
        Arc::new(DeviceCameraFake::new()),
        Arc::new(HandPoseDetectorFake::new(0.7)),
        Arc::new(ClassifierBackendFake::new()),
        Arc::new(TrainerBackendFake::new()),
        sink,
    );

    app.run()?;

    Ok(())
}

/// Installs the bundled default artifact on first launch so the demo loop
/// has a model to predict with.
fn seed_default_model(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.models_dir)?;
    let path = config.models_dir.join(&config.default_model_name);
    if !path.exists() {
        std::fs::write(&path, labels::moves().join("\n"))?;
    }
    Ok(())
}
