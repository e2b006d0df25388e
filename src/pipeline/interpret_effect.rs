use crate::pipeline::core::{Effect, Event};
use crate::pipeline::runtime::InferenceScheduler;

impl InferenceScheduler {
    pub(super) fn interpret_effect(&self, effect: Effect) {
        tracing::trace!(effect = %effect.to_display_string(), "running effect");

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                while let Ok(event) = events.recv() {
                    if self.event_sender.send(Event::CameraEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Event::Tick).is_err() {
                    break;
                }
            },
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                if let Err(error) = self.device_camera.stop() {
                    tracing::warn!(%error, "camera failed to stop");
                }
            }
            Effect::CaptureFrame => {
                let frame = self.device_camera.latest_frame();
                let _ = self.event_sender.send(Event::FrameCaptureDone(frame));
            }
            Effect::DetectPose { frame } => {
                let detected = self.hand_detector.detect(&frame);
                let _ = self.event_sender.send(Event::DetectDone(detected));
            }
            Effect::Classify { pose } => {
                let classified = self.predictor.predict(&pose);
                let _ = self.event_sender.send(Event::ClassifyDone(classified));
            }
            Effect::Publish(snapshot) => {
                *self.snapshot.lock().unwrap() = snapshot.clone();
                self.sink.publish(&snapshot);
            }
        }
    }
}
