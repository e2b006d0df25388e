use std::sync::mpsc::{channel, Receiver, RecvError, Sender};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::device_camera::interface::{DeviceCamera, Frame};
use crate::hand_detector::interface::HandPoseDetector;
use crate::pipeline::core::{init, transition, Event, PredictionSnapshot, State};
use crate::prediction_sink::interface::PredictionSink;
use crate::predictor::GesturePredictor;

/// Drives the frame-sampling loop: one event-loop thread owns the state
/// machine, every effect runs on its own spawned thread and reports back
/// through the event channel.
#[derive(Clone)]
pub struct InferenceScheduler {
    pub(super) config: Config,
    pub(super) device_camera: Arc<dyn DeviceCamera>,
    pub(super) hand_detector: Arc<dyn HandPoseDetector>,
    pub(super) predictor: Arc<GesturePredictor>,
    pub(super) sink: Arc<dyn PredictionSink>,
    pub(super) event_sender: Sender<Event>,
    event_receiver: Arc<Mutex<Receiver<Event>>>,
    state: Arc<Mutex<State>>,
    pub(super) snapshot: Arc<Mutex<PredictionSnapshot>>,
}

impl InferenceScheduler {
    pub fn new(
        config: Config,
        device_camera: Arc<dyn DeviceCamera>,
        hand_detector: Arc<dyn HandPoseDetector>,
        predictor: Arc<GesturePredictor>,
        sink: Arc<dyn PredictionSink>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let (initial_state, _) = init();
        Self {
            config,
            device_camera,
            hand_detector,
            predictor,
            sink,
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            state: Arc::new(Mutex::new(initial_state)),
            snapshot: Arc::new(Mutex::new(PredictionSnapshot::reset())),
        }
    }

    /// Fire-and-forget frame submission. Dropped unless the scheduler is
    /// idle, so a burst of calls never queues inference work.
    pub fn submit(&self, frame: Frame) {
        let _ = self.event_sender.send(Event::FrameSubmitted(frame));
    }

    pub fn set_paused(&self, paused: bool) {
        let _ = self.event_sender.send(Event::PauseChanged(paused));
    }

    /// Latest atomically published prediction state.
    pub fn snapshot(&self) -> PredictionSnapshot {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn state(&self) -> State {
        self.state.lock().unwrap().clone()
    }

    pub(super) fn spawn_effects(&self, effects: Vec<crate::pipeline::core::Effect>) {
        for effect in effects {
            // Publishing stays on the event-loop thread so snapshots apply
            // in completion order; everything else may block and gets its
            // own thread.
            if matches!(effect, crate::pipeline::core::Effect::Publish(_)) {
                self.interpret_effect(effect);
                continue;
            }
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.interpret_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), RecvError> {
        let (initial_state, initial_effects) = init();
        *self.state.lock().unwrap() = initial_state;

        self.spawn_effects(initial_effects);

        loop {
            let event = self.event_receiver.lock().unwrap().recv()?;
            log_event(&event);

            let current_state = self.state.lock().unwrap().clone();
            let (new_state, effects) = transition(&self.config, current_state, event);
            *self.state.lock().unwrap() = new_state;

            self.spawn_effects(effects);
        }
    }
}

/// Per-frame failures are contained here: logged, never propagated.
fn log_event(event: &Event) {
    match event {
        Event::CameraStartDone(Err(error)) => {
            tracing::warn!(%error, "camera failed to start");
        }
        Event::FrameCaptureDone(Err(error)) => {
            tracing::warn!(%error, "frame capture failed");
        }
        Event::DetectDone(Err(error)) => {
            tracing::warn!(%error, "hand pose detection failed, treating as no hand");
        }
        Event::ClassifyDone(Err(error)) => {
            tracing::warn!(%error, "classification failed, dropping frame");
        }
        event => {
            tracing::trace!(event = %event.to_display_string(), "processing event");
        }
    }
}
