use crate::classifier::interface::{ClassifyError, Prediction};
use crate::config::Config;
use crate::device_camera::interface::{CameraError, DeviceCameraEvent, Frame};
use crate::hand_detector::interface::{DetectError, HandPose};
use crate::metrics::PredictionMetrics;

/// Everything the UI observes about the latest completed inference,
/// published as one value so label, confidence, probabilities and pose can
/// never be seen half-updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionSnapshot {
    pub hand_in_frame: bool,
    pub node_points: Vec<(f32, f32)>,
    pub label: String,
    pub confidence: String,
    pub metrics: PredictionMetrics,
}

impl PredictionSnapshot {
    /// The hand-absent state: nothing to draw, nothing predicted.
    pub fn reset() -> Self {
        Self::default()
    }

    pub fn classified(config: &Config, pose: &HandPose, prediction: &Prediction) -> Self {
        Self {
            hand_in_frame: true,
            node_points: pose.display_points(config.keypoint_min_confidence),
            label: prediction.display_label(),
            confidence: prediction.confidence_percent(),
            metrics: PredictionMetrics::from_probabilities(&prediction.probabilities),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    CameraStarting,
    /// Ready for the next frame; the only state that accepts one.
    Idle,
    Capturing,
    Detecting,
    Classifying { pose: HandPose },
    Paused,
}

#[derive(Debug)]
pub enum Event {
    Tick,
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), CameraError>),
    /// A frame pushed from outside the tick cadence.
    FrameSubmitted(Frame),
    FrameCaptureDone(Result<Option<Frame>, CameraError>),
    DetectDone(Result<Option<HandPose>, DetectError>),
    /// `Ok(None)` means no model is active.
    ClassifyDone(Result<Option<Prediction>, ClassifyError>),
    PauseChanged(bool),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::FrameSubmitted(_) => "FrameSubmitted(..)".to_string(),
            Event::FrameCaptureDone(Ok(Some(_))) => "FrameCaptureDone(Ok(Some(..)))".to_string(),
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToCameraEvents,
    SubscribeTick,
    StartCamera,
    StopCamera,
    CaptureFrame,
    DetectPose { frame: Frame },
    Classify { pose: HandPose },
    Publish(PredictionSnapshot),
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::DetectPose { .. } => "DetectPose { .. }".to_string(),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State::CameraStarting,
        vec![Effect::SubscribeToCameraEvents, Effect::SubscribeTick],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // Camera lifecycle
        (State::CameraStarting, Event::CameraEvent(DeviceCameraEvent::Connected)) => {
            (State::CameraStarting, vec![Effect::StartCamera])
        }
        (State::CameraStarting, Event::CameraStartDone(Ok(()))) => (State::Idle, vec![]),
        (State::CameraStarting, Event::CameraStartDone(Err(_))) => (State::CameraStarting, vec![]),

        // Sampling cadence. A tick or a submitted frame is accepted only
        // while idle; in every in-flight state the frame is dropped, which
        // keeps at most one inference running no matter the frame rate.
        (State::Idle, Event::Tick) => (State::Capturing, vec![Effect::CaptureFrame]),
        (State::Idle, Event::FrameSubmitted(frame)) => {
            (State::Detecting, vec![Effect::DetectPose { frame }])
        }
        (State::Capturing, Event::FrameCaptureDone(Ok(Some(frame)))) => {
            (State::Detecting, vec![Effect::DetectPose { frame }])
        }
        (State::Capturing, Event::FrameCaptureDone(Ok(None))) => (State::Idle, vec![]),
        (State::Capturing, Event::FrameCaptureDone(Err(_))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),

        // Detection. Absence and detector failure take the same path: clear
        // everything rather than leave a stale prediction visible.
        (State::Detecting, Event::DetectDone(Ok(Some(pose)))) => (
            State::Classifying { pose: pose.clone() },
            vec![Effect::Classify { pose }],
        ),
        (State::Detecting, Event::DetectDone(Ok(None))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),
        (State::Detecting, Event::DetectDone(Err(_))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),

        // Classification. The snapshot is built here so one transition
        // carries pose, label, confidence and distribution together.
        (State::Classifying { pose }, Event::ClassifyDone(Ok(Some(prediction)))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::classified(
                config,
                &pose,
                &prediction,
            ))],
        ),
        (State::Classifying { .. }, Event::ClassifyDone(Ok(None))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),
        (State::Classifying { .. }, Event::ClassifyDone(Err(_))) => (
            State::Idle,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),

        // Pause stops the camera explicitly; resume restarts it from
        // scratch. In-flight work may still complete and is dropped below.
        (State::Paused, Event::PauseChanged(true)) => (State::Paused, vec![]),
        (_, Event::PauseChanged(true)) => (
            State::Paused,
            vec![
                Effect::StopCamera,
                Effect::Publish(PredictionSnapshot::reset()),
            ],
        ),
        (State::Paused, Event::PauseChanged(false)) => {
            (State::CameraStarting, vec![Effect::StartCamera])
        }

        (State::Paused, _) => (State::Paused, vec![]),
        (_, Event::CameraEvent(DeviceCameraEvent::Disconnected)) => (
            State::CameraStarting,
            vec![Effect::Publish(PredictionSnapshot::reset())],
        ),

        // Default case
        (state, _) => (state, vec![]),
    }
}
