use std::collections::BTreeMap;

use crate::classifier::interface::{ClassifyError, Prediction};
use crate::config::Config;
use crate::device_camera::interface::DeviceCameraEvent;
use crate::hand_detector::interface::{DetectError, HandPose, Keypoint, HAND_LANDMARK_COUNT};
use crate::pipeline::core::{init, transition, Effect, Event, PredictionSnapshot, State};

fn pose() -> HandPose {
    let mut keypoints = Vec::new();
    for index in 0..HAND_LANDMARK_COUNT {
        keypoints.push(Keypoint {
            x: index as f32 / HAND_LANDMARK_COUNT as f32,
            y: 0.5,
            confidence: if index % 2 == 0 { 0.9 } else { 0.2 },
        });
    }
    HandPose { keypoints }
}

fn prediction() -> Prediction {
    let mut probabilities = BTreeMap::new();
    probabilities.insert("a".to_string(), 0.42);
    probabilities.insert("b".to_string(), 0.91);
    probabilities.insert("c".to_string(), 0.07);
    Prediction {
        label: "b".to_string(),
        probabilities,
    }
}

#[test]
fn test_init() {
    let (state, effects) = init();

    assert_eq!(state, State::CameraStarting);
    assert_eq!(effects.len(), 2);
    assert!(effects.contains(&Effect::SubscribeToCameraEvents));
    assert!(effects.contains(&Effect::SubscribeTick));
}

#[test]
fn test_camera_connection_flow() {
    let config = Config::default();
    let (state, _) = init();

    let (state, effects) = transition(
        &config,
        state,
        Event::CameraEvent(DeviceCameraEvent::Connected),
    );
    assert_eq!(state, State::CameraStarting);
    assert_eq!(effects, vec![Effect::StartCamera]);

    let (state, effects) = transition(&config, state, Event::CameraStartDone(Ok(())));
    assert_eq!(state, State::Idle);
    assert!(effects.is_empty());
}

#[test]
fn test_tick_starts_a_capture_only_when_idle() {
    let config = Config::default();

    let (state, effects) = transition(&config, State::Idle, Event::Tick);
    assert_eq!(state, State::Capturing);
    assert_eq!(effects, vec![Effect::CaptureFrame]);

    // Ticks arriving while work is in flight are dropped.
    for busy in [
        State::Capturing,
        State::Detecting,
        State::Classifying { pose: pose() },
    ] {
        let (state, effects) = transition(&config, busy.clone(), Event::Tick);
        assert_eq!(state, busy);
        assert!(effects.is_empty());
    }
}

#[test]
fn test_at_most_one_submission_in_flight() {
    let config = Config::default();

    // First submission is accepted and starts detection.
    let (state, effects) = transition(&config, State::Idle, Event::FrameSubmitted(vec![1, 2, 3]));
    assert_eq!(state, State::Detecting);
    assert_eq!(
        effects,
        vec![Effect::DetectPose {
            frame: vec![1, 2, 3]
        }]
    );

    // A burst of further submissions neither queues nor duplicates work.
    let mut current = state;
    for _ in 0..5 {
        let (next, effects) = transition(&config, current, Event::FrameSubmitted(vec![9]));
        assert_eq!(next, State::Detecting);
        assert!(effects.is_empty());
        current = next;
    }

    // Completion releases the gate: the next submission is accepted again.
    let (state, _) = transition(&config, current, Event::DetectDone(Ok(None)));
    assert_eq!(state, State::Idle);
    let (state, effects) = transition(&config, state, Event::FrameSubmitted(vec![4]));
    assert_eq!(state, State::Detecting);
    assert_eq!(effects, vec![Effect::DetectPose { frame: vec![4] }]);
}

#[test]
fn test_capture_feeds_detection() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Capturing,
        Event::FrameCaptureDone(Ok(Some(vec![7]))),
    );
    assert_eq!(state, State::Detecting);
    assert_eq!(effects, vec![Effect::DetectPose { frame: vec![7] }]);

    // No frame available yet: back to idle without publishing anything.
    let (state, effects) = transition(&config, State::Capturing, Event::FrameCaptureDone(Ok(None)));
    assert_eq!(state, State::Idle);
    assert!(effects.is_empty());
}

#[test]
fn test_hand_absence_resets_published_state() {
    let config = Config::default();

    let (state, effects) = transition(&config, State::Detecting, Event::DetectDone(Ok(None)));
    assert_eq!(state, State::Idle);
    assert_eq!(effects, vec![Effect::Publish(PredictionSnapshot::reset())]);

    let Effect::Publish(snapshot) = &effects[0] else {
        panic!("expected a publish effect");
    };
    assert!(!snapshot.hand_in_frame);
    assert!(snapshot.node_points.is_empty());
    assert!(snapshot.label.is_empty());
    assert!(snapshot.metrics.is_empty());
}

#[test]
fn test_detector_failure_degrades_to_absence() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Detecting,
        Event::DetectDone(Err(DetectError::Backend("boom".to_string()))),
    );
    assert_eq!(state, State::Idle);
    assert_eq!(effects, vec![Effect::Publish(PredictionSnapshot::reset())]);
}

#[test]
fn test_detection_feeds_classification() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Detecting,
        Event::DetectDone(Ok(Some(pose()))),
    );
    assert_eq!(state, State::Classifying { pose: pose() });
    assert_eq!(effects, vec![Effect::Classify { pose: pose() }]);
}

#[test]
fn test_classification_publishes_one_atomic_snapshot() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Classifying { pose: pose() },
        Event::ClassifyDone(Ok(Some(prediction()))),
    );
    assert_eq!(state, State::Idle);
    assert_eq!(effects.len(), 1);

    let Effect::Publish(snapshot) = &effects[0] else {
        panic!("expected a publish effect");
    };

    // Label, confidence, distribution and pose all come from the same call.
    assert!(snapshot.hand_in_frame);
    assert_eq!(snapshot.label, "B");
    assert_eq!(snapshot.confidence, "91%");
    assert_eq!(snapshot.metrics.data().len(), 3);
    // Only the confident half of the landmarks is published for display.
    assert_eq!(snapshot.node_points.len(), HAND_LANDMARK_COUNT / 2 + 1);
}

#[test]
fn test_classifier_failure_resets_and_releases_the_gate() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Classifying { pose: pose() },
        Event::ClassifyDone(Err(ClassifyError::Backend("bad input".to_string()))),
    );
    assert_eq!(state, State::Idle);
    assert_eq!(effects, vec![Effect::Publish(PredictionSnapshot::reset())]);

    // Gate released: the next tick is accepted.
    let (state, effects) = transition(&config, state, Event::Tick);
    assert_eq!(state, State::Capturing);
    assert_eq!(effects, vec![Effect::CaptureFrame]);
}

#[test]
fn test_no_active_model_resets_without_error() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        State::Classifying { pose: pose() },
        Event::ClassifyDone(Ok(None)),
    );
    assert_eq!(state, State::Idle);
    assert_eq!(effects, vec![Effect::Publish(PredictionSnapshot::reset())]);
}

#[test]
fn test_pause_stops_camera_and_resume_restarts_it() {
    let config = Config::default();

    let (state, effects) = transition(&config, State::Idle, Event::PauseChanged(true));
    assert_eq!(state, State::Paused);
    assert_eq!(
        effects,
        vec![
            Effect::StopCamera,
            Effect::Publish(PredictionSnapshot::reset()),
        ]
    );

    // Ticks and late completions are dropped while paused.
    let (state, effects) = transition(&config, state, Event::Tick);
    assert_eq!(state, State::Paused);
    assert!(effects.is_empty());
    let (state, effects) = transition(
        &config,
        state,
        Event::ClassifyDone(Ok(Some(prediction()))),
    );
    assert_eq!(state, State::Paused);
    assert!(effects.is_empty());

    let (state, effects) = transition(&config, state, Event::PauseChanged(false));
    assert_eq!(state, State::CameraStarting);
    assert_eq!(effects, vec![Effect::StartCamera]);
}

#[test]
fn test_camera_disconnection_resets_from_any_state() {
    let config = Config::default();

    for busy in [
        State::Idle,
        State::Capturing,
        State::Detecting,
        State::Classifying { pose: pose() },
    ] {
        let (state, effects) = transition(
            &config,
            busy,
            Event::CameraEvent(DeviceCameraEvent::Disconnected),
        );
        assert_eq!(state, State::CameraStarting);
        assert_eq!(effects, vec![Effect::Publish(PredictionSnapshot::reset())]);
    }
}
