use std::sync::Mutex;

use crate::pipeline::core::PredictionSnapshot;
use crate::prediction_sink::interface::PredictionSink;

/// Records every published snapshot so tests can assert on the sequence.
pub struct PredictionSinkFake {
    published: Mutex<Vec<PredictionSnapshot>>,
}

impl PredictionSinkFake {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<PredictionSnapshot> {
        self.published.lock().unwrap().clone()
    }

    pub fn latest(&self) -> Option<PredictionSnapshot> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl PredictionSink for PredictionSinkFake {
    fn publish(&self, snapshot: &PredictionSnapshot) {
        self.published.lock().unwrap().push(snapshot.clone());
    }
}
