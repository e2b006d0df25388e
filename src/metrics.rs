use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMetric {
    pub category: String,
    pub value: f64,
}

/// Snapshot of the most recent probability distribution, one entry per label
/// the active model knows. Replaced wholesale on every new result; this is
/// not a time series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionMetrics {
    data: Vec<PredictionMetric>,
}

impl PredictionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_probabilities(probabilities: &BTreeMap<String, f64>) -> Self {
        let data = probabilities
            .iter()
            .map(|(category, value)| PredictionMetric {
                category: category.clone(),
                value: *value,
            })
            .collect();
        Self { data }
    }

    pub fn replace(&mut self, probabilities: &BTreeMap<String, f64>) {
        *self = Self::from_probabilities(probabilities);
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    pub fn data(&self) -> &[PredictionMetric] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().fold(0.0, |max, metric| metric.value.max(max))
    }
}
