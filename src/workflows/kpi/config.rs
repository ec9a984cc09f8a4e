use serde::{Deserialize, Serialize};

/// Weight sums further than this from 1.0 are reported.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative importance of each sub-score in the weighted total.
///
/// Weights are expected to sum to 1.0 but are never rescaled; a different
/// sum scales every total score proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub closing_rate: f64,
    pub call_conversion: f64,
    pub response_time: f64,
    pub qualified_leads: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            closing_rate: 0.40,
            call_conversion: 0.30,
            response_time: 0.15,
            qualified_leads: 0.15,
        }
    }
}

impl WeightConfig {
    pub fn total(&self) -> f64 {
        self.closing_rate + self.call_conversion + self.response_time + self.qualified_leads
    }

    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("closing_rate", self.closing_rate),
            ("call_conversion", self.call_conversion),
            ("response_time", self.response_time),
            ("qualified_leads", self.qualified_leads),
        ]
    }
}

/// Reference rates each raw rate is divided by before scaling to 100.
///
/// `closing_rate` is carried for the data store's sake; the closing score is
/// normalized against `max_closing_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub closing_rate: f64,
    pub max_closing_rate: f64,
    pub call_conversion: f64,
    pub qualified_leads: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            closing_rate: 0.15,
            max_closing_rate: 0.15,
            call_conversion: 0.70,
            qualified_leads: 0.75,
        }
    }
}

impl TargetConfig {
    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("closing_rate", self.closing_rate),
            ("max_closing_rate", self.max_closing_rate),
            ("call_conversion", self.call_conversion),
            ("qualified_leads", self.qualified_leads),
        ]
    }
}

/// Per-cycle scoring configuration as edited by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    pub weights: WeightConfig,
    pub targets: TargetConfig,
}

impl KpiConfig {
    /// Rejects targets that would divide by zero or flip signs, and non-finite weights.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (field, value) in self.targets.fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScoringError::InvalidTarget { field, value });
            }
        }

        for (field, value) in self.weights.fields() {
            if !value.is_finite() {
                return Err(ScoringError::InvalidWeight { field, value });
            }
        }

        if !self.weights.is_normalized() {
            tracing::warn!(
                weight_total = self.weights.total(),
                "kpi weights do not sum to 1.0; total scores scale accordingly"
            );
        }

        Ok(())
    }
}

/// Configuration or input rejected before any score is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("target {field} must be a positive number, got {value}")]
    InvalidTarget { field: &'static str, value: f64 },
    #[error("weight {field} must be a finite number, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("agent {agent_id} has a negative or non-finite response time {value}")]
    InvalidResponseTime { agent_id: String, value: f64 },
}
