use serde::{Deserialize, Serialize};

use crate::domain::{ModelLabel, PredictionCode};

pub fn predict_route() -> &'static str {
    "/predict"
}

pub fn health_route() -> &'static str {
    "/"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub job_description: String,
    pub model_label: ModelLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub non_fraudulent: f64,
    pub fraudulent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction_label: String,
    pub prediction_code: PredictionCode,
    pub confidence_score: f64,
    pub probabilities: Probabilities,
    pub model_used: String,
    pub input_text_length: u64,
    pub cleaned_text_length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
