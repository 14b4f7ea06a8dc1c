use shared::{
    domain::{ModelLabel, PredictionCode},
    protocol::{PredictRequest, PredictResponse, Probabilities},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub text: String,
    pub model_label: ModelLabel,
}

impl Submission {
    pub fn new(text: impl Into<String>, model_label: ModelLabel) -> Self {
        Self {
            text: text.into(),
            model_label,
        }
    }

    pub fn to_request(&self) -> PredictRequest {
        PredictRequest {
            job_description: self.text.clone(),
            model_label: self.model_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub prediction_label: String,
    pub prediction_code: PredictionCode,
    pub confidence_score: f64,
    pub probabilities: Probabilities,
    pub model_used: String,
    pub input_text_length: u64,
    pub cleaned_text_length: u64,
}

impl Prediction {
    pub fn is_fraudulent(&self) -> bool {
        self.prediction_code == PredictionCode::Fraudulent
    }
}

impl From<PredictResponse> for Prediction {
    fn from(value: PredictResponse) -> Self {
        Self {
            prediction_label: value.prediction_label,
            prediction_code: value.prediction_code,
            confidence_score: value.confidence_score,
            probabilities: value.probabilities,
            model_used: value.model_used,
            input_text_length: value.input_text_length,
            cleaned_text_length: value.cleaned_text_length,
        }
    }
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(Prediction),
    /// No verdict is possible for this text. Informational, not an error.
    InsufficientData { message: String },
    Failure { message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    InFlight,
    Settled,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub current_outcome: Option<Outcome>,
    pub last_submission: Option<Submission>,
}

/// What `submit` did with a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDisposition {
    /// The submission settled and its outcome is now current.
    Settled(Outcome),
    /// A request was already in flight; nothing changed.
    IgnoredInFlight,
    /// A reset or newer submission arrived first; the response was discarded.
    Superseded,
}
