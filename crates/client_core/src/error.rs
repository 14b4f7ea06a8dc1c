use thiserror::Error;

use crate::{transport::TransportError, types::Outcome};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a job description";
pub const LOCAL_INSUFFICIENT_DATA_MESSAGE: &str =
    "Not enough information provided to determine whether posting is legitimate or fraudulent";
pub const SERVICE_INSUFFICIENT_DATA_MESSAGE: &str =
    "not enough information to determine whether posting is legitimate or fraudulent";
pub const MISSING_API_URL_MESSAGE: &str =
    "API URL is not configured. Set API_URL (or api_url in client.toml) or pass --api-url.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to reach the prediction service. Check that it is running and try again.";
pub const GENERIC_SERVICE_ERROR_MESSAGE: &str =
    "The prediction service could not process the request.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "The prediction service returned a response that could not be understood.";

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InsufficientData(String),
    #[error("{0}")]
    Configuration(String),
    #[error("failed to reach prediction service: {0}")]
    Transport(#[from] TransportError),
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}

impl PredictionError {
    /// Collapses the error into the terminal outcome shown to the user.
    pub fn into_outcome(self) -> Outcome {
        match self {
            PredictionError::InsufficientData(message) => Outcome::InsufficientData { message },
            PredictionError::Validation(message)
            | PredictionError::Configuration(message)
            | PredictionError::Service { message, .. } => Outcome::Failure { message },
            PredictionError::Transport(_) => Outcome::Failure {
                message: TRANSPORT_FAILURE_MESSAGE.to_string(),
            },
            PredictionError::MalformedResponse(_) => Outcome::Failure {
                message: MALFORMED_RESPONSE_MESSAGE.to_string(),
            },
        }
    }
}
