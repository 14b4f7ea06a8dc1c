//! Maps raw service responses onto predictions or prediction errors.

use shared::{
    error::ServiceErrorBody,
    protocol::{HealthResponse, PredictResponse},
};
use tracing::{info, warn};

use crate::{
    error::{PredictionError, GENERIC_SERVICE_ERROR_MESSAGE, SERVICE_INSUFFICIENT_DATA_MESSAGE},
    transport::RawResponse,
    types::Prediction,
};

const INSUFFICIENT_DATA_MARKER: &str = "not long enough";

/// Whether a service error message means the text was too short to classify.
///
/// The service has no dedicated status for this, so it is matched on the message.
/// Any message that happens to contain the phrase will match.
pub fn is_insufficient_data_message(text: &str) -> bool {
    text.to_lowercase().contains(INSUFFICIENT_DATA_MARKER)
}

/// Message for a non-success response: `detail`, then status text, then a fallback.
pub fn service_error_message(raw: &RawResponse) -> String {
    ServiceErrorBody::parse(&raw.body)
        .as_ref()
        .and_then(ServiceErrorBody::detail_message)
        .map(str::to_string)
        .or_else(|| {
            raw.status_text
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_SERVICE_ERROR_MESSAGE.to_string())
}

pub fn classify_service_error(raw: &RawResponse) -> PredictionError {
    let message = service_error_message(raw);
    if is_insufficient_data_message(&message) {
        info!(
            status = raw.status,
            "service reported insufficient input; reporting as insufficient data"
        );
        return PredictionError::InsufficientData(SERVICE_INSUFFICIENT_DATA_MESSAGE.to_string());
    }
    warn!(status = raw.status, %message, "prediction service returned an error");
    PredictionError::Service {
        status: raw.status,
        message,
    }
}

pub fn interpret_prediction(raw: RawResponse) -> Result<Prediction, PredictionError> {
    if !raw.is_success() {
        return Err(classify_service_error(&raw));
    }
    let body: PredictResponse = serde_json::from_slice(&raw.body).map_err(|err| {
        warn!(status = raw.status, "unexpected prediction body: {err}");
        PredictionError::MalformedResponse(err.to_string())
    })?;
    Ok(body.into())
}

pub fn interpret_health(raw: RawResponse) -> Result<HealthResponse, PredictionError> {
    if !raw.is_success() {
        return Err(classify_service_error(&raw));
    }
    serde_json::from_slice(&raw.body)
        .map_err(|err| PredictionError::MalformedResponse(err.to_string()))
}
