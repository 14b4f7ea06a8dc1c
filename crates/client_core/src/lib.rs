use std::sync::Arc;

use shared::protocol::HealthResponse;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;
pub mod validator;

pub use config::{load_settings, ClientSettings};
pub use error::PredictionError;
pub use response::is_insufficient_data_message;
pub use transport::{HttpPredictionService, PredictionService, RawResponse, TransportError};
pub use types::{Outcome, Phase, Prediction, SessionState, Submission, SubmitDisposition};
pub use validator::{validate, ValidationResult, MIN_WORD_COUNT};

const STATE_EVENT_CAPACITY: usize = 64;

struct ControllerInner {
    state: SessionState,
    /// Bumped by every submit and reset. A response is applied only if the
    /// generation it was issued under is still current.
    generation: u64,
}

/// Owns the session state for one user session and drives submissions through it.
pub struct PredictionController {
    service: Arc<dyn PredictionService>,
    api_url: Option<String>,
    inner: Mutex<ControllerInner>,
    events: broadcast::Sender<SessionState>,
}

impl PredictionController {
    pub fn new(api_url: Option<String>) -> Self {
        Self::with_service(api_url, Arc::new(HttpPredictionService::new()))
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_url.clone())
    }

    pub fn with_service(api_url: Option<String>, service: Arc<dyn PredictionService>) -> Self {
        let (events, _) = broadcast::channel(STATE_EVENT_CAPACITY);
        Self {
            service,
            api_url,
            inner: Mutex::new(ControllerInner {
                state: SessionState::default(),
                generation: 0,
            }),
            events,
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.state.clone()
    }

    /// Receives a snapshot after every state transition.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.events.subscribe()
    }

    pub async fn submit(&self, submission: Submission) -> SubmitDisposition {
        let (generation, base_url, request) = {
            let mut guard = self.inner.lock().await;
            if guard.state.phase == Phase::InFlight {
                warn!(
                    generation = guard.generation,
                    "ignoring submission while a prediction is in flight"
                );
                return SubmitDisposition::IgnoredInFlight;
            }

            guard.generation += 1;
            let generation = guard.generation;
            info!(generation, model = %submission.model_label, "prediction submitted");

            guard.state.phase = Phase::Validating;
            guard.state.current_outcome = None;
            guard.state.last_submission = Some(submission.clone());
            self.publish(&guard.state);

            if let Some(err) = validate(&submission.text).into_error() {
                info!(generation, "submission rejected locally: {err}");
                return self.settle_locked(&mut guard, err.into_outcome());
            }

            let base_url = match config::resolve_api_url(self.api_url.as_deref()) {
                Ok(base_url) => base_url,
                Err(err) => {
                    warn!(generation, "cannot reach prediction service: {err}");
                    return self.settle_locked(&mut guard, err.into_outcome());
                }
            };

            guard.state.phase = Phase::InFlight;
            self.publish(&guard.state);
            (generation, base_url, submission.to_request())
        };

        let result = match self.service.predict(&base_url, &request).await {
            Ok(raw) => response::interpret_prediction(raw),
            Err(err) => {
                warn!(generation, "prediction transport failure: {err}");
                Err(PredictionError::Transport(err))
            }
        };
        let outcome = match result {
            Ok(prediction) => Outcome::Prediction(prediction),
            Err(err) => err.into_outcome(),
        };

        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            debug!(
                generation,
                current = guard.generation,
                "discarding stale prediction response"
            );
            return SubmitDisposition::Superseded;
        }
        self.settle_locked(&mut guard, outcome)
    }

    pub async fn reset(&self) {
        let mut guard = self.inner.lock().await;
        guard.generation += 1;
        guard.state = SessionState::default();
        debug!(generation = guard.generation, "session reset");
        self.publish(&guard.state);
    }

    /// Queries the service's health endpoint. Does not touch the session state.
    pub async fn check_health(&self) -> Result<HealthResponse, PredictionError> {
        let base_url = config::resolve_api_url(self.api_url.as_deref())?;
        let raw = self.service.health(&base_url).await?;
        response::interpret_health(raw)
    }

    fn settle_locked(&self, guard: &mut ControllerInner, outcome: Outcome) -> SubmitDisposition {
        guard.state.phase = Phase::Settled;
        guard.state.current_outcome = Some(outcome.clone());
        self.publish(&guard.state);
        SubmitDisposition::Settled(outcome)
    }

    fn publish(&self, state: &SessionState) {
        // No subscribers is fine.
        let _ = self.events.send(state.clone());
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
