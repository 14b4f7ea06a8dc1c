//! Plain-text view of the session state.

use std::fmt::Write as _;

use client_core::{Outcome, Phase, Prediction, SessionState};
use shared::domain::{ModelLabel, MODEL_CATALOG};

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn render_state(state: &SessionState) -> String {
    match (state.phase, &state.current_outcome) {
        (Phase::Settled, Some(outcome)) => render_outcome(outcome),
        (Phase::Idle, _) | (Phase::Settled, None) => {
            "Paste a job description, then send it with an empty line.".to_string()
        }
        (Phase::Validating, _) => "Checking input...".to_string(),
        (Phase::InFlight, _) => "Analyzing job posting...".to_string(),
    }
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Prediction(prediction) => render_prediction(prediction),
        Outcome::InsufficientData { message } => format!("Insufficient data: {message}"),
        Outcome::Failure { message } => format!("Error: {message}"),
    }
}

fn render_prediction(prediction: &Prediction) -> String {
    let verdict = if prediction.is_fraudulent() {
        "LIKELY FRAUDULENT"
    } else {
        "LIKELY LEGITIMATE"
    };
    let model = prediction
        .model_used
        .parse::<ModelLabel>()
        .map(ModelLabel::display_name)
        .unwrap_or(prediction.model_used.as_str());

    let mut out = String::new();
    let _ = writeln!(out, "{verdict}: {}", prediction.prediction_label);
    let _ = writeln!(out, "  Confidence:      {}", percent(prediction.confidence_score));
    let _ = writeln!(
        out,
        "  Non-fraudulent:  {}",
        percent(prediction.probabilities.non_fraudulent)
    );
    let _ = writeln!(
        out,
        "  Fraudulent:      {}",
        percent(prediction.probabilities.fraudulent)
    );
    let _ = writeln!(out, "  Model:           {model}");
    let _ = write!(
        out,
        "  Text length:     {} chars ({} after cleaning)",
        prediction.input_text_length, prediction.cleaned_text_length
    );
    out
}

pub fn render_catalog(selected: ModelLabel) -> String {
    MODEL_CATALOG
        .iter()
        .map(|option| {
            let marker = if option.id == selected { '*' } else { ' ' };
            format!("{marker} {:<14} {}", option.id.as_str(), option.display_name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use shared::{domain::PredictionCode, protocol::Probabilities};

    use super::*;

    fn prediction() -> Prediction {
        Prediction {
            prediction_label: "Fraudulent (Fake)".to_string(),
            prediction_code: PredictionCode::Fraudulent,
            confidence_score: 0.9312,
            probabilities: Probabilities {
                non_fraudulent: 0.0688,
                fraudulent: 0.9312,
            },
            model_used: "nb_tfidf".to_string(),
            input_text_length: 140,
            cleaned_text_length: 90,
        }
    }

    #[test]
    fn prediction_shows_percentages_and_model_name() {
        let text = render_outcome(&Outcome::Prediction(prediction()));
        assert!(text.starts_with("LIKELY FRAUDULENT: Fraudulent (Fake)"));
        assert!(text.contains("Confidence:      93.12%"));
        assert!(text.contains("Non-fraudulent:  6.88%"));
        assert!(text.contains("Naive Bayes (TF-IDF)"));
        assert!(text.contains("140 chars (90 after cleaning)"));
    }

    #[test]
    fn insufficient_data_is_not_rendered_as_error() {
        let text = render_outcome(&Outcome::InsufficientData {
            message: "not enough information".to_string(),
        });
        assert_eq!(text, "Insufficient data: not enough information");
    }

    #[test]
    fn state_without_outcome_renders_phase() {
        let mut state = SessionState::default();
        assert!(render_state(&state).starts_with("Paste a job description"));
        state.phase = Phase::InFlight;
        assert_eq!(render_state(&state), "Analyzing job posting...");
        state.phase = Phase::Settled;
        state.current_outcome = Some(Outcome::Failure {
            message: "boom".to_string(),
        });
        assert_eq!(render_state(&state), "Error: boom");
    }

    #[test]
    fn catalog_marks_selected_model() {
        let text = render_catalog(ModelLabel::LrBow);
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().any(|l| l.starts_with("* lr_bow ")));
        assert!(text.lines().any(|l| l.starts_with("  nb_bow ")));
    }
}
