use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classifier/vectorizer pairing the remote service should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLabel {
    #[default]
    NbBow,
    NbBowRes,
    NbTfidf,
    NbTfidfRes,
    LrBow,
    LrBowRes,
    LrTfidf,
    LrTfidfRes,
}

impl ModelLabel {
    pub const ALL: [ModelLabel; 8] = [
        ModelLabel::NbBow,
        ModelLabel::NbBowRes,
        ModelLabel::NbTfidf,
        ModelLabel::NbTfidfRes,
        ModelLabel::LrBow,
        ModelLabel::LrBowRes,
        ModelLabel::LrTfidf,
        ModelLabel::LrTfidfRes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelLabel::NbBow => "nb_bow",
            ModelLabel::NbBowRes => "nb_bow_res",
            ModelLabel::NbTfidf => "nb_tfidf",
            ModelLabel::NbTfidfRes => "nb_tfidf_res",
            ModelLabel::LrBow => "lr_bow",
            ModelLabel::LrBowRes => "lr_bow_res",
            ModelLabel::LrTfidf => "lr_tfidf",
            ModelLabel::LrTfidfRes => "lr_tfidf_res",
        }
    }

    pub fn display_name(self) -> &'static str {
        MODEL_CATALOG
            .iter()
            .find(|option| option.id == self)
            .map(|option| option.display_name)
            .unwrap_or_else(|| self.as_str())
    }
}

impl fmt::Display for ModelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model label '{0}'")]
pub struct UnknownModelLabel(pub String);

impl FromStr for ModelLabel {
    type Err = UnknownModelLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        ModelLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownModelLabel(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub id: ModelLabel,
    pub display_name: &'static str,
}

pub const MODEL_CATALOG: [ModelOption; 8] = [
    ModelOption {
        id: ModelLabel::NbBow,
        display_name: "Naive Bayes (Bag of Words)",
    },
    ModelOption {
        id: ModelLabel::NbBowRes,
        display_name: "Naive Bayes (Bag of Words, Resampled)",
    },
    ModelOption {
        id: ModelLabel::NbTfidf,
        display_name: "Naive Bayes (TF-IDF)",
    },
    ModelOption {
        id: ModelLabel::NbTfidfRes,
        display_name: "Naive Bayes (TF-IDF, Resampled)",
    },
    ModelOption {
        id: ModelLabel::LrBow,
        display_name: "Logistic Regression (Bag of Words)",
    },
    ModelOption {
        id: ModelLabel::LrBowRes,
        display_name: "Logistic Regression (Bag of Words, Resampled)",
    },
    ModelOption {
        id: ModelLabel::LrTfidf,
        display_name: "Logistic Regression (TF-IDF)",
    },
    ModelOption {
        id: ModelLabel::LrTfidfRes,
        display_name: "Logistic Regression (TF-IDF, Resampled)",
    },
];

/// Binary verdict as encoded by the service: 0 is legitimate, 1 is fraudulent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PredictionCode {
    NonFraudulent,
    Fraudulent,
}

impl TryFrom<u8> for PredictionCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PredictionCode::NonFraudulent),
            1 => Ok(PredictionCode::Fraudulent),
            other => Err(format!("prediction_code must be 0 or 1, got {other}")),
        }
    }
}

impl From<PredictionCode> for u8 {
    fn from(value: PredictionCode) -> Self {
        match value {
            PredictionCode::NonFraudulent => 0,
            PredictionCode::Fraudulent => 1,
        }
    }
}
