//! Pre-flight input checks that run before any network access.

use crate::error::{PredictionError, EMPTY_INPUT_MESSAGE, LOCAL_INSUFFICIENT_DATA_MESSAGE};

/// Fewest whitespace-delimited words worth sending to the classifier.
pub const MIN_WORD_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Proceed,
    RejectEmpty,
    RejectTooShort,
}

impl ValidationResult {
    /// The error a rejection settles as; `None` for `Proceed`.
    pub fn into_error(self) -> Option<PredictionError> {
        match self {
            ValidationResult::Proceed => None,
            ValidationResult::RejectEmpty => {
                Some(PredictionError::Validation(EMPTY_INPUT_MESSAGE.to_string()))
            }
            ValidationResult::RejectTooShort => Some(PredictionError::InsufficientData(
                LOCAL_INSUFFICIENT_DATA_MESSAGE.to_string(),
            )),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn validate(text: &str) -> ValidationResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ValidationResult::RejectEmpty;
    }
    if word_count(trimmed) < MIN_WORD_COUNT {
        return ValidationResult::RejectTooShort;
    }
    ValidationResult::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only_are_rejected_as_empty() {
        assert_eq!(validate(""), ValidationResult::RejectEmpty);
        assert_eq!(validate("   \n\t  "), ValidationResult::RejectEmpty);
    }

    #[test]
    fn nine_words_is_too_short_and_ten_proceeds() {
        let nine = "one two three four five six seven eight nine";
        assert_eq!(validate(nine), ValidationResult::RejectTooShort);

        let ten = format!("{nine} ten");
        assert_eq!(validate(&ten), ValidationResult::Proceed);
    }

    #[test]
    fn runs_of_mixed_whitespace_count_as_one_separator() {
        let text = "  one\t\ttwo \n three    four five\r\nsix seven  eight nine ten  ";
        assert_eq!(word_count(text), 10);
        assert_eq!(validate(text), ValidationResult::Proceed);
    }

    #[test]
    fn too_short_maps_to_insufficient_data_not_failure() {
        match ValidationResult::RejectTooShort.into_error() {
            Some(PredictionError::InsufficientData(message)) => {
                assert_eq!(message, LOCAL_INSUFFICIENT_DATA_MESSAGE)
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(ValidationResult::Proceed.into_error().is_none());
    }
}
