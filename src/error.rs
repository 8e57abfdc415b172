//! Errors produced while filtering.

use thiserror::Error;

/// Error type for the filtering core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// An item has no label to match against and the policy asks to fail.
    #[error("item {index} has no label element")]
    MissingLabel {
        /// Position of the offending item in the snapshot.
        index: usize,
    },
    /// Filter options could not be parsed.
    #[error("invalid filter options: {0}")]
    InvalidOptions(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidOptions(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_display() {
        let error = FilterError::MissingLabel { index: 3 };
        assert_eq!(error.to_string(), "item 3 has no label element");
    }

    #[test]
    fn json_errors_become_invalid_options() {
        let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = FilterError::from(error);
        assert!(matches!(error, FilterError::InvalidOptions(_)));
    }
}
