//! Behavior knobs for [`ListFilter`](crate::ListFilter).

use serde::{Deserialize, Serialize};

use crate::FilterError;

/// What to do with an item that has no label element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingLabelPolicy {
    /// Leave the item's visibility as it is and keep scanning.
    #[default]
    Skip,
    /// Stop the scan and report [`FilterError::MissingLabel`].
    ///
    /// Items before the offending one have already been updated.
    Fail,
}

/// Options applied to every scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterOptions {
    /// Handling of unlabeled items.
    pub missing_label: MissingLabelPolicy,
}

impl FilterOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            missing_label: MissingLabelPolicy::Skip,
        }
    }

    /// Sets the missing label policy.
    #[must_use]
    pub const fn missing_label(mut self, policy: MissingLabelPolicy) -> Self {
        self.missing_label = policy;
        self
    }

    /// Parses options from a JSON object. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidOptions`] when the JSON is malformed or a
    /// field has an unknown value.
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip() {
        assert_eq!(FilterOptions::default().missing_label, MissingLabelPolicy::Skip);
        assert_eq!(FilterOptions::new(), FilterOptions::default());
    }

    #[test]
    fn parses_kebab_case_json() {
        let options = FilterOptions::from_json(r#"{ "missing-label": "fail" }"#)
            .expect("options should parse");
        assert_eq!(options.missing_label, MissingLabelPolicy::Fail);

        let options = FilterOptions::from_json("{}").expect("empty object should parse");
        assert_eq!(options, FilterOptions::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let error = FilterOptions::from_json(r#"{ "missing-label": "explode" }"#).unwrap_err();
        assert!(matches!(error, FilterError::InvalidOptions(_)));
    }
}
