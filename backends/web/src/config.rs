use listfilter::{FilterOptions, MissingLabelPolicy};
use serde::{Deserialize, Serialize};

use crate::error::WebError;

/// Where the filter finds its elements in the page.
///
/// Defaults match the product catalogue markup:
///
/// ```html
/// <input id="search-input">
/// <ul id="product-list">
///   <li class="product-item"><a href="/product/1">Red Shirt</a></li>
/// </ul>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebFilterConfig {
    /// Id of the `<input>` the user types into.
    pub input_id: String,
    /// Id of the element containing the items.
    pub container_id: String,
    /// Class shared by every item inside the container.
    pub item_class: String,
    /// Tag of the element inside each item holding its label.
    pub label_tag: String,
    /// Handling of items without a label element.
    pub missing_label: MissingLabelPolicy,
}

impl Default for WebFilterConfig {
    fn default() -> Self {
        Self {
            input_id: "search-input".to_string(),
            container_id: "product-list".to_string(),
            item_class: "product-item".to_string(),
            label_tag: "a".to_string(),
            missing_label: MissingLabelPolicy::Skip,
        }
    }
}

impl WebFilterConfig {
    /// Parses a config object sent from JavaScript. Missing keys use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::InvalidConfig`] when the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, WebError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Options handed to the filtering core.
    #[must_use]
    pub const fn filter_options(&self) -> FilterOptions {
        FilterOptions::new().missing_label(self.missing_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_follow_catalogue_markup() {
        let config = WebFilterConfig::default();
        assert_eq!(config.input_id, "search-input");
        assert_eq!(config.container_id, "product-list");
        assert_eq!(config.item_class, "product-item");
        assert_eq!(config.label_tag, "a");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WebFilterConfig::from_json(r#"{"inputId":"q","missingLabel":"fail"}"#)
            .expect("config should parse");
        assert_eq!(config.input_id, "q");
        assert_eq!(config.container_id, "product-list");
        assert_eq!(
            config.filter_options().missing_label,
            MissingLabelPolicy::Fail
        );
    }
}
