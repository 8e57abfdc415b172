use core::fmt;

use listfilter::FilterError;

/// Error type produced by the web backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// A required element could not be located by id.
    ElementNotFound {
        /// What the element is used for, e.g. `search input`.
        role: &'static str,
        /// The id that was looked up.
        id: String,
    },
    /// An element exists but is not of the expected kind.
    WrongElementType {
        /// The id or class the element was found through.
        id: String,
        /// The interface that was expected, e.g. `HTMLInputElement`.
        expected: &'static str,
    },
    /// The configuration passed from JavaScript could not be parsed.
    InvalidConfig(String),
    /// The filtering core rejected the item markup.
    Filter(FilterError),
    /// Wrapper around JavaScript exceptions.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::ElementNotFound { role, id } => {
                write!(f, "Failed to find {role} with id `{id}`")
            }
            Self::WrongElementType { id, expected } => {
                write!(f, "Element `{id}` is not an {expected}")
            }
            Self::InvalidConfig(msg) => write!(f, "Invalid list filter config: {msg}"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FilterError> for WebError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<serde_json::Error> for WebError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidConfig(value.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        js_sys::Error::new(&value.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn element_not_found_names_role_and_id() {
        let error = WebError::ElementNotFound {
            role: "search input",
            id: "search-input".into(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to find search input with id `search-input`"
        );
    }

    #[test]
    fn filter_errors_keep_their_message() {
        let error = WebError::from(FilterError::MissingLabel { index: 2 });
        assert_eq!(error.to_string(), "item 2 has no label element");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn bad_json_is_invalid_config() {
        let error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert!(matches!(WebError::from(error), WebError::InvalidConfig(_)));
    }
}
