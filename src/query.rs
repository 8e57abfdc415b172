//! The search query and the label predicate.

use core::fmt;

/// Current contents of the search input.
///
/// The raw text is kept as typed so hosts can echo it back; matching only ever
/// looks at the lower-cased needle. No trimming or other normalization happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    raw: String,
    needle: String,
}

impl Query {
    /// Creates a query from the raw input value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Returns the text exactly as it was entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the lower-cased text used for matching.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns `true` when the query is empty, in which case every label matches.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Checks a single label against this query.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        label_matches(label, self)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Returns `true` when the lower-cased `label` contains the query's needle.
///
/// This is plain substring containment: no tokenizing, no fuzzy scoring.
#[must_use]
pub fn label_matches(label: &str, query: &Query) -> bool {
    if query.needle.is_empty() {
        return true;
    }
    label.to_lowercase().contains(query.needle.as_str())
}
