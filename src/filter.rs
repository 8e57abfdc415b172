//! The list filter: a fixed snapshot of items re-scanned on every query change.

use crate::{FilterError, FilterItem, FilterOptions, MissingLabelPolicy, Query, Visibility};

/// Counts produced by a single scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Items whose label contains the query.
    pub shown: usize,
    /// Items whose label does not contain the query.
    pub hidden: usize,
    /// Unlabeled items left untouched under [`MissingLabelPolicy::Skip`].
    pub skipped: usize,
}

impl FilterSummary {
    /// Total number of items visited.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.shown + self.hidden + self.skipped
    }
}

/// Shows or hides each item of a fixed collection depending on whether its
/// label contains the current query, ignoring case.
///
/// The item collection is captured once at construction. There is no API to
/// add or remove items afterwards; hosts that need a new item set build a new
/// filter.
///
/// # Examples
///
/// ```
/// use listfilter::{LabeledItem, ListFilter};
///
/// let mut filter = ListFilter::new(
///     ["Red Shirt", "Blue Jeans", "red hat"].map(LabeledItem::new),
/// );
/// filter.apply("red").unwrap();
/// assert_eq!(filter.visible_indices().collect::<Vec<_>>(), [0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct ListFilter<I> {
    items: Vec<I>,
    query: Query,
    options: FilterOptions,
}

impl<I: FilterItem> ListFilter<I> {
    /// Captures `items` with default options.
    pub fn new(items: impl IntoIterator<Item = I>) -> Self {
        Self::with_options(items, FilterOptions::default())
    }

    /// Captures `items` with the given options.
    pub fn with_options(items: impl IntoIterator<Item = I>, options: FilterOptions) -> Self {
        let items: Vec<I> = items.into_iter().collect();
        tracing::debug!(items = items.len(), ?options, "captured filter snapshot");
        Self {
            items,
            query: Query::default(),
            options,
        }
    }

    /// Sets the query and rescans every item in order.
    ///
    /// An item ends up [`Visibility::Shown`] exactly when its lower-cased label
    /// contains the lower-cased query. Applying the same query twice leaves the
    /// same state.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MissingLabel`] when an item has no label and the
    /// policy is [`MissingLabelPolicy::Fail`]. Items before it keep their new
    /// state; the rest are untouched.
    pub fn apply(&mut self, raw: &str) -> Result<FilterSummary, FilterError> {
        if raw != self.query.as_str() {
            self.query = Query::new(raw);
        }
        self.scan()
    }

    /// Rescans with the current query.
    ///
    /// # Errors
    ///
    /// Same as [`ListFilter::apply`].
    pub fn reapply(&mut self) -> Result<FilterSummary, FilterError> {
        self.scan()
    }

    fn scan(&mut self) -> Result<FilterSummary, FilterError> {
        let mut summary = FilterSummary::default();
        for (index, item) in self.items.iter_mut().enumerate() {
            let visibility = match item.label() {
                Some(label) => Visibility::from_match(self.query.matches(&label)),
                None => match self.options.missing_label {
                    MissingLabelPolicy::Skip => {
                        tracing::warn!(index, "skipping item without a label");
                        summary.skipped += 1;
                        continue;
                    }
                    MissingLabelPolicy::Fail => {
                        return Err(FilterError::MissingLabel { index });
                    }
                },
            };
            tracing::trace!(index, ?visibility);
            item.set_visibility(visibility);
            if visibility.is_shown() {
                summary.shown += 1;
            } else {
                summary.hidden += 1;
            }
        }
        tracing::debug!(
            query = self.query.as_str(),
            shown = summary.shown,
            hidden = summary.hidden,
            skipped = summary.skipped,
            "applied filter"
        );
        Ok(summary)
    }

    /// Returns the query used by the last scan.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the options in effect.
    #[must_use]
    pub const fn options(&self) -> FilterOptions {
        self.options
    }

    /// Borrows the captured items in their original order.
    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Number of captured items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visibility of the item at `index`, or `None` when out of range.
    #[must_use]
    pub fn visibility(&self, index: usize) -> Option<Visibility> {
        self.items.get(index).map(FilterItem::visibility)
    }

    /// Indices of shown items in their original order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.visibility().is_shown())
            .map(|(index, _)| index)
    }

    /// Shown items in their original order.
    pub fn visible_items(&self) -> impl Iterator<Item = &I> + '_ {
        self.items
            .iter()
            .filter(|item| item.visibility().is_shown())
    }

    /// Releases the captured items.
    #[must_use]
    pub fn into_items(self) -> Vec<I> {
        self.items
    }
}
