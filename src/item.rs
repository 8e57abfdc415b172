//! Filterable items and their visibility state.

use alloc::borrow::Cow;

/// The two display states an item can be toggled between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The item is displayed normally.
    #[default]
    Shown,
    /// The item is explicitly hidden.
    Hidden,
}

impl Visibility {
    /// Maps a match result to a visibility.
    #[must_use]
    pub const fn from_match(matched: bool) -> Self {
        if matched { Self::Shown } else { Self::Hidden }
    }

    /// Returns `true` for [`Visibility::Shown`].
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    /// Value written to an inline CSS `display` property for this state.
    ///
    /// Shown items get the empty string so the stylesheet decides their layout.
    #[must_use]
    pub const fn css_display(self) -> &'static str {
        match self {
            Self::Shown => "",
            Self::Hidden => "none",
        }
    }
}

/// A single row in a filterable list.
///
/// Hosts implement this for whatever backs their rows: DOM elements, terminal
/// lines, plain structs.
pub trait FilterItem {
    /// Returns the text compared against the query.
    ///
    /// `None` means the item has no label element, which is a markup error
    /// handled according to [`MissingLabelPolicy`](crate::MissingLabelPolicy).
    fn label(&self) -> Option<Cow<'_, str>>;

    /// Returns the item's current visibility.
    fn visibility(&self) -> Visibility;

    /// Updates the item's visibility.
    fn set_visibility(&mut self, visibility: Visibility);
}

impl<T: FilterItem + ?Sized> FilterItem for Box<T> {
    fn label(&self) -> Option<Cow<'_, str>> {
        (**self).label()
    }

    fn visibility(&self) -> Visibility {
        (**self).visibility()
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        (**self).set_visibility(visibility);
    }
}

/// In-memory item holding its label and visibility directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledItem {
    label: Option<String>,
    visibility: Visibility,
}

impl LabeledItem {
    /// Creates a shown item with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            visibility: Visibility::Shown,
        }
    }

    /// Creates a shown item that has no label at all.
    #[must_use]
    pub const fn unlabeled() -> Self {
        Self {
            label: None,
            visibility: Visibility::Shown,
        }
    }

    /// Borrows the label text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` while the item is shown.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.visibility.is_shown()
    }
}

impl FilterItem for LabeledItem {
    fn label(&self) -> Option<Cow<'_, str>> {
        self.label.as_deref().map(Cow::Borrowed)
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

impl From<&str> for LabeledItem {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LabeledItem {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_display_values() {
        assert_eq!(Visibility::Shown.css_display(), "");
        assert_eq!(Visibility::Hidden.css_display(), "none");
    }

    #[test]
    fn new_items_start_shown() {
        let item = LabeledItem::new("Red Shirt");
        assert!(item.is_shown());
        assert_eq!(item.text(), Some("Red Shirt"));
        assert!(LabeledItem::unlabeled().label().is_none());
    }

    #[test]
    fn boxed_items_forward() {
        let mut item: Box<dyn FilterItem> = Box::new(LabeledItem::new("red hat"));
        item.set_visibility(Visibility::Hidden);
        assert_eq!(item.visibility(), Visibility::Hidden);
        assert_eq!(item.label().as_deref(), Some("red hat"));
    }
}
