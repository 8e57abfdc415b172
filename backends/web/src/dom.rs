use alloc::borrow::Cow;
use alloc::rc::Rc;

use listfilter::{FilterItem, Visibility};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::{config::WebFilterConfig, error::WebError};

/// The page elements a filter is bound to, resolved once at setup.
#[derive(Debug, Clone)]
pub struct DomBindings {
    document: Document,
    input: HtmlInputElement,
    container: Element,
}

impl DomBindings {
    /// Looks up the search input and the item container.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::DomUnavailable`] outside a browser,
    /// [`WebError::ElementNotFound`] if either id is missing from the page, and
    /// [`WebError::WrongElementType`] if the input id names something other
    /// than an `<input>`.
    pub fn resolve(config: &WebFilterConfig) -> Result<Self, WebError> {
        let document = document()?;

        let input = document
            .get_element_by_id(&config.input_id)
            .ok_or_else(|| WebError::ElementNotFound {
                role: "search input",
                id: config.input_id.clone(),
            })?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| WebError::WrongElementType {
                id: config.input_id.clone(),
                expected: "HTMLInputElement",
            })?;

        let container = document
            .get_element_by_id(&config.container_id)
            .ok_or_else(|| WebError::ElementNotFound {
                role: "item container",
                id: config.container_id.clone(),
            })?;

        Ok(Self {
            document,
            input,
            container,
        })
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the search input.
    #[must_use]
    pub const fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    /// Returns the item container.
    #[must_use]
    pub const fn container(&self) -> &Element {
        &self.container
    }

    /// Copies the container's current items into a fixed list.
    ///
    /// `getElementsByClassName` is live; the copy is not, so items added later
    /// are never filtered.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::WrongElementType`] if an element carrying the item
    /// class is not an HTML element, e.g. an SVG node.
    pub fn snapshot_items(&self, config: &WebFilterConfig) -> Result<Vec<DomItem>, WebError> {
        let collection = self.container.get_elements_by_class_name(&config.item_class);
        let label_tag: Rc<str> = Rc::from(config.label_tag.as_str());

        (0..collection.length())
            .filter_map(|index| collection.item(index))
            .map(|element| {
                element
                    .dyn_into::<HtmlElement>()
                    .map(|element| DomItem::new(element, Rc::clone(&label_tag)))
                    .map_err(|_| WebError::WrongElementType {
                        id: config.item_class.clone(),
                        expected: "HTMLElement",
                    })
            })
            .collect()
    }
}

pub(crate) fn document() -> Result<Document, WebError> {
    let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
    window.document().ok_or(WebError::DomUnavailable)
}

/// One list item in the page.
#[derive(Debug, Clone)]
pub struct DomItem {
    element: HtmlElement,
    label_tag: Rc<str>,
    visibility: Visibility,
}

impl DomItem {
    fn new(element: HtmlElement, label_tag: Rc<str>) -> Self {
        let hidden = element
            .style()
            .get_property_value("display")
            .is_ok_and(|display| display == "none");
        Self {
            element,
            label_tag,
            visibility: Visibility::from_match(!hidden),
        }
    }

    /// Returns the underlying element.
    #[must_use]
    pub const fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl FilterItem for DomItem {
    fn label(&self) -> Option<Cow<'_, str>> {
        let label = self
            .element
            .get_elements_by_tag_name(&self.label_tag)
            .item(0)?;
        let text = match label.dyn_into::<HtmlElement>() {
            Ok(html) => html.inner_text(),
            Err(other) => other.text_content().unwrap_or_default(),
        };
        Some(Cow::Owned(text))
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if let Err(err) = self
            .element
            .style()
            .set_property("display", visibility.css_display())
        {
            tracing::warn!(error = ?err, "failed to update item display");
            return;
        }
        self.visibility = visibility;
    }
}
