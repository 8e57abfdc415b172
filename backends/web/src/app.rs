use alloc::rc::Rc;
use core::cell::RefCell;

use listfilter::{FilterSummary, ListFilter, MissingLabelPolicy};
use tracing::level_filters::LevelFilter;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::*};
use web_sys::{Event, HtmlInputElement};

use crate::{
    config::WebFilterConfig,
    console::install_console_logging,
    dom::{DomBindings, DomItem, document},
    error::WebError,
};

type InputListener = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

/// Builder for [`WebListFilter`].
#[derive(Debug, Default, Clone)]
pub struct WebFilterBuilder {
    config: WebFilterConfig,
}

impl WebFilterBuilder {
    /// Creates a new builder with the default element ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub const fn from_config(config: WebFilterConfig) -> Self {
        Self { config }
    }

    /// Sets the id of the search input.
    #[must_use]
    pub fn with_input_id(mut self, id: impl Into<String>) -> Self {
        self.config.input_id = id.into();
        self
    }

    /// Sets the id of the element holding the items.
    #[must_use]
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.config.container_id = id.into();
        self
    }

    /// Sets the class that marks an item.
    #[must_use]
    pub fn with_item_class(mut self, class: impl Into<String>) -> Self {
        self.config.item_class = class.into();
        self
    }

    /// Sets the tag of the label element inside each item.
    #[must_use]
    pub fn with_label_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.label_tag = tag.into();
        self
    }

    /// Controls what happens to items without a label element.
    #[must_use]
    pub const fn missing_label(mut self, policy: MissingLabelPolicy) -> Self {
        self.config.missing_label = policy;
        self
    }

    /// Resolves the elements, snapshots the items, filters them with the
    /// input's current value and attaches the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the input or container cannot be found, if the
    /// input is not an `<input>`, if the initial scan fails, or if the
    /// listener cannot be registered.
    pub fn attach(self) -> Result<WebListFilter, WebError> {
        WebListFilter::attach(self.config)
    }
}

/// A list filter bound to a search input in the page.
///
/// Dropping the handle (or calling `free()` from JavaScript) removes the
/// listener. Use [`WebListFilter::leak`] to keep it for the page's lifetime.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebListFilter {
    input: HtmlInputElement,
    filter: Rc<RefCell<ListFilter<DomItem>>>,
    listener: Option<InputListener>,
}

impl WebListFilter {
    fn attach(config: WebFilterConfig) -> Result<Self, WebError> {
        let bindings = DomBindings::resolve(&config)?;
        let items = bindings.snapshot_items(&config)?;
        tracing::info!(
            input = %config.input_id,
            container = %config.container_id,
            items = items.len(),
            "attaching list filter"
        );

        let input = bindings.input().clone();
        let mut filter = ListFilter::with_options(items, config.filter_options());
        // Browsers may restore a typed value on reload; hide what it excludes.
        let summary = filter.apply(&input.value())?;
        tracing::debug!(shown = summary.shown, hidden = summary.hidden, "initial filter");
        let filter = Rc::new(RefCell::new(filter));

        let listener: InputListener = {
            let input = input.clone();
            let filter = Rc::clone(&filter);
            Closure::new(move |_event: Event| {
                filter
                    .borrow_mut()
                    .apply(&input.value())
                    .map(|_| ())
                    .map_err(|err| JsValue::from(WebError::from(err)))
            })
        };
        input.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())?;

        Ok(Self {
            input,
            filter,
            listener: Some(listener),
        })
    }

    /// Runs the filter with whatever the input holds right now.
    ///
    /// # Errors
    ///
    /// Propagates [`listfilter::FilterError`] from the scan.
    pub fn refresh(&self) -> Result<FilterSummary, WebError> {
        let value = self.input.value();
        Ok(self.filter.borrow_mut().apply(&value)?)
    }

    /// Borrows the underlying filter, e.g. to inspect item visibility.
    pub fn with_filter<R>(&self, f: impl FnOnce(&ListFilter<DomItem>) -> R) -> R {
        f(&self.filter.borrow())
    }

    /// Keeps the listener registered for the rest of the page's lifetime.
    pub fn leak(mut self) {
        if let Some(listener) = self.listener.take() {
            listener.forget();
        }
    }

    fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            let removed = self
                .input
                .remove_event_listener_with_callback("input", listener.as_ref().unchecked_ref());
            if let Err(err) = removed {
                tracing::warn!(error = ?err, "failed to remove input listener");
            }
        }
    }
}

impl Drop for WebListFilter {
    fn drop(&mut self) {
        self.detach();
    }
}

#[wasm_bindgen]
impl WebListFilter {
    /// Attaches a filter using the default element ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the page markup is missing the expected elements.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Self, WebError> {
        Self::attach(WebFilterConfig::default())
    }

    /// Attaches a filter configured by a JSON object such as
    /// `{"inputId":"q","containerId":"list","itemClass":"row","labelTag":"span"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the elements cannot be found.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<Self, WebError> {
        Self::attach(WebFilterConfig::from_json(json)?)
    }

    /// Re-applies the current input value and returns the number of shown items.
    ///
    /// # Errors
    ///
    /// Returns an error when an item has no label and the policy is `fail`.
    #[wasm_bindgen(js_name = refresh)]
    pub fn refresh_js(&self) -> Result<usize, WebError> {
        self.refresh().map(|summary| summary.shown)
    }

    /// Number of items captured at setup.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.filter.borrow().len()
    }

    /// Returns `true` if the container had no items at setup.
    #[wasm_bindgen(js_name = isEmpty)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter.borrow().is_empty()
    }

    /// Number of items currently shown.
    #[wasm_bindgen(getter, js_name = visibleCount)]
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.filter.borrow().visible_indices().count()
    }

    /// Removes the input listener. Items keep their current visibility.
    pub fn dispose(&mut self) {
        self.detach();
    }
}

/// Attaches the default filter once the document has loaded and keeps it for
/// the page's lifetime.
///
/// Also routes `tracing` output and panics to the browser console. If the
/// document is still loading, setup is deferred to `DOMContentLoaded`.
///
/// # Errors
///
/// Returns an error if the DOM is unavailable, or when the document is already
/// loaded and the markup is missing the expected elements.
#[wasm_bindgen(js_name = installListFilter)]
pub fn install_list_filter() -> Result<(), WebError> {
    install_with_config(WebFilterConfig::default())
}

/// Like [`install_list_filter`] but with a JSON config.
///
/// # Errors
///
/// Returns an error if the JSON is invalid, plus everything
/// [`install_list_filter`] reports.
#[wasm_bindgen(js_name = installListFilterWithConfig)]
pub fn install_list_filter_with_config(json: &str) -> Result<(), WebError> {
    install_with_config(WebFilterConfig::from_json(json)?)
}

fn install_with_config(config: WebFilterConfig) -> Result<(), WebError> {
    install_console_logging(LevelFilter::INFO);
    let document = document()?;
    if document.ready_state() == "loading" {
        tracing::debug!("document still loading, deferring list filter setup");
        let on_ready = Closure::once_into_js(move || {
            let attached = WebFilterBuilder::from_config(config).attach();
            if let Err(err) = attached.map(WebListFilter::leak) {
                tracing::error!(%err, "list filter setup failed");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }
    WebFilterBuilder::from_config(config).attach().map(WebListFilter::leak)
}
