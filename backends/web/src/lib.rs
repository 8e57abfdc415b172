#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Browser host for `listfilter`.
//!
//! Binds a [`listfilter::ListFilter`] to a search `<input>` and a list of item
//! elements. On every `input` event the current value is matched against the
//! text of each item's label element and the item's inline `display` style is
//! set to `""` or `"none"`.
//!
//! From JavaScript the simplest setup is:
//!
//! ```js
//! import init, { installListFilter } from "./listfilter_web.js";
//! await init();
//! installListFilter();
//! ```

extern crate alloc;

mod app;
mod config;
mod console;
mod dom;
mod error;

pub use app::{
    WebFilterBuilder, WebListFilter, install_list_filter, install_list_filter_with_config,
};
pub use config::WebFilterConfig;
pub use console::install_console_logging;
pub use dom::{DomBindings, DomItem};
pub use error::WebError;

#[cfg(all(test, target_arch = "wasm32"))]
mod tests;
