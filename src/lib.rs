#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod error;
pub mod filter;
pub mod item;
pub mod logging;
pub mod options;
pub mod query;

#[doc(inline)]
pub use error::FilterError;
#[doc(inline)]
pub use filter::{FilterSummary, ListFilter};
#[doc(inline)]
pub use item::{FilterItem, LabeledItem, Visibility};
#[doc(inline)]
pub use options::{FilterOptions, MissingLabelPolicy};
#[doc(inline)]
pub use query::{Query, label_matches};

pub mod prelude {
    //! Commonly used types for hosts wiring up a filter.
    pub use crate::{
        FilterError, FilterItem, FilterOptions, FilterSummary, LabeledItem, ListFilter,
        MissingLabelPolicy, Query, Visibility,
    };
}
