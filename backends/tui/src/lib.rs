#![allow(clippy::multiple_crate_versions)]

//! Terminal host for `listfilter`: type a query, watch the rows narrow.

pub use crate::app::{Control, TuiApp, TuiAppBuilder, write_selection};
pub use crate::renderer::{RenderFrame, RenderLine, RenderSegment, Renderer};
pub use crate::terminal::Terminal;

mod app;
mod error;
mod renderer;
mod terminal;

pub use error::TuiError;
