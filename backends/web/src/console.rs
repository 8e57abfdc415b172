//! Tracing output for the browser console.

use std::fmt::Write as _;
use std::sync::Once;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use wasm_bindgen::JsValue;

const CONSOLE_PREFIX: &str = "[listfilter]";

static CONSOLE_INSTALLED: Once = Once::new();

/// Routes `tracing` events and panics to the browser console (idempotent).
pub fn install_console_logging(level: LevelFilter) {
    CONSOLE_INSTALLED.call_once(|| {
        console_error_panic_hook::set_once();
        let result = tracing_subscriber::registry()
            .with(ConsoleLayer.with_filter(level))
            .try_init();
        if result.is_err() {
            web_sys::console::warn_1(&JsValue::from_str(
                "listfilter console logging could not be installed",
            ));
        }
    });
}

#[derive(Debug, Clone, Copy, Default)]
struct ConsoleLayer;

impl<S> Layer<S> for ConsoleLayer
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let line = visitor.render(metadata.target());
        let line = JsValue::from_str(&line);
        match *metadata.level() {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            Level::DEBUG => web_sys::console::log_1(&line),
            Level::TRACE => web_sys::console::debug_1(&line),
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: String,
}

impl FieldVisitor {
    fn render(self, target: &str) -> String {
        let mut line = format!("{CONSOLE_PREFIX} {target}:");
        if let Some(message) = self.message {
            line.push(' ');
            line.push_str(&message);
        }
        line.push_str(&self.fields);
        line
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_puts_message_before_fields() {
        let visitor = FieldVisitor {
            message: Some("applied filter".into()),
            fields: " shown=2 hidden=1".into(),
        };
        assert_eq!(
            visitor.render("listfilter::filter"),
            "[listfilter] listfilter::filter: applied filter shown=2 hidden=1"
        );
    }

    #[test]
    fn render_without_message() {
        let visitor = FieldVisitor::default();
        assert_eq!(visitor.render("t"), "[listfilter] t:");
    }
}
