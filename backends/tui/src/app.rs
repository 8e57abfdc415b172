use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use listfilter::{LabeledItem, ListFilter};

use crate::{error::TuiError, renderer::Renderer, terminal::Terminal};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep reading input.
    Continue,
    /// Leave and report the rows that are currently shown.
    Accept,
    /// Leave without a result.
    Quit,
}

/// Interactive list filter running in a terminal.
///
/// Every edit of the query rescans all rows synchronously before the next key
/// is read.
#[derive(Debug)]
pub struct TuiApp {
    terminal: Terminal,
    renderer: Renderer,
    filter: ListFilter<LabeledItem>,
    query: String,
}

impl TuiApp {
    /// Applies a key press to the query.
    ///
    /// Printable characters are appended, `Backspace` removes the last
    /// character, `Ctrl-U` clears the query, `Enter` accepts and `Esc` or
    /// `Ctrl-C` quits.
    ///
    /// # Errors
    ///
    /// Returns an error if re-applying the filter fails.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Control, TuiError> {
        if key.kind == KeyEventKind::Release {
            return Ok(Control::Continue);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Control::Quit),
            KeyCode::Char('c') if ctrl => return Ok(Control::Quit),
            KeyCode::Enter => return Ok(Control::Accept),
            KeyCode::Char('u') if ctrl => self.query.clear(),
            KeyCode::Char(ch) if !ctrl => self.query.push(ch),
            KeyCode::Backspace => {
                if self.query.pop().is_none() {
                    return Ok(Control::Continue);
                }
            }
            _ => return Ok(Control::Continue),
        }
        let summary = self.filter.apply(&self.query)?;
        log::debug!(
            "query {:?}: {} shown, {} hidden",
            self.query,
            summary.shown,
            summary.hidden
        );
        Ok(Control::Continue)
    }

    /// Redraws the prompt and the shown rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written to.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let (width, height) = self.terminal.size()?;
        let frame = self.renderer.render(&self.filter, width, height);
        self.terminal.render(&frame)
    }

    /// Runs the blocking event loop until the user accepts or quits.
    ///
    /// Returns the labels shown at the time of `Enter`, or `None` on quit.
    ///
    /// # Errors
    ///
    /// Returns an error if reading events or drawing fails.
    pub fn run(&mut self) -> Result<Option<Vec<String>>, TuiError> {
        self.draw()?;
        loop {
            let control = match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(..) => Control::Continue,
                _ => continue,
            };
            match control {
                Control::Continue => self.draw()?,
                Control::Accept => return Ok(Some(self.visible_labels())),
                Control::Quit => return Ok(None),
            }
        }
    }

    /// Labels of the rows currently shown, in their original order.
    #[must_use]
    pub fn visible_labels(&self) -> Vec<String> {
        self.filter
            .visible_items()
            .filter_map(LabeledItem::text)
            .map(str::to_owned)
            .collect()
    }

    /// Returns the current query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Provides immutable access to the filter.
    #[must_use]
    pub const fn filter(&self) -> &ListFilter<LabeledItem> {
        &self.filter
    }

    /// Provides immutable access to the terminal handle.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal {
        &self.terminal
    }
}

/// Builder for [`TuiApp`] instances.
#[derive(Debug, Default)]
pub struct TuiAppBuilder {
    terminal: Option<Terminal>,
    renderer: Renderer,
    rows: Vec<LabeledItem>,
    query: String,
}

impl TuiAppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the terminal handle used by the application.
    #[must_use]
    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Sets the label shown before the query.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.renderer = Renderer::new(prompt);
        self
    }

    /// Sets the rows to filter. They are captured once when the app is built.
    #[must_use]
    pub fn with_rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = rows.into_iter().map(LabeledItem::new).collect();
        self
    }

    /// Starts with a non-empty query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Consumes the builder and produces a [`TuiApp`] with the initial query
    /// already applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialised. Without
    /// [`Self::with_terminal`] the app draws on stderr via [`Terminal::tty`].
    pub fn build(self) -> Result<TuiApp, TuiError> {
        let mut filter = ListFilter::new(self.rows);
        filter.apply(&self.query)?;
        let terminal = match self.terminal {
            Some(terminal) => terminal,
            None => Terminal::tty()?,
        };
        log::info!("filtering {} rows", filter.len());

        Ok(TuiApp {
            terminal,
            renderer: self.renderer,
            filter,
            query: self.query,
        })
    }
}

/// Writes accepted labels one per line. Keep `out` apart from the terminal
/// the app draws on so the result carries no escape sequences.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_selection(out: &mut impl Write, labels: &[String]) -> io::Result<()> {
    for label in labels {
        writeln!(out, "{label}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> TuiApp {
        TuiAppBuilder::new()
            .with_terminal(Terminal::buffered())
            .with_rows(["Red Shirt", "Blue Jeans", "red hat"])
            .build()
            .expect("building app should succeed")
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for ch in text.chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(ch))).unwrap(), Control::Continue);
        }
    }

    #[test]
    fn every_keystroke_refilters() {
        let mut app = app();
        type_text(&mut app, "E");
        assert_eq!(app.visible_labels(), ["Red Shirt", "Blue Jeans", "red hat"]);
        type_text(&mut app, "D");
        assert_eq!(app.visible_labels(), ["Red Shirt", "red hat"]);
        type_text(&mut app, " s");
        assert_eq!(app.visible_labels(), ["Red Shirt"]);
    }

    #[test]
    fn backspace_and_clear_widen_the_list() {
        let mut app = app();
        type_text(&mut app, "xyz");
        assert!(app.visible_labels().is_empty());
        app.handle_key(press(KeyCode::Backspace)).unwrap();
        app.handle_key(press(KeyCode::Backspace)).unwrap();
        assert_eq!(app.query(), "x");
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.query(), "");
        assert_eq!(app.visible_labels().len(), 3);
    }

    #[test]
    fn enter_accepts_and_escape_quits() {
        let mut app = app();
        assert_eq!(app.handle_key(press(KeyCode::Enter)).unwrap(), Control::Accept);
        assert_eq!(app.handle_key(press(KeyCode::Esc)).unwrap(), Control::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Control::Quit
        );
    }

    #[test]
    fn initial_query_is_applied_at_build() {
        let app = TuiAppBuilder::new()
            .with_terminal(Terminal::buffered())
            .with_rows(["Red Shirt", "Blue Jeans", "red hat"])
            .with_query("BLUE")
            .build()
            .unwrap();
        assert_eq!(app.visible_labels(), ["Blue Jeans"]);
    }

    #[test]
    fn draw_into_buffer() {
        let mut app = TuiAppBuilder::new()
            .with_terminal(Terminal::buffered())
            .with_prompt("Products")
            .with_rows(["Red Shirt", "Blue Jeans", "red hat"])
            .build()
            .unwrap();
        type_text(&mut app, "hat");
        app.draw().expect("drawing should succeed");
        let snapshot = app.terminal().snapshot().expect("buffered terminal");
        assert_eq!(
            std::str::from_utf8(snapshot).expect("snapshot should be valid utf8"),
            "Products: hat\n1/3 shown\nred hat"
        );
    }

    #[test]
    fn drawing_stays_off_the_result_writer() {
        let screen = SharedBuffer::default();
        let mut result: Vec<u8> = Vec::new();
        let mut app = TuiAppBuilder::new()
            .with_terminal(Terminal::from_writer(screen.clone(), 80, 24))
            .with_rows(["Red Shirt", "Blue Jeans", "red hat"])
            .build()
            .unwrap();

        type_text(&mut app, "red");
        app.draw().unwrap();
        assert!(screen.0.borrow().contains(&0x1b));
        assert!(result.is_empty());

        assert_eq!(app.handle_key(press(KeyCode::Enter)).unwrap(), Control::Accept);
        let drawn = screen.0.borrow().len();
        write_selection(&mut result, &app.visible_labels()).unwrap();
        assert_eq!(String::from_utf8(result).unwrap(), "Red Shirt\nred hat\n");
        assert_eq!(screen.0.borrow().len(), drawn);
    }
}
