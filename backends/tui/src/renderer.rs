use crossterm::style::{Attribute, ContentStyle, StyledContent};
use listfilter::{LabeledItem, ListFilter};
use unicode_width::UnicodeWidthChar;

/// Represents a fully resolved frame ready to be drawn to the terminal.
#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    lines: Vec<RenderLine>,
    cursor: Option<(u16, u16)>,
}

impl RenderFrame {
    /// Appends an empty line and returns it for filling in.
    pub fn push_line(&mut self) -> &mut RenderLine {
        self.lines.push(RenderLine::default());
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// Returns the set of lines recorded in this frame.
    #[must_use]
    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    /// Where the text cursor should be left after drawing, as `(column, row)`.
    #[must_use]
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Plain text of every line joined with newlines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Representation of a single line in the terminal output.
#[derive(Debug, Default, Clone)]
pub struct RenderLine {
    segments: Vec<RenderSegment>,
}

impl RenderLine {
    /// Pushes a new segment onto the line.
    pub fn push(&mut self, segment: RenderSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    /// Returns the list of segments contained in this line.
    #[must_use]
    pub fn segments(&self) -> &[RenderSegment] {
        &self.segments
    }

    /// Concatenated text of all segments.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(RenderSegment::content).collect()
    }
}

/// Atomic piece of content rendered on a line.
#[derive(Debug, Clone)]
pub struct RenderSegment {
    content: String,
    style: ContentStyle,
}

impl RenderSegment {
    /// Creates a plain (unstyled) segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, ContentStyle::new())
    }

    /// Creates a segment with custom styling.
    pub fn styled(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Borrows the raw text stored in this segment.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Converts this segment into a [`StyledContent`] for printing through crossterm.
    #[must_use]
    pub fn as_styled_content(&self) -> StyledContent<String> {
        self.style.apply(self.content.clone())
    }
}

/// Lays out the prompt, a status line and the shown rows.
#[derive(Debug, Clone)]
pub struct Renderer {
    prompt: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("Search")
    }
}

impl Renderer {
    /// Creates a renderer with the given prompt label.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Returns the prompt label.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Renders the filter state into a frame of at most `width` x `height` cells.
    ///
    /// Rows past the bottom of the screen are not drawn; they are still
    /// filtered.
    #[must_use]
    pub fn render(&self, filter: &ListFilter<LabeledItem>, width: u16, height: u16) -> RenderFrame {
        let width = usize::from(width);
        let mut frame = RenderFrame::default();

        let prompt = format!("{}: ", self.prompt);
        let query = filter.query().as_str();
        let (prompt_text, prompt_width) = clip(&prompt, width);
        let (query_text, query_width) = clip(query, width.saturating_sub(prompt_width));
        let mut bold = ContentStyle::new();
        bold.attributes.set(Attribute::Bold);
        frame
            .push_line()
            .push(RenderSegment::styled(prompt_text, bold))
            .push(RenderSegment::plain(query_text));
        frame.cursor = Some((
            u16::try_from(prompt_width + query_width).unwrap_or(u16::MAX),
            0,
        ));

        let shown = filter.visible_indices().count();
        let status = format!("{shown}/{} shown", filter.len());
        let mut dim = ContentStyle::new();
        dim.attributes.set(Attribute::Dim);
        frame
            .push_line()
            .push(RenderSegment::styled(clip(&status, width).0, dim));

        let rows = usize::from(height).saturating_sub(2);
        for item in filter.visible_items().take(rows) {
            let label = item.text().unwrap_or_default();
            frame.push_line().push(RenderSegment::plain(clip(label, width).0));
        }
        frame
    }
}

/// Cuts `text` to at most `width` terminal columns.
fn clip(text: &str, width: usize) -> (String, usize) {
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    (out, used)
}
