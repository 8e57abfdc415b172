use core::fmt;

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::PrintStyledContent,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::{
    error::TuiError,
    renderer::{RenderFrame, RenderLine},
};

/// Size reported by buffered terminals.
const BUFFER_SIZE: (u16, u16) = (80, 24);

/// Represents the concrete output target the terminal backend writes to.
enum TerminalTarget {
    /// Escape-sequence output. `size` is `None` when it should be queried from the tty.
    Screen {
        handle: Box<dyn Write>,
        size: Option<(u16, u16)>,
        raw_mode: bool,
        alternate_screen: bool,
    },
    Buffer {
        contents: Vec<u8>,
        size: (u16, u16),
    },
}

impl fmt::Debug for TerminalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen {
                size,
                raw_mode,
                alternate_screen,
                ..
            } => f
                .debug_struct("Screen")
                .field("size", size)
                .field("raw_mode", raw_mode)
                .field("alternate_screen", alternate_screen)
                .finish_non_exhaustive(),
            Self::Buffer { contents, size } => f
                .debug_struct("Buffer")
                .field("len", &contents.len())
                .field("size", size)
                .finish(),
        }
    }
}

impl TerminalTarget {
    /// Draws on stderr so stdout stays free for the program's result.
    fn tty() -> Result<Self, TuiError> {
        terminal::enable_raw_mode()?;
        let mut target = Self::Screen {
            handle: Box::new(io::stderr()),
            size: None,
            raw_mode: true,
            alternate_screen: false,
        };
        target.enter_alternate_screen()?;
        Ok(target)
    }

    fn enter_alternate_screen(&mut self) -> Result<(), TuiError> {
        if let Self::Screen {
            handle,
            alternate_screen,
            ..
        } = self
        {
            execute!(handle, EnterAlternateScreen)?;
            *alternate_screen = true;
        }
        Ok(())
    }

    fn write_frame(&mut self, frame: &RenderFrame) -> Result<(), TuiError> {
        match self {
            Self::Screen { handle, .. } => {
                queue!(handle, Hide, MoveTo(0, 0), Clear(ClearType::All))?;
                for (row, line) in frame.lines().iter().enumerate() {
                    let row = u16::try_from(row).unwrap_or(u16::MAX);
                    queue!(handle, MoveTo(0, row))?;
                    write_line(handle, line)?;
                }
                if let Some((column, row)) = frame.cursor() {
                    queue!(handle, MoveTo(column, row), Show)?;
                }
                handle.flush()?;
                Ok(())
            }
            Self::Buffer { contents, .. } => {
                contents.clear();
                contents.extend_from_slice(frame.to_plain_text().as_bytes());
                Ok(())
            }
        }
    }
}

impl Drop for TerminalTarget {
    fn drop(&mut self) {
        if let Self::Screen {
            handle,
            raw_mode,
            alternate_screen,
            ..
        } = self
        {
            let _ = execute!(handle, Show);
            if *alternate_screen {
                let _ = execute!(handle, LeaveAlternateScreen);
            }
            if *raw_mode {
                let _ = terminal::disable_raw_mode();
            }
        }
    }
}

fn write_line(handle: &mut impl Write, line: &RenderLine) -> Result<(), TuiError> {
    for segment in line.segments() {
        queue!(handle, PrintStyledContent(segment.as_styled_content()))?;
    }
    Ok(())
}

/// Thin wrapper around the concrete terminal output target.
#[derive(Debug)]
pub struct Terminal {
    target: TerminalTarget,
}

impl Terminal {
    /// Creates a terminal drawing on `stderr`, enabling raw mode and entering
    /// the alternate screen buffer. Both are undone on drop, also when entering
    /// the alternate screen fails half way.
    ///
    /// `stdout` is never written to, so the caller can print results there.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be enabled.
    pub fn tty() -> Result<Self, TuiError> {
        Ok(Self {
            target: TerminalTarget::tty()?,
        })
    }

    /// Creates a terminal that writes escape sequences to `writer` and reports
    /// a fixed size. Raw mode is left alone.
    #[must_use]
    pub fn from_writer(writer: impl Write + 'static, width: u16, height: u16) -> Self {
        Self {
            target: TerminalTarget::Screen {
                handle: Box::new(writer),
                size: Some((width, height)),
                raw_mode: false,
                alternate_screen: false,
            },
        }
    }

    /// Creates an 80x24 in-memory terminal useful for tests.
    #[must_use]
    pub const fn buffered() -> Self {
        Self::buffered_with_size(BUFFER_SIZE.0, BUFFER_SIZE.1)
    }

    /// Creates an in-memory terminal reporting the given size.
    #[must_use]
    pub const fn buffered_with_size(width: u16, height: u16) -> Self {
        Self {
            target: TerminalTarget::Buffer {
                contents: Vec::new(),
                size: (width, height),
            },
        }
    }

    /// Returns the current terminal size as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the size of a real terminal cannot be queried.
    pub fn size(&self) -> Result<(u16, u16), TuiError> {
        match &self.target {
            TerminalTarget::Screen { size: Some(size), .. }
            | TerminalTarget::Buffer { size, .. } => Ok(*size),
            TerminalTarget::Screen { size: None, .. } => Ok(terminal::size()?),
        }
    }

    /// Renders a frame to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn render(&mut self, frame: &RenderFrame) -> Result<(), TuiError> {
        self.target.write_frame(frame)
    }

    /// Returns the buffered contents when the terminal was created via [`Self::buffered`].
    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        match &self.target {
            TerminalTarget::Buffer { contents, .. } => Some(contents.as_slice()),
            TerminalTarget::Screen { .. } => None,
        }
    }
}
