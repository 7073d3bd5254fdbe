//! Display sinks.
//!
//! The reporter never writes escape sequences itself: it hands each piece of
//! text to a [`DisplaySink`] together with an advisory color. A piece written
//! with `newline == false` is continued by the next call on the same line.

use std::io::{self, Stdout, Write};

use colored::{Color, Colorize};

/// Destination for rendered output.
pub trait DisplaySink {
    /// Write `text`, optionally colored, ending the line when `newline` is set.
    ///
    /// `screen_only` marks decorative output that log-file sinks may drop.
    fn display(
        &mut self,
        text: &str,
        color: Option<Color>,
        newline: bool,
        screen_only: bool,
    ) -> io::Result<()>;

    /// Write a full line.
    fn line(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        self.display(text, color, true, false)
    }

    /// Write a full screen-only line.
    fn screen_line(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        self.display(text, color, true, true)
    }

    /// Write text that the next call continues.
    fn partial(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        self.display(text, color, false, false)
    }
}

// ============================================================================
// Console Sink
// ============================================================================

/// Writes to a terminal (stdout by default), coloring through `colored`.
#[derive(Debug)]
pub struct ConsoleDisplay<W: Write = Stdout> {
    writer: W,
}

impl ConsoleDisplay<Stdout> {
    /// Create a display writing to stdout.
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl Default for ConsoleDisplay<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleDisplay<W> {
    /// Create a display writing to any writer.
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the display and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn display(
        &mut self,
        text: &str,
        color: Option<Color>,
        newline: bool,
        _screen_only: bool,
    ) -> io::Result<()> {
        match color {
            Some(color) => write!(self.writer, "{}", text.color(color))?,
            None => self.writer.write_all(text.as_bytes())?,
        }

        if newline {
            self.writer.write_all(b"\n")?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

// ============================================================================
// Capturing Sink
// ============================================================================

/// One colored piece of a captured line.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedSegment {
    /// Text as written
    pub text: String,
    /// Advisory color it was written with
    pub color: Option<Color>,
}

/// A completed line of captured output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedLine {
    /// Pieces in write order
    pub segments: Vec<CapturedSegment>,
    /// Whether the final piece was marked screen-only
    pub screen_only: bool,
}

impl CapturedLine {
    /// The plain text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Color of the last piece, which carries the status for result lines.
    pub fn color(&self) -> Option<Color> {
        self.segments.last().and_then(|s| s.color)
    }
}

/// Records output in memory, keeping colors per segment.
#[derive(Debug, Clone, Default)]
pub struct CaptureDisplay {
    lines: Vec<CapturedLine>,
    pending: Vec<CapturedSegment>,
}

impl CaptureDisplay {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed lines.
    pub fn lines(&self) -> &[CapturedLine] {
        &self.lines
    }

    /// Plain text of every completed line.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(CapturedLine::text).collect()
    }

    /// All completed lines joined with newlines.
    pub fn output(&self) -> String {
        self.texts().join("\n")
    }

    /// Check if any completed line contains `pattern`.
    pub fn contains(&self, pattern: &str) -> bool {
        self.lines.iter().any(|line| line.text().contains(pattern))
    }

    /// Count completed lines containing `pattern`.
    pub fn count_lines_containing(&self, pattern: &str) -> usize {
        self.lines
            .iter()
            .filter(|line| line.text().contains(pattern))
            .count()
    }

    /// Find the first completed line containing `pattern`.
    pub fn find(&self, pattern: &str) -> Option<&CapturedLine> {
        self.lines.iter().find(|line| line.text().contains(pattern))
    }

    /// Discard everything captured so far.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
    }
}

impl DisplaySink for CaptureDisplay {
    fn display(
        &mut self,
        text: &str,
        color: Option<Color>,
        newline: bool,
        screen_only: bool,
    ) -> io::Result<()> {
        self.pending.push(CapturedSegment {
            text: text.to_string(),
            color,
        });

        if newline {
            self.lines.push(CapturedLine {
                segments: std::mem::take(&mut self.pending),
                screen_only,
            });
        }
        Ok(())
    }
}
