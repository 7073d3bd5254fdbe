//! Per-event rendering rules.
//!
//! Result lines share one shape:
//!
//! ```text
//! [web1] 🔄️ Install package (Changed)
//! ```
//!
//! The `[host] marker task ` prefix is written uncolored and the
//! parenthesised outcome carries the status color. Detail lines are indented
//! to sit under the task name.

use std::borrow::Cow;
use std::io;

use colored::Color;
use serde_json::Value;

use super::display::DisplaySink;
use super::roles::with_marker;
use super::status::{StatusCategory, StatusClassifier, DIM, FACTS_MARKER};
use super::types::{value_text, ItemOutcome, RunnerOutcome, TaskResult};
use crate::config::{DEFAULT_MIN_BOX_WIDTH, DEFAULT_TRUNCATE_AT};

/// Appended to detail text cut at the truncation cap.
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Banner title used when a play has neither a name nor a file.
pub const FALLBACK_PLAY_TITLE: &str = "Mystery Playbook";

/// Shown for includes that carry no file name.
pub const FALLBACK_INCLUDE_NAME: &str = "included content";

/// Shown for a debug variable the result does not carry.
pub const MISSING_VAR: &str = "None";

/// Substring identifying the implicit fact-gathering task.
const GATHERING_FACTS: &str = "Gathering Facts";

/// Renders play banners, includes, task results and loop items.
#[derive(Debug, Clone, Copy)]
pub struct ResultRenderer {
    classifier: StatusClassifier,
    min_box_width: usize,
    truncate_at: usize,
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new(StatusClassifier::default())
    }
}

impl ResultRenderer {
    /// Create a renderer with the default box width and truncation cap.
    pub fn new(classifier: StatusClassifier) -> Self {
        Self {
            classifier,
            min_box_width: DEFAULT_MIN_BOX_WIDTH,
            truncate_at: DEFAULT_TRUNCATE_AT,
        }
    }

    /// Set the minimum interior width of the play banner.
    #[must_use]
    pub fn with_min_box_width(mut self, width: usize) -> Self {
        self.min_box_width = width;
        self
    }

    /// Set the detail block truncation cap.
    #[must_use]
    pub fn with_truncate_at(mut self, cap: usize) -> Self {
        self.truncate_at = cap;
        self
    }

    // ========================================================================
    // Plays and Includes
    // ========================================================================

    /// Render the banner box for a starting play.
    pub fn play_start(
        &self,
        title: &str,
        file_name: Option<&str>,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let title = play_title(title, file_name);
        let color = self.classifier.paint(Color::Magenta);

        out.screen_line("", None)?;
        for line in play_box(title, self.min_box_width) {
            out.screen_line(&line, color)?;
        }
        Ok(())
    }

    /// Render the line announcing an included file.
    pub fn include(
        &self,
        hosts: &[String],
        filename: Option<&str>,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let (marker, color) = self.classifier.classify(StatusCategory::Info);
        let file = filename
            .filter(|f| !f.is_empty())
            .unwrap_or(FALLBACK_INCLUDE_NAME);
        let text = with_marker(marker, &format!("Prepared for next role: {file}"));

        out.partial(&format!("[{}] {text} ", hosts.join(", ")), None)?;
        out.line("(Done)", color)
    }

    // ========================================================================
    // Task Results
    // ========================================================================

    /// Render a finished task.
    pub fn runner_result(
        &self,
        outcome: RunnerOutcome,
        result: &TaskResult,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        match outcome {
            RunnerOutcome::Ok => {
                if result.task.is_debug() && self.debug_output(result, out)? {
                    return Ok(());
                }

                let task = result.task_label();
                if task.contains(GATHERING_FACTS) {
                    let marker = self.classifier.marker(FACTS_MARKER);
                    let color = self.classifier.paint(Color::Cyan);
                    return status_line(out, &result.host, marker, task, "Done", color);
                }

                self.status(out, result, StatusCategory::Ok, "Success")
            }
            RunnerOutcome::Changed => self.status(out, result, StatusCategory::Changed, "Changed"),
            RunnerOutcome::Skipped => self.status(out, result, StatusCategory::Skipped, "Skipped"),
            RunnerOutcome::Failed => {
                self.status(out, result, StatusCategory::Failed, "Failed")?;

                let indent = indent_for(&result.host);
                self.detail_block(out, &indent, "msg", result.payload.msg())?;
                self.detail_block(out, &indent, "stderr", result.payload.stderr())?;
                self.detail_block(out, &indent, "stdout", result.payload.stdout())
            }
            RunnerOutcome::Unreachable => {
                self.status(out, result, StatusCategory::Unreachable, "Unreachable")?;

                let indent = indent_for(&result.host);
                self.detail_block(out, &indent, "msg", result.payload.msg())
            }
        }
    }

    /// Render a finished loop iteration followed by its details.
    pub fn item_result(
        &self,
        outcome: ItemOutcome,
        result: &TaskResult,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let (category, suffix) = match outcome {
            ItemOutcome::Ok if result.payload.changed() => (StatusCategory::Changed, "Changed"),
            ItemOutcome::Ok => (StatusCategory::Ok, "Success"),
            ItemOutcome::Failed => (StatusCategory::Failed, "Failed"),
            ItemOutcome::Skipped => (StatusCategory::Skipped, "Skipped"),
        };

        self.status(out, result, category, suffix)?;
        self.item_details(result, out)
    }

    /// Debug tasks print their message or variable instead of a status line.
    ///
    /// Returns `false` when the payload has nothing to show, in which case the
    /// caller falls back to the ordinary status line.
    fn debug_output(&self, result: &TaskResult, out: &mut dyn DisplaySink) -> io::Result<bool> {
        let indent = indent_for(&result.host);
        let payload = &result.payload;

        if result.task.declares("msg") {
            if let Some(msg) = payload.msg() {
                let color = self.classifier.paint(Color::White);
                for line in msg.lines() {
                    out.line(&format!("{indent}{line}"), color)?;
                }
                return Ok(true);
            }
        }

        if let Some(var) = result.task.declared_var() {
            match payload.get(&var) {
                Some(Value::Array(values)) => {
                    for value in values {
                        out.line(&format!("{indent}{}", value_text(value)), None)?;
                    }
                }
                value => {
                    let value = value.map_or_else(|| MISSING_VAR.to_string(), value_text);
                    out.line(&format!("{indent}{var} = {value}"), None)?;
                }
            }
            return Ok(true);
        }

        let stdout_lines = payload.stdout_lines();
        if stdout_lines.is_empty() {
            return Ok(false);
        }
        for line in stdout_lines {
            out.line(&format!("{indent}{line}"), None)?;
        }
        Ok(true)
    }

    /// Message, item key/value and diff lines under a loop iteration.
    fn item_details(&self, result: &TaskResult, out: &mut dyn DisplaySink) -> io::Result<()> {
        let indent = indent_for(&result.host);
        let color = self.classifier.paint(DIM);
        let payload = &result.payload;

        if let Some(msg) = payload.truthy("msg") {
            out.line(&format!("{indent}{}", value_text(msg)), color)?;
        }

        if let Some(item) = payload.item() {
            out.line(&format!("{indent}{} = {}", item.key, item.value), color)?;
        }

        for diff in payload.diffs() {
            out.line(&format!("{indent}{} → {}", diff.before, diff.after), color)?;
        }
        Ok(())
    }

    fn status(
        &self,
        out: &mut dyn DisplaySink,
        result: &TaskResult,
        category: StatusCategory,
        suffix: &str,
    ) -> io::Result<()> {
        let (marker, color) = self.classifier.classify(category);
        status_line(out, &result.host, marker, result.task_label(), suffix, color)
    }

    fn detail_block(
        &self,
        out: &mut dyn DisplaySink,
        indent: &str,
        label: &str,
        text: Option<String>,
    ) -> io::Result<()> {
        let Some(text) = text else {
            return Ok(());
        };
        out.line(
            &format!("{indent}{label}: {}", truncate(&text, self.truncate_at)),
            None,
        )
    }
}

fn status_line(
    out: &mut dyn DisplaySink,
    host: &str,
    marker: &str,
    task: &str,
    suffix: &str,
    color: Option<Color>,
) -> io::Result<()> {
    out.partial(&format!("[{host}] {} ", with_marker(marker, task)), None)?;
    out.line(&format!("({suffix})"), color)
}

/// Indentation that lines detail text up under the task name.
pub fn indent_for(host: &str) -> String {
    " ".repeat(host.chars().count() + 3)
}

/// Cut `text` to `cap` characters, marking the cut.
pub fn truncate(text: &str, cap: usize) -> Cow<'_, str> {
    match text.char_indices().nth(cap) {
        Some((end, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

/// The banner title: the trimmed play name, else the file name, else a fallback.
pub fn play_title<'a>(title: &'a str, file_name: Option<&'a str>) -> &'a str {
    let title = title.trim();
    if !title.is_empty() {
        return title;
    }
    file_name
        .filter(|f| !f.is_empty())
        .unwrap_or(FALLBACK_PLAY_TITLE)
}

/// The three lines of a rounded box around `title`.
pub fn play_box(title: &str, min_width: usize) -> [String; 3] {
    let inner = min_width.max(title.chars().count());
    let edge = "─".repeat(inner);
    [
        format!("╭{edge}╮"),
        format!("│{title:^inner$}│"),
        format!("╰{edge}╯"),
    ]
}
