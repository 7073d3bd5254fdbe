//! End-of-run summary.
//!
//! ```text
//! Summary
//! ───────
//! web1
//!   ✅ 3 Successful
//!   🔄️ 1 Changes
//!   🚫 0 Unreachable
//!   ❌ 0 Failed
//!   ⏭️ 2 Skipped
//!
//! Setup complete.
//! ```

use std::io;

use colored::Color;
use indexmap::IndexMap;

use super::display::DisplaySink;
use super::roles::with_marker;
use super::status::{StatusCategory, StatusClassifier, DIM};
use super::types::HostStats;
use crate::config::DEFAULT_CLOSING_MESSAGE;

/// Column the host name is padded to on its status line.
const HOST_COLUMN: usize = 26;

/// Renders the final per-host report.
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    classifier: StatusClassifier,
    closing_message: String,
}

impl Default for SummaryAggregator {
    fn default() -> Self {
        Self::new(StatusClassifier::default())
    }
}

impl SummaryAggregator {
    /// Create an aggregator with the default closing line.
    pub fn new(classifier: StatusClassifier) -> Self {
        Self {
            classifier,
            closing_message: DEFAULT_CLOSING_MESSAGE.to_string(),
        }
    }

    /// Replace the closing line.
    #[must_use]
    pub fn with_closing_message(mut self, message: impl Into<String>) -> Self {
        self.closing_message = message.into();
        self
    }

    /// Render the summary for every processed host, sorted by name.
    pub fn render(
        &self,
        per_host: &IndexMap<String, HostStats>,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let header = "Summary";
        let header_color = self.classifier.paint(Color::Magenta);

        out.screen_line("", None)?;
        out.screen_line(header, header_color)?;
        out.screen_line(&"─".repeat(header.chars().count()), header_color)?;

        let mut hosts: Vec<_> = per_host.iter().collect();
        hosts.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (host, stats) in hosts {
            let (line, color) = host_status_line(host, stats, &self.classifier);
            out.screen_line(&line, color)?;

            for category in StatusCategory::SUMMARY_ORDER {
                let (marker, color) = self.classifier.classify(category);
                let count = stats.count(category);
                let color = if count == 0 && color.is_some() {
                    Some(DIM)
                } else {
                    color
                };

                let text = with_marker(marker, &format!("{count} {}", category.label()));
                out.screen_line(&format!("  {text}"), color)?;
            }
            out.screen_line("", None)?;
        }

        out.screen_line(&self.closing_message, self.classifier.paint(Color::Blue))
    }
}

/// Host name padded to its column, colored by how the host fared.
///
/// Red when anything failed or was unreachable, yellow when something
/// changed, green otherwise.
pub fn host_status_line(
    host: &str,
    stats: &HostStats,
    classifier: &StatusClassifier,
) -> (String, Option<Color>) {
    let color = if stats.has_failures() {
        Color::Red
    } else if stats.has_changes() {
        Color::Yellow
    } else {
        Color::Green
    };

    (format!("{host:<HOST_COLUMN$}"), classifier.paint(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::display::CaptureDisplay;
    use crate::callback::status::FeatureFlags;

    fn stats(ok: u32, changed: u32, unreachable: u32, failures: u32, skipped: u32) -> HostStats {
        HostStats {
            ok,
            changed,
            unreachable,
            failures,
            skipped,
            ..HostStats::default()
        }
    }

    #[test]
    fn test_single_host_summary() {
        let mut per_host = IndexMap::new();
        per_host.insert("web1".to_string(), stats(3, 1, 0, 0, 2));

        let mut out = CaptureDisplay::new();
        SummaryAggregator::default().render(&per_host, &mut out).unwrap();

        let texts = out.texts();
        assert_eq!(texts[1], "Summary");
        assert_eq!(texts[2], "───────");
        assert_eq!(texts[3].trim_end(), "web1");
        assert_eq!(
            &texts[4..9],
            [
                "  ✅ 3 Successful",
                "  🔄️ 1 Changes",
                "  🚫 0 Unreachable",
                "  ❌ 0 Failed",
                "  ⏭️ 2 Skipped",
            ]
        );
        assert_eq!(texts[9], "");
        assert_eq!(texts[10], "Setup complete.");

        let colors: Vec<_> = out.lines()[4..9].iter().map(|l| l.color()).collect();
        assert_eq!(
            colors,
            [
                Some(Color::Green),
                Some(Color::Yellow),
                Some(DIM),
                Some(DIM),
                Some(Color::Blue),
            ]
        );
        assert!(out.lines().iter().all(|line| line.screen_only));
    }

    #[test]
    fn test_hosts_sorted_lexically() {
        let mut per_host = IndexMap::new();
        per_host.insert("web2".to_string(), HostStats::default());
        per_host.insert("db1".to_string(), HostStats::default());
        per_host.insert("web10".to_string(), HostStats::default());

        let mut out = CaptureDisplay::new();
        SummaryAggregator::default().render(&per_host, &mut out).unwrap();

        let hosts: Vec<_> = out
            .texts()
            .into_iter()
            .filter(|t| !t.is_empty() && !t.starts_with(' ') && t.trim_end() != t)
            .map(|t| t.trim_end().to_string())
            .collect();
        assert_eq!(hosts, ["db1", "web10", "web2"]);
    }

    #[test]
    fn test_failed_reads_failures_count() {
        let mut per_host = IndexMap::new();
        per_host.insert("db1".to_string(), stats(0, 0, 0, 4, 0));

        let mut out = CaptureDisplay::new();
        SummaryAggregator::default().render(&per_host, &mut out).unwrap();
        assert!(out.contains("❌ 4 Failed"));
        assert_eq!(out.find("4 Failed").unwrap().color(), Some(Color::Red));
    }

    #[test]
    fn test_no_color_keeps_zero_lines_uncolored() {
        let classifier = StatusClassifier::new(FeatureFlags::new(true, false));
        let mut per_host = IndexMap::new();
        per_host.insert("web1".to_string(), HostStats::default());

        let mut out = CaptureDisplay::new();
        SummaryAggregator::new(classifier)
            .render(&per_host, &mut out)
            .unwrap();
        assert!(out.lines().iter().all(|line| line.color().is_none()));
    }

    #[test]
    fn test_host_status_line_colors() {
        let classifier = StatusClassifier::default();
        let (line, color) = host_status_line("web1", &stats(1, 0, 1, 0, 0), &classifier);
        assert_eq!(line.len(), 26);
        assert_eq!(color, Some(Color::Red));

        let (_, color) = host_status_line("web1", &stats(1, 2, 0, 0, 0), &classifier);
        assert_eq!(color, Some(Color::Yellow));

        let (_, color) = host_status_line("web1", &stats(1, 0, 0, 0, 0), &classifier);
        assert_eq!(color, Some(Color::Green));
    }

    #[test]
    fn test_custom_closing_message() {
        let mut out = CaptureDisplay::new();
        SummaryAggregator::default()
            .with_closing_message("Thanks for flying")
            .render(&IndexMap::new(), &mut out)
            .unwrap();
        assert_eq!(out.texts().last().map(String::as_str), Some("Thanks for flying"));
    }
}
