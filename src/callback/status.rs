//! Status categories and their (marker, color) classification.
//!
//! The category table is fixed: every outcome maps to one emoji marker, one
//! color and one human label. [`StatusClassifier`] applies the reporter's
//! [`FeatureFlags`] on top of that table.

use std::fmt;
use std::str::FromStr;

use colored::Color;

use crate::config::ReporterConfig;
use crate::error::Error;

/// Neutral tone used for zero counts and item detail lines.
pub const DIM: Color = Color::BrightBlack;

/// Marker used for the fact-gathering task.
pub const FACTS_MARKER: &str = "🛂";

/// Marker used in role and handler section headers.
pub const SECTION_MARKER: &str = "▶️";

// ============================================================================
// Status Categories
// ============================================================================

/// Outcome category of a task, item, or internal message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// Completed with no changes
    Ok,
    /// Completed and changed the target
    Changed,
    /// Skipped by a condition
    Skipped,
    /// Failed
    Failed,
    /// Host could not be reached
    Unreachable,
    /// Internal warning message
    Warning,
    /// Internal informational message
    Info,
}

impl StatusCategory {
    /// Every category, in table order.
    pub const ALL: [StatusCategory; 7] = [
        StatusCategory::Ok,
        StatusCategory::Changed,
        StatusCategory::Skipped,
        StatusCategory::Failed,
        StatusCategory::Unreachable,
        StatusCategory::Warning,
        StatusCategory::Info,
    ];

    /// Categories shown per host in the end-of-run summary, in display order.
    pub const SUMMARY_ORDER: [StatusCategory; 5] = [
        StatusCategory::Ok,
        StatusCategory::Changed,
        StatusCategory::Unreachable,
        StatusCategory::Failed,
        StatusCategory::Skipped,
    ];

    /// The emoji marker for this category.
    pub fn marker(self) -> &'static str {
        match self {
            StatusCategory::Ok => "✅",
            StatusCategory::Changed => "🔄️",
            StatusCategory::Skipped => "⏭️",
            StatusCategory::Failed => "❌",
            StatusCategory::Unreachable => "🚫",
            StatusCategory::Warning => "⚠️",
            StatusCategory::Info => "ℹ️",
        }
    }

    /// The color for this category.
    pub fn color(self) -> Color {
        match self {
            StatusCategory::Ok => Color::Green,
            StatusCategory::Changed | StatusCategory::Warning => Color::Yellow,
            StatusCategory::Skipped => Color::Blue,
            StatusCategory::Failed | StatusCategory::Unreachable => Color::Red,
            StatusCategory::Info => Color::Cyan,
        }
    }

    /// The human label used in the summary.
    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::Ok => "Successful",
            StatusCategory::Changed => "Changes",
            StatusCategory::Skipped => "Skipped",
            StatusCategory::Failed => "Failed",
            StatusCategory::Unreachable => "Unreachable",
            StatusCategory::Warning => "Warnings",
            StatusCategory::Info => "Info",
        }
    }

    /// The lowercase category name.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Ok => "ok",
            StatusCategory::Changed => "changed",
            StatusCategory::Skipped => "skipped",
            StatusCategory::Failed => "failed",
            StatusCategory::Unreachable => "unreachable",
            StatusCategory::Warning => "warning",
            StatusCategory::Info => "info",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Feature Flags
// ============================================================================

/// Output suppression flags, fixed for the lifetime of a reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Strip colors from every line
    pub no_color: bool,
    /// Strip emoji markers from every line
    pub no_emoji: bool,
}

impl FeatureFlags {
    /// Create flags from explicit values.
    pub fn new(no_color: bool, no_emoji: bool) -> Self {
        Self { no_color, no_emoji }
    }

    /// Read the flags from the environment variables [`ReporterConfig`] honors.
    pub fn from_env() -> Self {
        let mut config = ReporterConfig::default();
        config.apply_env_overrides();
        config.feature_flags()
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Maps categories to markers and colors, honoring [`FeatureFlags`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier {
    flags: FeatureFlags,
}

impl StatusClassifier {
    /// Create a classifier for the given flags.
    pub fn new(flags: FeatureFlags) -> Self {
        Self { flags }
    }

    /// The flags this classifier applies.
    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    /// Marker and color for a category.
    pub fn classify(&self, category: StatusCategory) -> (&'static str, Option<Color>) {
        (self.marker(category.marker()), self.paint(category.color()))
    }

    /// Marker and color for a category given by name.
    ///
    /// Unknown names classify as an empty marker with no color.
    pub fn classify_name(&self, name: &str) -> (&'static str, Option<Color>) {
        name.parse::<StatusCategory>()
            .map_or(("", None), |category| self.classify(category))
    }

    /// `marker`, or nothing when emoji are disabled.
    pub fn marker(&self, marker: &'static str) -> &'static str {
        if self.flags.no_emoji {
            ""
        } else {
            marker
        }
    }

    /// `color`, or nothing when colors are disabled.
    pub fn paint(&self, color: Color) -> Option<Color> {
        if self.flags.no_color {
            None
        } else {
            Some(color)
        }
    }
}
