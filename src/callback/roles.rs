//! Role and handler section tracking.
//!
//! Tasks that belong to a role are grouped under a `▶️ {role} role` header,
//! printed once each time the running role changes. Handlers get their own
//! `▶️ {role} handlers` header, printed once per role per play.
//!
//! Starting a new play forgets which handler headers were printed but keeps
//! the current role, so a role that continues straight into the next play
//! does not get a second role header.

use std::collections::HashSet;
use std::io;

use colored::Color;

use super::display::DisplaySink;
use super::status::{StatusClassifier, SECTION_MARKER};

/// Running section state owned by one reporter.
#[derive(Debug, Clone, Default)]
pub struct RoleSectionTracker {
    current_role: Option<String>,
    printed_handler_roles: HashSet<String>,
}

impl RoleSectionTracker {
    /// Create a tracker with no open section.
    pub fn new() -> Self {
        Self::default()
    }

    /// The role whose header was printed last.
    pub fn current_role(&self) -> Option<&str> {
        self.current_role.as_deref()
    }

    /// Whether a handler header was already printed for `role` in this play.
    pub fn handler_header_printed(&self, role: &str) -> bool {
        self.printed_handler_roles.contains(role)
    }

    /// A task is starting; print a role header when the role changes.
    pub fn on_task_start(
        &mut self,
        role: Option<&str>,
        classifier: &StatusClassifier,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let Some(role) = role.filter(|r| !r.is_empty()) else {
            return Ok(());
        };
        if self.current_role.as_deref() == Some(role) {
            return Ok(());
        }

        Self::print_header(&format!("{role} role"), Color::Cyan, classifier, out)?;
        self.current_role = Some(role.to_string());
        Ok(())
    }

    /// A handler is starting; print its role's handler header once per play.
    pub fn on_handler_task_start(
        &mut self,
        role: Option<&str>,
        classifier: &StatusClassifier,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let Some(role) = role.filter(|r| !r.is_empty()) else {
            return Ok(());
        };
        if self.printed_handler_roles.contains(role) {
            return Ok(());
        }

        Self::print_header(&format!("{role} handlers"), Color::Yellow, classifier, out)?;
        self.printed_handler_roles.insert(role.to_string());
        Ok(())
    }

    /// A play is starting.
    pub fn on_play_start(&mut self) {
        self.printed_handler_roles.clear();
    }

    fn print_header(
        title: &str,
        color: Color,
        classifier: &StatusClassifier,
        out: &mut dyn DisplaySink,
    ) -> io::Result<()> {
        let header = with_marker(classifier.marker(SECTION_MARKER), title);
        let divider = "─".repeat(header.chars().count() + 2);
        let color = classifier.paint(color);

        out.screen_line("", None)?;
        out.screen_line(&header, color)?;
        out.screen_line(&divider, color)
    }
}

/// `"{marker} {rest}"`, or just `rest` when the marker is suppressed.
pub(crate) fn with_marker(marker: &str, rest: &str) -> String {
    if marker.is_empty() {
        rest.to_string()
    } else {
        format!("{marker} {rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::display::CaptureDisplay;
    use crate::callback::status::FeatureFlags;

    #[test]
    fn test_role_header_printed_once_for_same_role() {
        let classifier = StatusClassifier::default();
        let mut tracker = RoleSectionTracker::new();
        let mut out = CaptureDisplay::new();

        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();
        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();

        assert_eq!(
            out.texts(),
            vec![String::new(), "▶️ web role".to_string(), "─".repeat(13)]
        );
        assert_eq!(tracker.current_role(), Some("web"));
    }

    #[test]
    fn test_role_change_prints_new_header() {
        let classifier = StatusClassifier::default();
        let mut tracker = RoleSectionTracker::new();
        let mut out = CaptureDisplay::new();

        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();
        tracker.on_task_start(None, &classifier, &mut out).unwrap();
        tracker.on_task_start(Some("db"), &classifier, &mut out).unwrap();

        assert_eq!(out.count_lines_containing(" role"), 2);
        assert_eq!(tracker.current_role(), Some("db"));
    }

    #[test]
    fn test_absent_role_keeps_current_role() {
        let classifier = StatusClassifier::default();
        let mut tracker = RoleSectionTracker::new();
        let mut out = CaptureDisplay::new();

        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();
        tracker.on_task_start(None, &classifier, &mut out).unwrap();
        tracker.on_task_start(Some(""), &classifier, &mut out).unwrap();

        assert_eq!(tracker.current_role(), Some("web"));
        assert_eq!(out.lines().len(), 3);
    }

    #[test]
    fn test_handler_header_once_per_play() {
        let classifier = StatusClassifier::default();
        let mut tracker = RoleSectionTracker::new();
        let mut out = CaptureDisplay::new();

        tracker
            .on_handler_task_start(Some("web"), &classifier, &mut out)
            .unwrap();
        tracker
            .on_handler_task_start(Some("web"), &classifier, &mut out)
            .unwrap();
        assert_eq!(out.count_lines_containing("web handlers"), 1);

        tracker.on_play_start();
        tracker
            .on_handler_task_start(Some("web"), &classifier, &mut out)
            .unwrap();
        assert_eq!(out.count_lines_containing("web handlers"), 2);
    }

    #[test]
    fn test_play_start_keeps_current_role() {
        let classifier = StatusClassifier::default();
        let mut tracker = RoleSectionTracker::new();
        let mut out = CaptureDisplay::new();

        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();
        tracker.on_play_start();
        tracker.on_task_start(Some("web"), &classifier, &mut out).unwrap();

        assert_eq!(out.count_lines_containing("web role"), 1);
        assert_eq!(tracker.current_role(), Some("web"));
    }

    #[test]
    fn test_header_colors_and_flags() {
        let mut out = CaptureDisplay::new();
        let mut tracker = RoleSectionTracker::new();
        tracker
            .on_task_start(Some("web"), &StatusClassifier::default(), &mut out)
            .unwrap();
        tracker
            .on_handler_task_start(Some("web"), &StatusClassifier::default(), &mut out)
            .unwrap();
        assert_eq!(out.lines()[1].color(), Some(Color::Cyan));
        assert_eq!(out.lines()[4].color(), Some(Color::Yellow));
        assert!(out.lines().iter().all(|line| line.screen_only));

        let plain = StatusClassifier::new(FeatureFlags::new(true, true));
        let mut out = CaptureDisplay::new();
        RoleSectionTracker::new()
            .on_task_start(Some("db"), &plain, &mut out)
            .unwrap();
        assert_eq!(
            out.texts(),
            vec![String::new(), "db role".to_string(), "─".repeat(9)]
        );
        assert_eq!(out.lines()[1].color(), None);
    }
}
