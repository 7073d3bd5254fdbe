//! The pretty stdout callback.
//!
//! [`PrettyCallback`] receives [`ExecutionEvent`]s one at a time and routes
//! each to the component that renders it. It owns every piece of state the
//! reporter keeps for a run and the display sink it writes to.
//!
//! # Example
//!
//! ```rust,ignore
//! use pretty_callback::prelude::*;
//!
//! let mut callback = PrettyCallback::builder()
//!     .no_emoji(true)
//!     .build(CaptureDisplay::new());
//!
//! callback.handle(&ExecutionEvent::PlayStart {
//!     title: "Deploy".into(),
//!     file_name: None,
//! })?;
//! ```

use tracing::{debug, trace};

use super::display::{ConsoleDisplay, DisplaySink};
use super::render::ResultRenderer;
use super::roles::RoleSectionTracker;
use super::status::{FeatureFlags, StatusClassifier};
use super::summary::SummaryAggregator;
use super::types::ExecutionEvent;
use crate::config::ReporterConfig;
use crate::error::Result;

/// Name the callback registers under.
pub const CALLBACK_NAME: &str = "pretty";

/// Emoji and color annotated, role-grouped console reporter.
#[derive(Debug)]
pub struct PrettyCallback<D: DisplaySink = ConsoleDisplay> {
    classifier: StatusClassifier,
    roles: RoleSectionTracker,
    renderer: ResultRenderer,
    summary: SummaryAggregator,
    display: D,
}

impl PrettyCallback<ConsoleDisplay> {
    /// Create a callback writing to stdout, configured from the environment.
    pub fn new() -> Self {
        let mut config = ReporterConfig::default();
        config.apply_env_overrides();
        Self::with_config(&config, ConsoleDisplay::new())
    }

    /// Get the builder for this callback.
    ///
    /// The builder picks the display sink at [`PrettyCallbackBuilder::build`].
    pub fn builder() -> PrettyCallbackBuilder {
        PrettyCallbackBuilder::new()
    }
}

impl Default for PrettyCallback<ConsoleDisplay> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DisplaySink> PrettyCallback<D> {
    /// Create a callback from a resolved configuration.
    pub fn with_config(config: &ReporterConfig, display: D) -> Self {
        let classifier = StatusClassifier::new(config.feature_flags());
        debug!(
            no_color = config.no_color,
            no_emoji = config.no_emoji,
            "pretty callback configured"
        );

        Self {
            classifier,
            roles: RoleSectionTracker::new(),
            renderer: ResultRenderer::new(classifier)
                .with_min_box_width(config.min_box_width)
                .with_truncate_at(config.truncate_at),
            summary: SummaryAggregator::new(classifier)
                .with_closing_message(config.closing_message.clone()),
            display,
        }
    }

    /// The flags fixed at construction.
    pub fn flags(&self) -> FeatureFlags {
        self.classifier.flags()
    }

    /// The role whose header was printed last.
    pub fn current_role(&self) -> Option<&str> {
        self.roles.current_role()
    }

    /// Whether the handler header for `role` was printed in the current play.
    pub fn handler_header_printed(&self, role: &str) -> bool {
        self.roles.handler_header_printed(role)
    }

    /// The display sink.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The display sink, mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Consume the callback and return the display sink.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Render one event.
    pub fn handle(&mut self, event: &ExecutionEvent) -> Result<()> {
        trace!(?event, "handling event");
        let out: &mut dyn DisplaySink = &mut self.display;

        match event {
            ExecutionEvent::PlayStart { title, file_name } => {
                self.renderer.play_start(title, file_name.as_deref(), out)?;
                self.roles.on_play_start();
            }
            ExecutionEvent::TaskStart { role_name, .. } => {
                self.roles
                    .on_task_start(role_name.as_deref(), &self.classifier, out)?;
            }
            ExecutionEvent::HandlerTaskStart { role_name, .. } => {
                self.roles
                    .on_handler_task_start(role_name.as_deref(), &self.classifier, out)?;
            }
            ExecutionEvent::RunnerStart { .. } => {}
            ExecutionEvent::Include { hosts, filename } => {
                self.renderer.include(hosts, filename.as_deref(), out)?;
            }
            ExecutionEvent::RunnerResult { outcome, result } => {
                self.renderer.runner_result(*outcome, result, out)?;
            }
            ExecutionEvent::ItemResult { outcome, result } => {
                self.renderer.item_result(*outcome, result, out)?;
            }
            ExecutionEvent::Stats { per_host } => {
                debug!(hosts = per_host.len(), "rendering summary");
                self.summary.render(per_host, out)?;
            }
        }
        Ok(())
    }

    /// Render a sequence of events in order.
    pub fn handle_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a ExecutionEvent>,
    ) -> Result<()> {
        for event in events {
            self.handle(event)?;
        }
        Ok(())
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for PrettyCallback with fluent configuration.
///
/// Unlike [`PrettyCallback::new`], the builder does not read the environment.
#[derive(Debug, Clone, Default)]
pub struct PrettyCallbackBuilder {
    config: ReporterConfig,
}

impl PrettyCallbackBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ReporterConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ReporterConfig) -> Self {
        Self { config }
    }

    /// Disable colored output.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.config.no_color = no_color;
        self
    }

    /// Disable emoji markers.
    pub fn no_emoji(mut self, no_emoji: bool) -> Self {
        self.config.no_emoji = no_emoji;
        self
    }

    /// Set the line printed after the summary.
    pub fn closing_message(mut self, message: impl Into<String>) -> Self {
        self.config.closing_message = message.into();
        self
    }

    /// Set the minimum interior width of the play banner.
    pub fn min_box_width(mut self, width: usize) -> Self {
        self.config.min_box_width = width;
        self
    }

    /// Set the detail block truncation cap.
    pub fn truncate_at(mut self, cap: usize) -> Self {
        self.config.truncate_at = cap;
        self
    }

    /// Build the callback around a display sink.
    pub fn build<D: DisplaySink>(self, display: D) -> PrettyCallback<D> {
        PrettyCallback::with_config(&self.config, display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::display::CaptureDisplay;
    use crate::callback::types::{ItemOutcome, RunnerOutcome, TaskInfo, TaskResult};

    fn task_start(role: Option<&str>) -> ExecutionEvent {
        ExecutionEvent::TaskStart {
            task_name: Some("t".into()),
            role_name: role.map(String::from),
        }
    }

    #[test]
    fn test_builder_sets_flags() {
        let callback = PrettyCallback::builder()
            .no_color(true)
            .no_emoji(true)
            .build(CaptureDisplay::new());
        assert_eq!(callback.flags(), FeatureFlags::new(true, true));
    }

    #[test]
    fn test_runner_start_renders_nothing() {
        let mut callback = PrettyCallback::builder().build(CaptureDisplay::new());
        callback
            .handle(&ExecutionEvent::RunnerStart {
                host: "web1".into(),
                task_name: None,
            })
            .unwrap();
        assert!(callback.display().lines().is_empty());
    }

    #[test]
    fn test_play_start_resets_handlers_not_role() {
        let mut callback = PrettyCallback::builder().build(CaptureDisplay::new());
        callback.handle(&task_start(Some("web"))).unwrap();
        callback
            .handle(&ExecutionEvent::HandlerTaskStart {
                task_name: Some("restart".into()),
                role_name: Some("web".into()),
            })
            .unwrap();
        assert!(callback.handler_header_printed("web"));

        callback
            .handle(&ExecutionEvent::PlayStart {
                title: "Second".into(),
                file_name: None,
            })
            .unwrap();

        assert!(!callback.handler_header_printed("web"));
        assert_eq!(callback.current_role(), Some("web"));
    }

    #[test]
    fn test_results_route_to_renderer() {
        let mut callback = PrettyCallback::builder().build(CaptureDisplay::new());
        let result = TaskResult::new("web1", TaskInfo::named("Ping"));

        callback
            .handle_all(&[
                ExecutionEvent::RunnerResult {
                    outcome: RunnerOutcome::Ok,
                    result: result.clone(),
                },
                ExecutionEvent::ItemResult {
                    outcome: ItemOutcome::Skipped,
                    result,
                },
            ])
            .unwrap();

        assert_eq!(
            callback.display().texts(),
            ["[web1] ✅ Ping (Success)", "[web1] ⏭️ Ping (Skipped)"]
        );
    }

    #[test]
    fn test_builder_passes_truncation_cap() {
        let mut callback = PrettyCallback::builder()
            .truncate_at(5)
            .build(CaptureDisplay::new());
        let result = TaskResult::new("h", TaskInfo::named("Fail")).with_payload(
            crate::callback::types::ResultPayload::new().with("msg", "0123456789"),
        );
        callback
            .handle(&ExecutionEvent::RunnerResult {
                outcome: RunnerOutcome::Failed,
                result,
            })
            .unwrap();
        assert!(callback.display().contains("msg: 01234... (truncated)"));
    }
}
