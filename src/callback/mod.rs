//! The pretty callback and its components.
//!
//! # Architecture
//!
//! ```text
//!                    ExecutionEvent
//!                          │
//!                          ▼
//!                ┌───────────────────┐
//!                │  PrettyCallback   │  single dispatch per event
//!                └───────────────────┘
//!        ┌──────────────┬───┴──────────┬────────────────┐
//!        ▼              ▼              ▼                ▼
//! RoleSectionTracker ResultRenderer SummaryAggregator StatusClassifier
//!        └──────────────┴──────┬───────┘
//!                              ▼
//!                         DisplaySink
//! ```
//!
//! 1. **[`StatusClassifier`]**: status category to emoji marker and color,
//!    honoring the `no_color` / `no_emoji` flags
//! 2. **[`RoleSectionTracker`]**: role and handler section headers
//! 3. **[`ResultRenderer`]**: play banners, include lines and per-host results
//! 4. **[`SummaryAggregator`]**: the end-of-run per-host report
//! 5. **[`PrettyCallback`]**: owns the above and routes each event
//!
//! Output goes through a [`DisplaySink`]. [`ConsoleDisplay`] writes to a
//! terminal and [`CaptureDisplay`] records lines for inspection.
//!
//! # Quick Start with Prelude
//!
//! ```rust,ignore
//! use pretty_callback::callback::prelude::*;
//!
//! let mut callback = PrettyCallback::new();
//! callback.handle(&ExecutionEvent::TaskStart {
//!     task_name: Some("Install nginx".into()),
//!     role_name: Some("web".into()),
//! })?;
//! ```

pub mod display;
pub mod pretty;
pub mod render;
pub mod roles;
pub mod status;
pub mod summary;
pub mod types;

pub use display::{CaptureDisplay, CapturedLine, CapturedSegment, ConsoleDisplay, DisplaySink};
pub use pretty::{PrettyCallback, PrettyCallbackBuilder, CALLBACK_NAME};
pub use render::ResultRenderer;
pub use roles::RoleSectionTracker;
pub use status::{FeatureFlags, StatusCategory, StatusClassifier};
pub use summary::SummaryAggregator;
pub use types::{
    DiffEntry, ExecutionEvent, HostStats, ItemOutcome, ItemPair, ResultPayload, RunnerOutcome,
    TaskInfo, TaskResult,
};

/// Convenient re-exports for building and driving the reporter.
pub mod prelude {
    pub use super::display::{CaptureDisplay, ConsoleDisplay, DisplaySink};
    pub use super::pretty::{PrettyCallback, PrettyCallbackBuilder};
    pub use super::status::{FeatureFlags, StatusCategory, StatusClassifier};
    pub use super::types::{
        ExecutionEvent, HostStats, ItemOutcome, ResultPayload, RunnerOutcome, TaskInfo,
        TaskResult,
    };
}
