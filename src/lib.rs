//! # pretty-callback
//!
//! An emoji and color annotated console reporter for configuration
//! management runs. It consumes execution events (play start, task start,
//! per-host results, loop items, includes, final stats) and renders them as
//! a human-friendly, role-grouped log.
//!
//! ```text
//! ╭──────────────────────────────────────╮
//! │                Deploy                │
//! ╰──────────────────────────────────────╯
//!
//! ▶️ web role
//! ─────────────
//! [web1] 🔄️ Install nginx (Changed)
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use pretty_callback::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut callback = PrettyCallback::new();
//!     for line in std::io::stdin().lines() {
//!         let event: ExecutionEvent = serde_json::from_str(&line?)?;
//!         callback.handle(&event)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod callback;
pub mod config;
pub mod error;

pub use error::{Error, Result};

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::callback::prelude::*;
    pub use crate::config::ReporterConfig;
    pub use crate::error::{Error, Result};
}

/// Version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
