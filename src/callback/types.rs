//! Event and payload types consumed by the pretty callback.
//!
//! Engines either construct [`ExecutionEvent`] values directly or emit them
//! as JSON objects tagged by an `"event"` field:
//!
//! ```json
//! {"event": "play_start", "title": "Deploy"}
//! {"event": "task_start", "task_name": "Install package", "role_name": "web"}
//! {"event": "runner_result", "outcome": "changed", "host": "web1", "task": {"name": "Install package"}}
//! {"event": "stats", "per_host": {"web1": {"ok": 3, "changed": 1}}}
//! ```
//!
//! Result payloads are loosely shaped. [`ResultPayload`] keeps the raw
//! mapping and exposes named accessors that treat missing, null and empty
//! values as absent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::StatusCategory;

/// Label used when neither the result nor the task carries a name.
pub const UNNAMED_TASK: &str = "Unnamed task";

// ============================================================================
// Events
// ============================================================================

/// One event delivered by the orchestration engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// A play is starting.
    PlayStart {
        /// Play name as declared
        #[serde(default)]
        title: String,
        /// File the play was loaded from
        #[serde(default)]
        file_name: Option<String>,
    },
    /// A task is starting.
    TaskStart {
        /// Task name
        #[serde(default)]
        task_name: Option<String>,
        /// Role the task belongs to, if any
        #[serde(default)]
        role_name: Option<String>,
    },
    /// A handler task is starting.
    HandlerTaskStart {
        /// Handler name
        #[serde(default)]
        task_name: Option<String>,
        /// Role the handler belongs to, if any
        #[serde(default)]
        role_name: Option<String>,
    },
    /// A task began running on a host.
    RunnerStart {
        /// Target host
        host: String,
        /// Task name
        #[serde(default)]
        task_name: Option<String>,
    },
    /// An included file was processed for a set of hosts.
    Include {
        /// Hosts the include applies to
        #[serde(default)]
        hosts: Vec<String>,
        /// Included file or content name
        #[serde(default)]
        filename: Option<String>,
    },
    /// A task finished on a host.
    RunnerResult {
        /// Outcome reported by the engine
        outcome: RunnerOutcome,
        /// Host, task and payload
        #[serde(flatten)]
        result: TaskResult,
    },
    /// One loop iteration finished on a host.
    ItemResult {
        /// Outcome reported by the engine
        outcome: ItemOutcome,
        /// Host, task and payload
        #[serde(flatten)]
        result: TaskResult,
    },
    /// Final per-host statistics.
    Stats {
        /// Counts per host, in the order the engine reported them
        #[serde(default)]
        per_host: IndexMap<String, HostStats>,
    },
}

/// Outcome of a whole task on one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerOutcome {
    /// Completed without changes
    Ok,
    /// Completed with changes
    Changed,
    /// Failed
    Failed,
    /// Skipped
    Skipped,
    /// Host unreachable
    Unreachable,
}

/// Outcome of one loop iteration.
///
/// A changed iteration arrives as `Ok` with `changed: true` in its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Completed; may still carry a changed flag
    Ok,
    /// Failed
    Failed,
    /// Skipped
    Skipped,
}

// ============================================================================
// Task and Result
// ============================================================================

/// What the engine knows about the task that produced a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskInfo {
    /// Declared task name
    pub name: Option<String>,
    /// Module/action name, e.g. `ansible.builtin.debug`
    pub action: Option<String>,
    /// Task arguments as declared
    pub args: Map<String, Value>,
}

impl TaskInfo {
    /// Create task info with a declared name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the action name.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Add a declared argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Whether this is a debug-style task.
    pub fn is_debug(&self) -> bool {
        self.action
            .as_deref()
            .is_some_and(|action| action.ends_with("debug"))
    }

    /// Whether the task declares the given argument at all.
    pub fn declares(&self, arg: &str) -> bool {
        self.args.contains_key(arg)
    }

    /// The variable name a debug task was asked to print.
    pub fn declared_var(&self) -> Option<String> {
        self.args.get("var").map(value_text)
    }
}

/// A task or item result for one host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Host the result belongs to
    pub host: String,
    /// Explicit per-result task name, preferred over the task's own name
    #[serde(default)]
    pub task_name: Option<String>,
    /// The task that ran
    #[serde(default)]
    pub task: TaskInfo,
    /// Loosely-shaped result data
    #[serde(default)]
    pub payload: ResultPayload,
}

impl TaskResult {
    /// Create a result for a host and task.
    pub fn new(host: impl Into<String>, task: TaskInfo) -> Self {
        Self {
            host: host.into(),
            task,
            ..Self::default()
        }
    }

    /// Set the explicit per-result task name.
    #[must_use]
    pub fn with_task_name(mut self, name: impl Into<String>) -> Self {
        self.task_name = Some(name.into());
        self
    }

    /// Set the result payload.
    #[must_use]
    pub fn with_payload(mut self, payload: ResultPayload) -> Self {
        self.payload = payload;
        self
    }

    /// The name shown for this result.
    pub fn task_label(&self) -> &str {
        self.task_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.task.name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or(UNNAMED_TASK)
    }
}

// ============================================================================
// Result Payload
// ============================================================================

/// Optional-field view over a result mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPayload(Map<String, Value>);

impl ResultPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from any JSON value; non-objects yield an empty payload.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Add a key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw lookup; null counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Raw lookup of a truthy value.
    pub fn truthy(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_truthy(value))
    }

    /// Rendered text of a key, absent when missing, null or empty.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(value_text).filter(|text| !text.is_empty())
    }

    /// The `msg` field.
    pub fn msg(&self) -> Option<String> {
        self.text("msg")
    }

    /// The `stdout` field.
    pub fn stdout(&self) -> Option<String> {
        self.text("stdout")
    }

    /// The `stderr` field.
    pub fn stderr(&self) -> Option<String> {
        self.text("stderr")
    }

    /// The `stdout_lines` field; empty when missing or not a sequence.
    pub fn stdout_lines(&self) -> Vec<String> {
        match self.get("stdout_lines") {
            Some(Value::Array(lines)) => lines.iter().map(value_text).collect(),
            _ => Vec::new(),
        }
    }

    /// The `changed` flag.
    pub fn changed(&self) -> bool {
        self.truthy("changed").is_some()
    }

    /// The loop item as a key/value pair, when it has a key and a non-empty value.
    pub fn item(&self) -> Option<ItemPair> {
        let Some(Value::Object(item)) = self.get("item") else {
            return None;
        };

        let key = item.get("key").filter(|v| is_truthy(v)).map(value_text)?;
        let value = item
            .get("value")
            .filter(|v| !v.is_null())
            .map(value_text)
            .filter(|v| !v.is_empty())?;

        Some(ItemPair { key, value })
    }

    /// Diff entries that carry both a before and an after.
    ///
    /// A single diff object is treated as a one-element sequence.
    pub fn diffs(&self) -> Vec<DiffEntry> {
        let entries: Vec<&Value> = match self.get("diff") {
            Some(Value::Array(entries)) => entries.iter().collect(),
            Some(entry @ Value::Object(_)) => vec![entry],
            _ => Vec::new(),
        };

        entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_object()?;
                let before = entry.get("before").filter(|v| is_truthy(v))?;
                let after = entry.get("after").filter(|v| is_truthy(v))?;
                Some(DiffEntry {
                    before: value_text(before),
                    after: value_text(after),
                })
            })
            .collect()
    }
}

impl From<Value> for ResultPayload {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// A loop item's key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPair {
    /// Item key
    pub key: String,
    /// Item value, rendered as text
    pub value: String,
}

/// One before/after pair of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    /// State before the change
    pub before: String,
    /// State after the change
    pub after: String,
}

// ============================================================================
// Host Statistics
// ============================================================================

/// Final per-host counts supplied by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostStats {
    /// Tasks that completed without changes
    pub ok: u32,
    /// Tasks that made changes
    pub changed: u32,
    /// Tasks where the host was unreachable
    pub unreachable: u32,
    /// Failures, as counted by the engine
    pub failures: u32,
    /// Tasks that were skipped
    pub skipped: u32,
    /// Failures that were rescued
    pub rescued: u32,
    /// Failures that were ignored
    pub ignored: u32,
}

impl HostStats {
    /// Count shown for a summary category; `Failed` reads `failures`.
    pub fn count(&self, category: StatusCategory) -> u32 {
        match category {
            StatusCategory::Ok => self.ok,
            StatusCategory::Changed => self.changed,
            StatusCategory::Unreachable => self.unreachable,
            StatusCategory::Failed => self.failures,
            StatusCategory::Skipped => self.skipped,
            StatusCategory::Warning | StatusCategory::Info => 0,
        }
    }

    /// Check if there were any failures or unreachable attempts
    pub fn has_failures(&self) -> bool {
        self.failures > 0 || self.unreachable > 0
    }

    /// Check if there were any changes
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}

// ============================================================================
// Value Helpers
// ============================================================================

/// Render a JSON value for display: strings bare, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthiness of a loosely-typed value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
