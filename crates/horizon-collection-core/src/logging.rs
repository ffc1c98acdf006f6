//! Logging and diagnostic facilities for Horizon Collection.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output per subsystem
//! - The [`DiagnosticSink`] interface the data source reports through
//! - [`TracingSink`], the default sink forwarding to `tracing`
//! - [`RecordingSink`], an in-memory sink with an explicit assertion hook for tests
//! - Performance spans for timing reconciliation passes
//!
//! # Tracing Integration
//!
//! Nothing is printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_collection=debug")
//!     .init();
//! ```
//!
//! # Injected Diagnostics
//!
//! Data sources do not write to a process-wide logger. They hold an
//! `Arc<dyn DiagnosticSink>` and report through it:
//!
//! ```
//! use std::sync::Arc;
//! use horizon_collection_core::logging::{DiagnosticLevel, DiagnosticSink, RecordingSink};
//!
//! let sink = Arc::new(RecordingSink::new());
//! sink.record(DiagnosticLevel::Debug, "horizon_collection::view", "inserted 2 items");
//! assert_eq!(sink.messages().len(), 1);
//! sink.assert_no_suspicious_messages();
//! ```

use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Span names used throughout Horizon Collection for tracing.
pub mod span_names {
    /// A full reconciliation pass (store mutation plus widget commands).
    pub const RECONCILE: &str = "horizon_collection::reconcile";
    /// View kind registration ahead of a structural command.
    pub const REGISTER: &str = "horizon_collection::register";
    /// Widget lifecycle event dispatch.
    pub const DISPATCH: &str = "horizon_collection::dispatch";
}

/// Target names for log filtering.
pub mod targets {
    /// Crate-wide target.
    pub const CORE: &str = "horizon_collection";
    /// Sectioned store mutations and contract violations.
    pub const MODEL: &str = "horizon_collection::model";
    /// Reconciliation and widget commands.
    pub const VIEW: &str = "horizon_collection::view";
    /// Handler dispatch of widget lifecycle events.
    pub const DISPATCH: &str = "horizon_collection::dispatch";
}

/// Severity of a diagnostic message, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A leveled destination for diagnostic messages.
///
/// Implementations must be cheap to call; the data source reports every
/// reconciliation pass.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message.
    fn record(&self, level: DiagnosticLevel, target: &'static str, message: &str);

    /// Returns `true` if messages at `level` would be kept.
    ///
    /// Callers use this to skip formatting work for discarded messages.
    fn enabled(&self, _level: DiagnosticLevel) -> bool {
        true
    }
}

/// The default sink: forwards every message to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    min_level: DiagnosticLevel,
}

impl TracingSink {
    /// Create a sink that keeps messages at `Debug` and above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that drops messages below `min_level`.
    pub fn with_min_level(min_level: DiagnosticLevel) -> Self {
        Self { min_level }
    }
}

impl DiagnosticSink for TracingSink {
    fn record(&self, level: DiagnosticLevel, target: &'static str, message: &str) {
        if !self.enabled(level) {
            return;
        }
        // `tracing` needs a constant target, so the subsystem travels as a field.
        match level {
            DiagnosticLevel::Trace => crate::collection_trace!(subsystem = target, "{message}"),
            DiagnosticLevel::Debug => crate::collection_debug!(subsystem = target, "{message}"),
            DiagnosticLevel::Info => crate::collection_info!(subsystem = target, "{message}"),
            DiagnosticLevel::Warn => crate::collection_warn!(subsystem = target, "{message}"),
            DiagnosticLevel::Error => crate::collection_error!(subsystem = target, "{message}"),
        }
    }

    fn enabled(&self, level: DiagnosticLevel) -> bool {
        level >= self.min_level
    }
}

/// Keywords that [`RecordingSink::assert_no_suspicious_messages`] rejects.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &["fail", "failed", "error"];

/// A single message captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub level: DiagnosticLevel,
    pub target: &'static str,
    pub message: String,
}

/// An in-memory sink for tests and debugging sessions.
///
/// Recording never panics. The keyword check is an explicit call,
/// [`assert_no_suspicious_messages`](Self::assert_no_suspicious_messages),
/// made by whoever owns the sink.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<RecordedMessage>>,
    min_level: DiagnosticLevel,
}

impl RecordingSink {
    /// Create a sink that keeps every message at `Debug` and above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that drops messages below `min_level`.
    pub fn with_min_level(min_level: DiagnosticLevel) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            min_level,
        }
    }

    /// Returns a snapshot of all recorded messages, oldest first.
    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.lock().clone()
    }

    /// Returns `true` if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .iter()
            .any(|m| m.message.contains(needle))
    }

    /// Discard all recorded messages.
    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    /// Returns the first recorded message containing a suspicious keyword.
    pub fn first_suspicious_message(&self) -> Option<RecordedMessage> {
        self.messages
            .lock()
            .iter()
            .find(|m| {
                let lowered = m.message.to_lowercase();
                SUSPICIOUS_KEYWORDS.iter().any(|k| lowered.contains(k))
            })
            .cloned()
    }

    /// Panic if any recorded message mentions a failure.
    ///
    /// # Panics
    ///
    /// Panics with the offending message when any message contains one of
    /// [`SUSPICIOUS_KEYWORDS`], compared case-insensitively.
    #[track_caller]
    pub fn assert_no_suspicious_messages(&self) {
        if let Some(found) = self.first_suspicious_message() {
            panic!(
                "suspicious diagnostic [{} {}]: {}",
                found.level, found.target, found.message
            );
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, level: DiagnosticLevel, target: &'static str, message: &str) {
        if !self.enabled(level) {
            return;
        }
        self.messages.lock().push(RecordedMessage {
            level,
            target,
            message: message.to_owned(),
        });
    }

    fn enabled(&self, level: DiagnosticLevel) -> bool {
        level >= self.min_level
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time one reconciliation pass.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span =
            tracing::info_span!(target: "horizon_collection::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

static_assertions::assert_impl_all!(RecordingSink: Send, Sync);
static_assertions::assert_impl_all!(TracingSink: Send, Sync);

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with the crate target.
#[macro_export]
macro_rules! collection_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_collection", $($arg)*)
    };
}

#[macro_export]
macro_rules! collection_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_collection", $($arg)*)
    };
}

#[macro_export]
macro_rules! collection_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "horizon_collection", $($arg)*)
    };
}

#[macro_export]
macro_rules! collection_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_collection", $($arg)*)
    };
}

#[macro_export]
macro_rules! collection_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "horizon_collection", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(DiagnosticLevel::Trace < DiagnosticLevel::Debug);
        assert!(DiagnosticLevel::Warn < DiagnosticLevel::Error);
        assert_eq!(DiagnosticLevel::default(), DiagnosticLevel::Debug);
    }

    #[test]
    fn test_recording_sink_filters_levels() {
        let sink = RecordingSink::with_min_level(DiagnosticLevel::Info);
        sink.record(DiagnosticLevel::Debug, targets::VIEW, "dropped");
        sink.record(DiagnosticLevel::Warn, targets::VIEW, "kept");

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "kept");
        assert_eq!(messages[0].level, DiagnosticLevel::Warn);
    }

    #[test]
    fn test_recording_does_not_panic_on_keywords() {
        let sink = RecordingSink::new();
        sink.record(DiagnosticLevel::Error, targets::MODEL, "insert FAILED");
        assert!(sink.contains("FAILED"));
        assert!(sink.first_suspicious_message().is_some());
    }

    #[test]
    #[should_panic(expected = "suspicious diagnostic")]
    fn test_assert_no_suspicious_messages() {
        let sink = RecordingSink::new();
        sink.record(DiagnosticLevel::Debug, targets::VIEW, "reloaded 3 sections");
        sink.record(DiagnosticLevel::Debug, targets::VIEW, "Error while reloading");
        sink.assert_no_suspicious_messages();
    }

    #[test]
    fn test_clear() {
        let sink = RecordingSink::new();
        sink.record(DiagnosticLevel::Debug, targets::VIEW, "fail");
        sink.clear();
        sink.assert_no_suspicious_messages();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_tracing_sink_enabled() {
        let sink = TracingSink::with_min_level(DiagnosticLevel::Warn);
        assert!(!sink.enabled(DiagnosticLevel::Info));
        assert!(sink.enabled(DiagnosticLevel::Error));
        // No subscriber installed; must not panic.
        sink.record(DiagnosticLevel::Error, targets::VIEW, "reload");
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
