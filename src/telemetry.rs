//! Logging setup and the controller's reporting seam.
//!
//! Actions never surface failures to their caller. They hand them to a
//! [`Reporter`]; production uses [`TracingReporter`], tests inject a
//! [`RecordingReporter`] and assert on what it captured.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Error;

/// Initialize structured logging.
///
/// Configures a compact `tracing-subscriber` fmt layer filtered by
/// `RUST_LOG`, defaulting to `info,chirec_ui=debug`.
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chirec_ui=debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Sink for controller diagnostics.
pub trait Reporter: Send + Sync {
    /// An action failed; `context` names what was attempted.
    fn failure(&self, context: &str, error: &Error);

    /// A notable, non-failing occurrence.
    fn info(&self, message: &str);
}

/// Forwards reports to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn failure(&self, context: &str, error: &Error) {
        tracing::error!(name: "ui.action.failed", context = %context, error = %error, "{context}");
    }

    fn info(&self, message: &str) {
        tracing::info!(name: "ui.info", "{message}");
    }
}

/// Severity of a captured report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Failure,
}

/// A captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    /// `context: error` for failures, the message for info.
    pub message: String,
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reports_mut(&self) -> MutexGuard<'_, Vec<Report>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports_mut().clone()
    }

    /// Messages of failure reports, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.messages(ReportLevel::Failure)
    }

    /// Messages of info reports, oldest first.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.messages(ReportLevel::Info)
    }

    fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.reports_mut()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn failure(&self, context: &str, error: &Error) {
        self.reports_mut().push(Report {
            level: ReportLevel::Failure,
            message: format!("{context}: {error}"),
        });
    }

    fn info(&self, message: &str) {
        self.reports_mut().push(Report {
            level: ReportLevel::Info,
            message: message.to_string(),
        });
    }
}
