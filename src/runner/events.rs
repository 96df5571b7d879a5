//! Run events and progress sinks
//!
//! The browser original reported progress through three callbacks
//! (`onProgress`, `onStepChange`, `onResultUpdate`). Here that inversion
//! of control becomes a single `ProgressSink` trait receiving a stream
//! of `RunEvent`s, with implementations for silence, in-memory capture,
//! and a console progress bar.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Status of a single test within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Not yet reached
    Waiting,
    /// Currently executing
    Running,
    /// Passed
    Success,
    /// Failed
    Failed,
    /// Passed with caveats
    Warning,
}

impl TestStatus {
    /// Console marker for this status
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Waiting => "…",
            Self::Running => "▶",
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Warning => "⚠",
        }
    }
}

/// One test outcome within a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Stable identifier, unique within a run
    pub id: String,
    /// Human-readable test name
    pub name: String,
    /// Outcome
    pub status: TestStatus,
    /// Detail message
    pub message: String,
}

impl TestResult {
    /// Convenience constructor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: TestStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// An event emitted during a validation run
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Overall progress milestone, 0..=100
    Progress(u8),
    /// Wizard step index changed
    Step(usize),
    /// A test result was produced or replaced
    Result(TestResult),
}

/// Trait for pluggable run-progress consumption
pub trait ProgressSink: Send + Sync {
    /// Receive one event
    fn on_event(&self, event: RunEvent);

    /// Report a progress milestone
    fn progress(&self, percent: u8) {
        self.on_event(RunEvent::Progress(percent));
    }

    /// Report a step change
    fn step(&self, step: usize) {
        self.on_event(RunEvent::Step(step));
    }

    /// Report a test result
    fn result(&self, result: TestResult) {
        self.on_event(RunEvent::Result(result));
    }
}

/// Sink that discards everything (default for parallel batch runs)
pub struct NoOpSink;

impl ProgressSink for NoOpSink {
    fn on_event(&self, _event: RunEvent) {
        // Do nothing
    }
}

/// Sink that records every event in order, for tests and batch capture
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<RunEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().clone()
    }

    /// Progress milestones received so far, in order
    pub fn progress_milestones(&self) -> Vec<u8> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn on_event(&self, event: RunEvent) {
        self.events.lock().push(event);
    }
}

/// Sink that drives an indicatif progress bar and prints results
pub struct ConsoleSink {
    bar: ProgressBar,
}

impl ConsoleSink {
    /// Create a bar labelled with the file under validation
    pub fn new(file_name: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{prefix:>20} [{bar:40}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix(file_name.to_string());
        Self { bar }
    }

    /// Finish the bar, leaving it at its final position
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl ProgressSink for ConsoleSink {
    fn on_event(&self, event: RunEvent) {
        match event {
            RunEvent::Progress(percent) => self.bar.set_position(u64::from(percent)),
            RunEvent::Step(_) => {}
            RunEvent::Result(result) => {
                let marker = match result.status {
                    TestStatus::Success => style(result.status.marker()).green(),
                    TestStatus::Failed => style(result.status.marker()).red(),
                    TestStatus::Warning => style(result.status.marker()).yellow(),
                    _ => style(result.status.marker()).dim(),
                };
                self.bar
                    .println(format!("   {} {}: {}", marker, result.name, result.message));
            }
        }
    }
}
