//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::models::{BusinessRecord, Table};
use crate::report::{PipelineEvent, PipelineReporter};
use crate::traits::{Fetcher, RecordCleaner, TableSink};

/// A batch of `n` distinct, fully populated records tagged with `tag`.
pub fn sample_batch(tag: &str, n: usize) -> Vec<BusinessRecord> {
    (0..n)
        .map(|i| {
            BusinessRecord::new(
                format!("{tag} Business {}", i + 1),
                format!("City {i}, State {tag}"),
                format!("555-{i:04}"),
                "Technology",
                format!("contact{i}@{}.com", tag.to_lowercase()),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ScriptedFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that replays a queue of responses.
///
/// Each call pops the first response. Once the queue is empty it returns
/// five records derived from the query, or a transient error if built with
/// [`always_failing`](Self::always_failing).
#[derive(Clone)]
pub struct ScriptedFetcher {
    responses: Arc<Mutex<Vec<Result<Vec<BusinessRecord>, AppError>>>>,
    calls: Arc<AtomicU32>,
    latency: Duration,
    always_fail: bool,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<Vec<BusinessRecord>, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(AtomicU32::new(0)),
            latency: Duration::ZERO,
            always_fail: false,
        }
    }

    pub fn always_failing() -> Self {
        Self {
            always_fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Total number of `fetch` calls across all clones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<BusinessRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let next = {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                None
            } else {
                Some(responses.remove(0))
            }
        };

        match next {
            Some(response) => response,
            None if self.always_fail => Err(AppError::transient(query, "simulated outage")),
            None => Ok(sample_batch(query, 5)),
        }
    }
}

// ---------------------------------------------------------------------------
// PanickingFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that panics for one specific query and succeeds otherwise.
#[derive(Clone)]
pub struct PanickingFetcher {
    trigger: String,
}

impl PanickingFetcher {
    pub fn new(trigger: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
        }
    }
}

impl Fetcher for PanickingFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<BusinessRecord>, AppError> {
        if query == self.trigger {
            panic!("fetcher defect for {query}");
        }
        Ok(sample_batch(query, 5))
    }
}

// ---------------------------------------------------------------------------
// MockCleaner
// ---------------------------------------------------------------------------

/// Mock cleaner that fails, either with an error or a panic.
pub struct MockCleaner {
    error: Mutex<Option<AppError>>,
}

impl MockCleaner {
    pub fn with_error(error: AppError) -> Self {
        Self {
            error: Mutex::new(Some(error)),
        }
    }

    /// A cleaner that panics on every call.
    pub fn panicking() -> Self {
        Self {
            error: Mutex::new(None),
        }
    }
}

impl RecordCleaner for MockCleaner {
    fn clean(&self, _records: Vec<BusinessRecord>) -> Result<Table, AppError> {
        let mut err = self.error.lock().unwrap();
        match err.take() {
            Some(e) => Err(e),
            None => panic!("cleaner defect"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockSink
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum SinkMode {
    Record,
    Fail,
    Panic,
}

/// Mock sink that records the row count of every persisted table.
#[derive(Clone)]
pub struct MockSink {
    persisted: Arc<Mutex<Vec<usize>>>,
    error: Arc<Mutex<Option<AppError>>>,
    mode: SinkMode,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            persisted: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            mode: SinkMode::Record,
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
            mode: SinkMode::Fail,
            ..Self::new()
        }
    }

    pub fn panicking() -> Self {
        Self {
            mode: SinkMode::Panic,
            ..Self::new()
        }
    }

    pub fn persisted_rows(&self) -> Vec<usize> {
        self.persisted.lock().unwrap().clone()
    }
}

impl TableSink for MockSink {
    fn persist(&self, table: &Table) -> Result<String, AppError> {
        match self.mode {
            SinkMode::Record => {
                self.persisted.lock().unwrap().push(table.len());
                Ok("mock://table".to_string())
            }
            SinkMode::Fail => match self.error.lock().unwrap().take() {
                Some(e) => Err(e),
                None => Err(AppError::SinkError("mock sink failure".into())),
            },
            SinkMode::Panic => panic!("sink defect"),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingReporter
// ---------------------------------------------------------------------------

/// Reporter that records a short tag for every event it receives, plus the
/// detail text of failure events.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<&'static str>>,
    details: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    /// Detail text of every `TaskFailed` and `RunFailed` event, in order.
    pub fn details(&self) -> Vec<String> {
        self.details.lock().unwrap().clone()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.lock().unwrap().iter().filter(|t| **t == tag).count()
    }
}

impl PipelineReporter for RecordingReporter {
    fn report(&self, event: PipelineEvent<'_>) {
        if let PipelineEvent::TaskFailed { detail, .. } | PipelineEvent::RunFailed { detail, .. } =
            &event
        {
            self.details.lock().unwrap().push(detail.to_string());
        }
        let tag = match event {
            PipelineEvent::RunStarted { .. } => "run_started",
            PipelineEvent::QueryStarted { .. } => "query_started",
            PipelineEvent::QueryCompleted { .. } => "query_completed",
            PipelineEvent::RetryScheduled { .. } => "retry",
            PipelineEvent::QueryExhausted { .. } => "exhausted",
            PipelineEvent::TaskFailed { .. } => "task_failed",
            PipelineEvent::NoRecords => "no_records",
            PipelineEvent::Cleaned { .. } => "cleaned",
            PipelineEvent::CleanerFailed { .. } => "cleaner_failed",
            PipelineEvent::NothingToSave => "nothing_to_save",
            PipelineEvent::Saved { .. } => "saved",
            PipelineEvent::RunFailed { .. } => "run_failed",
            PipelineEvent::RunFinished { .. } => "run_finished",
        };
        self.events.lock().unwrap().push(tag);
    }
}
