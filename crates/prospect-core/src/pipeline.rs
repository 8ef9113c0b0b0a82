use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use uuid::Uuid;

use crate::config::ScraperConfig;
use crate::error::AppError;
use crate::models::{BusinessRecord, Table};
use crate::pool::{WorkerPool, flatten};
use crate::report::{PipelineEvent, PipelineReporter};
use crate::trace::{
    error_detail, install_panic_trace_hook, panic_detail, panic_message, take_panic_trace,
};
use crate::traits::{Fetcher, RecordCleaner, TableSink};

/// Orchestrates the full run: worker pool → flatten → clean → persist.
///
/// Generic over every collaborator via traits, so tests can swap in scripted
/// fetchers, failing cleaners, and recording sinks. Failures at any stage
/// end in an empty [`Table`] rather than an error.
pub struct PipelineService<F, C, S, R>
where
    F: Fetcher + 'static,
    C: RecordCleaner,
    S: TableSink,
    R: PipelineReporter + 'static,
{
    pool: WorkerPool<F, R>,
    cleaner: C,
    sink: S,
    reporter: Arc<R>,
}

impl<F, C, S, R> PipelineService<F, C, S, R>
where
    F: Fetcher + 'static,
    C: RecordCleaner,
    S: TableSink,
    R: PipelineReporter + 'static,
{
    pub fn new(fetcher: F, cleaner: C, sink: S, reporter: Arc<R>, config: &ScraperConfig) -> Self {
        install_panic_trace_hook();
        let pool = WorkerPool::new(
            fetcher,
            Arc::clone(&reporter),
            config.max_workers,
            config.max_retries,
        );
        Self {
            pool,
            cleaner,
            sink,
            reporter,
        }
    }

    /// Run the pipeline for `queries`.
    ///
    /// Always returns a table. An error or panic anywhere in the run is
    /// reported with its full detail and turned into an empty table.
    pub async fn run(&self, queries: &[String]) -> Table {
        let run_id = Uuid::new_v4();
        self.reporter.report(PipelineEvent::RunStarted {
            run_id,
            queries: queries.len(),
            max_workers: self.pool.max_workers(),
        });

        let result = AssertUnwindSafe(self.try_run(queries))
            .catch_unwind()
            .await;

        let (error, detail) = match result {
            Ok(Ok(table)) => {
                self.reporter.report(PipelineEvent::RunFinished {
                    run_id,
                    rows: table.len(),
                });
                return table;
            }
            Ok(Err(e)) => (e.to_string(), error_detail(&e)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                let detail = panic_detail(&message);
                (format!("panic: {message}"), detail)
            }
        };

        self.reporter.report(PipelineEvent::RunFailed {
            run_id,
            error: &error,
            detail: &detail,
        });
        Table::empty()
    }

    async fn try_run(&self, queries: &[String]) -> Result<Table, AppError> {
        let outcomes = self.pool.run_all(queries).await;
        let records = flatten(outcomes);

        let table = self.clean(records);

        if table.is_empty() {
            self.reporter.report(PipelineEvent::NothingToSave);
            return Ok(table);
        }

        let location = self.sink.persist(&table)?;
        self.reporter.report(PipelineEvent::Saved {
            location: &location,
            rows: table.len(),
        });

        Ok(table)
    }

    /// Clean the merged records, degrading any failure to an empty table.
    fn clean(&self, records: Vec<BusinessRecord>) -> Table {
        if records.is_empty() {
            self.reporter.report(PipelineEvent::NoRecords);
        }

        let result = catch_unwind(AssertUnwindSafe(|| self.cleaner.clean(records)));
        let error = match result {
            Ok(Ok(table)) => {
                self.reporter
                    .report(PipelineEvent::Cleaned { rows: table.len() });
                return table;
            }
            Ok(Err(e)) => e.to_string(),
            Err(payload) => {
                // Drop the recorded trace so it cannot be mistaken for a
                // later panic's.
                let _ = take_panic_trace();
                format!("panic: {}", panic_message(payload.as_ref()))
            }
        };

        self.reporter
            .report(PipelineEvent::CleanerFailed { error: &error });
        Table::empty()
    }
}
