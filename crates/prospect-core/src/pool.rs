use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::AppError;
use crate::models::{BusinessRecord, FetchOutcome, QueryOutcome};
use crate::report::{PipelineEvent, PipelineReporter};
use crate::retry::fetch_with_retry;
use crate::trace::{error_detail, install_panic_trace_hook, panic_detail, panic_message};
use crate::traits::Fetcher;

/// Bounded pool that runs one retrying fetch per query.
///
/// At most `max_workers` queries are in flight at once. The `JoinSet` lives
/// only for the duration of [`run_all`](Self::run_all), so every spawned task
/// is joined or aborted before it returns.
pub struct WorkerPool<F, R>
where
    F: Fetcher + 'static,
    R: PipelineReporter + 'static,
{
    fetcher: F,
    reporter: Arc<R>,
    max_workers: usize,
    max_retries: u32,
}

impl<F, R> WorkerPool<F, R>
where
    F: Fetcher + 'static,
    R: PipelineReporter + 'static,
{
    pub fn new(fetcher: F, reporter: Arc<R>, max_workers: usize, max_retries: u32) -> Self {
        install_panic_trace_hook();
        Self {
            fetcher,
            reporter,
            max_workers: max_workers.max(1),
            max_retries,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run every query and wait for all of them.
    ///
    /// Outcomes arrive in completion order, each tagged with its query.
    /// A task that panics is logged and recorded as an exhausted outcome;
    /// the remaining tasks carry on.
    pub async fn run_all(&self, queries: &[String]) -> Vec<QueryOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::with_capacity(queries.len());

        for query in queries {
            let fetcher = self.fetcher.clone();
            let reporter = Arc::clone(&self.reporter);
            let semaphore = Arc::clone(&semaphore);
            let max_retries = self.max_retries;
            let task_query = query.clone();

            let handle = tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only waits.
                let _permit = semaphore.acquire_owned().await.ok();
                // Caught here so the panicking thread's backtrace is still
                // readable.
                AssertUnwindSafe(fetch_with_retry(
                    &fetcher,
                    &task_query,
                    max_retries,
                    reporter.as_ref(),
                ))
                .catch_unwind()
                .await
                .map_err(|payload| {
                    let message = panic_message(payload.as_ref());
                    let detail = panic_detail(&message);
                    (format!("task panicked: {message}"), detail)
                })
            });
            pending.insert(handle.id(), query.clone());
        }

        let mut outcomes = Vec::with_capacity(queries.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, failure) = match joined {
                Ok((id, Ok(outcome))) => {
                    let query = pending.remove(&id).unwrap_or_default();
                    outcomes.push(QueryOutcome { query, outcome });
                    continue;
                }
                Ok((id, Err(failure))) => (id, failure),
                Err(join_err) => {
                    let error = format!("task aborted: {join_err}");
                    let detail = error_detail(&join_err);
                    (join_err.id(), (error, detail))
                }
            };

            let (error, detail) = failure;
            let query = pending.remove(&id).unwrap_or_default();
            self.reporter.report(PipelineEvent::TaskFailed {
                query: &query,
                error: &error,
                detail: &detail,
            });
            let last_error = AppError::TaskFailed {
                query: query.clone(),
                message: error,
            };
            outcomes.push(QueryOutcome {
                query,
                outcome: FetchOutcome::Exhausted {
                    attempts: 0,
                    last_error: Some(last_error),
                },
            });
        }

        outcomes
    }
}

/// Merge every outcome's batch into one record list.
pub fn flatten(outcomes: Vec<QueryOutcome>) -> Vec<BusinessRecord> {
    outcomes
        .into_iter()
        .flat_map(|o| o.outcome.into_records())
        .collect()
}
