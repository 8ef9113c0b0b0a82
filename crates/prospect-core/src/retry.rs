use crate::models::FetchOutcome;
use crate::report::{PipelineEvent, PipelineReporter};
use crate::traits::Fetcher;

/// Run `fetcher` for `query`, retrying failures up to `max_retries` times.
///
/// Makes at most `max_retries + 1` attempts, back to back, whatever the
/// error. This never returns an error: running out of attempts yields
/// [`FetchOutcome::Exhausted`], which callers may collapse into an empty
/// batch.
pub async fn fetch_with_retry<F, R>(
    fetcher: &F,
    query: &str,
    max_retries: u32,
    reporter: &R,
) -> FetchOutcome
where
    F: Fetcher,
    R: PipelineReporter + ?Sized,
{
    reporter.report(PipelineEvent::QueryStarted { query });

    let max_attempts = max_retries.saturating_add(1);
    let mut attempt = 1;
    loop {
        match fetcher.fetch(query).await {
            Ok(batch) => {
                reporter.report(PipelineEvent::QueryCompleted {
                    query,
                    records: batch.len(),
                    attempts: attempt,
                });
                return FetchOutcome::from_batch(batch);
            }
            Err(e) => {
                let error = if e.is_retryable() {
                    e.to_string()
                } else {
                    format!("{e} (not marked retryable)")
                };
                if attempt >= max_attempts {
                    reporter.report(PipelineEvent::QueryExhausted {
                        query,
                        attempts: attempt,
                        error: &error,
                    });
                    return FetchOutcome::Exhausted {
                        attempts: attempt,
                        last_error: Some(e),
                    };
                }
                attempt += 1;
                reporter.report(PipelineEvent::RetryScheduled {
                    query,
                    attempt,
                    error: &error,
                });
            }
        }
    }
}
