use uuid::Uuid;

/// Events emitted by the pool and pipeline for monitoring/logging.
#[derive(Debug, Clone)]
pub enum PipelineEvent<'a> {
    RunStarted {
        run_id: Uuid,
        queries: usize,
        max_workers: usize,
    },
    QueryStarted {
        query: &'a str,
    },
    QueryCompleted {
        query: &'a str,
        records: usize,
        attempts: u32,
    },
    RetryScheduled {
        query: &'a str,
        attempt: u32,
        error: &'a str,
    },
    QueryExhausted {
        query: &'a str,
        attempts: u32,
        error: &'a str,
    },
    TaskFailed {
        query: &'a str,
        error: &'a str,
        detail: &'a str,
    },
    NoRecords,
    Cleaned {
        rows: usize,
    },
    CleanerFailed {
        error: &'a str,
    },
    NothingToSave,
    Saved {
        location: &'a str,
        rows: usize,
    },
    RunFailed {
        run_id: Uuid,
        error: &'a str,
        detail: &'a str,
    },
    RunFinished {
        run_id: Uuid,
        rows: usize,
    },
}

/// Trait for receiving pipeline events (decoupled logging).
///
/// Passed explicitly to the pool and pipeline instead of relying on a
/// process-wide logger handle.
pub trait PipelineReporter: Send + Sync {
    fn report(&self, event: PipelineEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl PipelineReporter for TracingReporter {
    fn report(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::RunStarted {
                run_id,
                queries,
                max_workers,
            } => {
                tracing::info!(%run_id, %queries, %max_workers, "Scraping pipeline started");
            }
            PipelineEvent::QueryStarted { query } => {
                tracing::info!("Starting to scrape data for query: {}", query);
            }
            PipelineEvent::QueryCompleted {
                query,
                records,
                attempts,
            } => {
                tracing::info!(%attempts, "Scraped {} business entries for query: {}", records, query);
            }
            PipelineEvent::RetryScheduled {
                query,
                attempt,
                error,
            } => {
                tracing::error!(%error, "Error scraping data for query {}", query);
                tracing::info!("Retrying for query: {}... (attempt {})", query, attempt);
            }
            PipelineEvent::QueryExhausted {
                query,
                attempts,
                error,
            } => {
                tracing::error!(%attempts, %error, "Giving up on query: {}", query);
            }
            PipelineEvent::TaskFailed {
                query,
                error,
                detail,
            } => {
                tracing::error!(%error, "Error scraping query {}", query);
                tracing::error!("{}", detail);
            }
            PipelineEvent::NoRecords => {
                tracing::warn!("No data received for processing");
            }
            PipelineEvent::Cleaned { rows } => {
                tracing::info!("Processed table with {} rows", rows);
            }
            PipelineEvent::CleanerFailed { error } => {
                tracing::error!(%error, "Data processing error");
            }
            PipelineEvent::NothingToSave => {
                tracing::warn!("No data to save");
            }
            PipelineEvent::Saved { location, rows } => {
                tracing::info!(%rows, "Data saved to {}", location);
            }
            PipelineEvent::RunFailed {
                run_id,
                error,
                detail,
            } => {
                tracing::error!(%run_id, %error, "Scraping pipeline error");
                tracing::error!("{}", detail);
            }
            PipelineEvent::RunFinished { run_id, rows } => {
                tracing::info!(%run_id, %rows, "Scraping pipeline finished");
            }
        }
    }
}
