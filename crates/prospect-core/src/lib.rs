pub mod cleaner;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod pool;
pub mod report;
pub mod retry;
pub mod trace;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use cleaner::DefaultFillCleaner;
pub use config::ScraperConfig;
pub use error::AppError;
pub use models::{BusinessRecord, FetchOutcome, QueryOutcome, Table, TableRow};
pub use pipeline::PipelineService;
pub use pool::WorkerPool;
pub use report::{PipelineEvent, PipelineReporter, TracingReporter};
pub use retry::fetch_with_retry;
pub use traits::{Fetcher, NullSink, RecordCleaner, TableSink};
