use std::future::Future;

use crate::error::AppError;
use crate::models::{BusinessRecord, Table};

/// Produces a batch of business records for a search query.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, query: &str)
    -> impl Future<Output = Result<Vec<BusinessRecord>, AppError>> + Send;
}

/// Merges fetched records into a cleaned [`Table`].
pub trait RecordCleaner: Send + Sync {
    fn clean(&self, records: Vec<BusinessRecord>) -> Result<Table, AppError>;
}

/// Persists a cleaned table.
pub trait TableSink: Send + Sync {
    /// Write the table. Returns a human-readable description of the
    /// destination (for a file sink, its path).
    fn persist(&self, table: &Table) -> Result<String, AppError>;
}

/// A no-op sink for runs that only need the in-memory table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TableSink for NullSink {
    fn persist(&self, _table: &Table) -> Result<String, AppError> {
        Ok("<discarded>".to_string())
    }
}
