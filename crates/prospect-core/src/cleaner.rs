use std::collections::HashSet;

use crate::error::AppError;
use crate::models::{BusinessRecord, Table, TableRow};
use crate::traits::RecordCleaner;

pub const DEFAULT_NAME: &str = "Unknown Business";
pub const DEFAULT_LOCATION: &str = "Unknown Location";
pub const DEFAULT_PHONE: &str = "Unknown Phone";
pub const DEFAULT_INDUSTRY: &str = "Unclassified";
pub const DEFAULT_EMAIL: &str = "no-email@example.com";

/// Fills missing fields, drops exact duplicates, and derives `name_length`.
///
/// Duplicates are judged on the five filled fields; the first occurrence is
/// kept and surviving rows stay in input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFillCleaner;

impl DefaultFillCleaner {
    pub fn new() -> Self {
        Self
    }

    fn fill(record: BusinessRecord) -> TableRow {
        let name = record.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let name_length = name.chars().count();
        TableRow {
            name,
            location: record
                .location
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            phone: record.phone.unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            industry: record
                .industry
                .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string()),
            email: record.email.unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            name_length,
        }
    }
}

impl RecordCleaner for DefaultFillCleaner {
    fn clean(&self, records: Vec<BusinessRecord>) -> Result<Table, AppError> {
        if records.is_empty() {
            return Ok(Table::empty());
        }

        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let rows: Vec<TableRow> = records
            .into_iter()
            .map(Self::fill)
            // name_length is derived from name, so whole-row equality is
            // equality over the five source fields.
            .filter(|row| seen.insert(row.clone()))
            .collect();

        tracing::debug!(input = total, kept = rows.len(), "Cleaned records");
        Ok(Table::new(rows))
    }
}
