use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use prospect_core::error::AppError;
use prospect_core::models::Table;
use prospect_core::traits::TableSink;

/// Writes a table as CSV, replacing any existing file at `path`.
///
/// The header comes from [`TableRow`](prospect_core::TableRow)'s field
/// names: `name,location,phone,industry,email,name_length`.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `table` as CSV into any writer.
    pub fn write_to<W: Write>(table: &Table, writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in table.rows() {
            csv_writer
                .serialize(row)
                .map_err(|e| AppError::SinkError(format!("Failed to write row: {e}")))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl TableSink for CsvSink {
    fn persist(&self, table: &Table) -> Result<String, AppError> {
        let file = File::create(&self.path).map_err(|e| {
            AppError::SinkError(format!(
                "Failed to create output file {}: {e}",
                self.path.display()
            ))
        })?;
        Self::write_to(table, file)?;
        Ok(self.path.display().to_string())
    }
}
