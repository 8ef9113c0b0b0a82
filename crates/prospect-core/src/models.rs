use crate::error::AppError;

/// Column names of a cleaned [`Table`], in output order.
pub const COLUMNS: [&str; 6] = [
    "name",
    "location",
    "phone",
    "industry",
    "email",
    "name_length",
];

/// A single business listing as produced by a fetcher.
///
/// Every field may be missing; the cleaner fills gaps with fixed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BusinessRecord {
    pub name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
}

impl BusinessRecord {
    /// Build a record with every field present.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        phone: impl Into<String>,
        industry: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            location: Some(location.into()),
            phone: Some(phone.into()),
            industry: Some(industry.into()),
            email: Some(email.into()),
        }
    }
}

/// A cleaned row: all fields present plus the derived `name_length`.
///
/// Field order matches [`COLUMNS`], so serializing with serde yields the
/// expected header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TableRow {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub industry: String,
    pub email: String,
    pub name_length: usize,
}

/// Per-column summary, as printed in the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub non_null: usize,
    pub kind: &'static str,
}

/// In-memory result of aggregation and cleaning, prior to serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// An explicitly empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TableRow> {
        self.rows
    }

    /// The leading `n` rows (fewer if the table is shorter).
    pub fn preview(&self, n: usize) -> &[TableRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Non-null counts and value kinds for each column.
    ///
    /// Cleaned rows never hold missing values, so every column reports the
    /// full row count.
    pub fn summary(&self) -> Vec<ColumnSummary> {
        COLUMNS
            .iter()
            .map(|&name| ColumnSummary {
                name,
                non_null: self.rows.len(),
                kind: if name == "name_length" { "integer" } else { "text" },
            })
            .collect()
    }
}

/// Result of running one query through the retry wrapper.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The fetcher returned at least one record.
    Found(Vec<BusinessRecord>),
    /// The fetcher succeeded but returned nothing.
    Empty,
    /// Every allowed attempt failed.
    Exhausted {
        attempts: u32,
        last_error: Option<AppError>,
    },
}

impl FetchOutcome {
    pub fn from_batch(batch: Vec<BusinessRecord>) -> Self {
        if batch.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Found(batch)
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, FetchOutcome::Exhausted { .. })
    }

    /// Number of records carried; exhausted and empty outcomes carry none.
    pub fn len(&self) -> usize {
        match self {
            FetchOutcome::Found(batch) => batch.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collapse to a plain batch. Exhausted retries look the same as an
    /// empty result here.
    pub fn into_records(self) -> Vec<BusinessRecord> {
        match self {
            FetchOutcome::Found(batch) => batch,
            FetchOutcome::Empty | FetchOutcome::Exhausted { .. } => Vec::new(),
        }
    }
}

/// A pool task's outcome paired with the query that produced it.
#[derive(Debug)]
pub struct QueryOutcome {
    pub query: String,
    pub outcome: FetchOutcome,
}
