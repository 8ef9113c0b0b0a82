use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Default output file for the cleaned table.
pub const DEFAULT_OUTPUT_PATH: &str = "business_info.csv";

/// Default append-mode log file.
pub const DEFAULT_LOG_PATH: &str = "business_scraper.log";

/// Configuration for one scraper instance, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    /// Source identifiers. Carried for reporting; the synthetic fetcher
    /// ignores them.
    pub platforms: Vec<String>,

    /// Maximum number of queries in flight at once.
    pub max_workers: usize,

    /// Retries after the first failed attempt, per query.
    pub max_retries: u32,

    /// Requests per second. Accepted but not enforced.
    pub rate_limit: f64,

    /// Simulated latency of a single fetch.
    pub fetch_latency: Duration,

    pub output_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            platforms: vec!["mock".to_string()],
            max_workers: 5,
            max_retries: 3,
            rate_limit: 1.0,
            fetch_latency: Duration::from_secs(2),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl ScraperConfig {
    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: f64) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_fetch_latency(mut self, latency: Duration) -> Self {
        self.fetch_latency = latency;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Reject settings the pool cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_workers == 0 {
            return Err(AppError::ConfigError(
                "max_workers must be at least 1".into(),
            ));
        }
        if !self.rate_limit.is_finite() || self.rate_limit < 0.0 {
            return Err(AppError::ConfigError(format!(
                "Invalid rate_limit '{}': must be a non-negative number",
                self.rate_limit
            )));
        }
        Ok(())
    }
}
