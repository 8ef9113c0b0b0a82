use std::time::Duration;

use prospect_core::error::AppError;
use prospect_core::models::BusinessRecord;
use prospect_core::traits::Fetcher;
use rand::seq::SliceRandom;

/// Industries the synthetic fetcher assigns at random.
pub const INDUSTRIES: [&str; 5] = ["Technology", "Marketing", "Finance", "Healthcare", "Retail"];

/// Records produced per successful fetch.
pub const BATCH_SIZE: usize = 5;

/// Fabricates business listings instead of hitting the network.
///
/// Sleeps for `latency` to stand in for a request, then derives
/// [`BATCH_SIZE`] records from the query's first and last words.
/// Never fails.
#[derive(Debug, Clone)]
pub struct SyntheticFetcher {
    latency: Duration,
}

impl SyntheticFetcher {
    pub fn new() -> Self {
        Self::with_latency(Duration::from_secs(2))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Build the batch for `query` without sleeping.
    pub fn synthesize(query: &str) -> Vec<BusinessRecord> {
        let mut words = query.split_whitespace();
        let first = words.next().unwrap_or("Unknown");
        let last = words.next_back().unwrap_or(first);

        let mut rng = rand::thread_rng();
        (0..BATCH_SIZE)
            .map(|i| {
                let industry = INDUSTRIES.choose(&mut rng).copied().unwrap_or("Technology");
                BusinessRecord::new(
                    format!("{last} Business {}", i + 1),
                    format!("City {i}, State {first}"),
                    format!("555-{i:04}"),
                    industry,
                    format!("contact{i}@{}.com", last.to_lowercase()),
                )
            })
            .collect()
    }
}

impl Default for SyntheticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for SyntheticFetcher {
    async fn fetch(&self, query: &str) -> Result<Vec<BusinessRecord>, AppError> {
        tracing::debug!(%query, latency_ms = %self.latency.as_millis(), "Simulating request");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Self::synthesize(query))
    }
}
