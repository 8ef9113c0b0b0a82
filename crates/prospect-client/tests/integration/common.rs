use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use prospect_client::{CsvSink, SyntheticFetcher};
use prospect_core::{DefaultFillCleaner, PipelineService, ScraperConfig, TracingReporter};
use tempfile::TempDir;

pub type TestPipeline =
    PipelineService<SyntheticFetcher, DefaultFillCleaner, CsvSink, TracingReporter>;

/// Build a zero-latency pipeline writing into a fresh temp directory.
///
/// Returns the output path and the directory guard; the directory is removed
/// when the guard is dropped.
pub fn setup_pipeline(max_workers: usize) -> (TestPipeline, PathBuf, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("business_info.csv");

    let config = ScraperConfig::default()
        .with_max_workers(max_workers)
        .with_max_retries(3)
        .with_fetch_latency(Duration::ZERO)
        .with_output_path(&output);

    let pipeline = PipelineService::new(
        SyntheticFetcher::with_latency(config.fetch_latency),
        DefaultFillCleaner::new(),
        CsvSink::new(&config.output_path),
        Arc::new(TracingReporter),
        &config,
    );

    (pipeline, output, dir)
}

pub fn queries(q: &[&str]) -> Vec<String> {
    q.iter().map(|s| s.to_string()).collect()
}

pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Output file should exist");
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
