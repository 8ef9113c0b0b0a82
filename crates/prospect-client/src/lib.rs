pub mod fetcher;
pub mod headers;
pub mod sink;

pub use fetcher::SyntheticFetcher;
pub use headers::rotate_headers;
pub use sink::CsvSink;
