// Downloader module - format listing and downloads on top of an extractor

pub mod catalog;
pub mod errors;
pub mod extractors;
pub mod invoker;
pub mod models;
pub mod progress;
pub mod tools;
pub mod validation;

#[cfg(test)]
pub(crate) mod fake;

pub use catalog::FormatCatalogFetcher;
pub use errors::{DownloadError, ExtractorError};
pub use extractors::{CliExtractor, Extractor, ExtractorConfig, FailureReason};
pub use invoker::DownloadInvoker;
pub use models::{DownloadRequest, FormatDescriptor, FormatSelection, ProgressEvent, BEST_SENTINEL};
pub use progress::{NullProgress, ProgressSink};
