// Error types for the catalog fetcher, the download invoker and the extractor seam

use thiserror::Error;

use super::extractors::{diagnose_error, FailureReason};

/// Failure reported by an extractor implementation.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// yt-dlp binary could not be located or executed
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Spawning or talking to the child process failed
    #[error("Execution error: {0}")]
    Io(#[from] std::io::Error),

    /// The extractor ran and reported an error (stderr tail)
    #[error("{0}")]
    Failed(String),

    /// The extractor output could not be understood
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ExtractorError {
    /// Classify the failure from its message.
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Failed(stderr) => diagnose_error(stderr),
            Self::Io(e) => diagnose_error(&e.to_string()),
            Self::ToolNotFound(_) | Self::Parse(_) => FailureReason::Unknown,
        }
    }
}

/// Errors surfaced to the session layer.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Empty or malformed URL; the extractor was not contacted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Listing formats failed
    #[error("Failed to list formats: {message}")]
    ExtractionFailed {
        message: String,
        reason: FailureReason,
    },

    /// Download failed; any partial file is left as the extractor wrote it
    #[error("Download failed: {message}")]
    DownloadFailed {
        message: String,
        reason: FailureReason,
    },
}

impl DownloadError {
    pub fn extraction(err: ExtractorError) -> Self {
        Self::ExtractionFailed {
            reason: err.reason(),
            message: err.to_string(),
        }
    }

    pub fn download(err: ExtractorError) -> Self {
        Self::DownloadFailed {
            reason: err.reason(),
            message: err.to_string(),
        }
    }

    /// Classified cause, if the error came from the extractor.
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::InvalidInput(_) => None,
            Self::ExtractionFailed { reason, .. } | Self::DownloadFailed { reason, .. } => {
                Some(*reason)
            }
        }
    }

    /// Whether trying again later has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        self.reason().map_or(false, |r| r.is_transient())
    }
}
