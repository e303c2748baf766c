// Common data models for the downloader

use std::fmt;

/// Selection value that asks the extractor to pick the best quality itself.
pub const BEST_SENTINEL: &str = "best";

/// One downloadable variant of a video, as reported by the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Format ID (e.g., "18", "137")
    pub id: String,
    /// Container / file extension (mp4, webm, m4a)
    pub container: String,
    /// Resolution string (e.g., "360p", "1920x1080", "audio only")
    pub resolution: Option<String>,
    /// Exact file size in bytes, when the extractor knows it
    pub size_bytes: Option<u64>,
}

impl FormatDescriptor {
    pub fn new(id: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            container: container.into(),
            resolution: None,
            size_bytes: None,
        }
    }

    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.size_bytes = Some(bytes);
        self
    }
}

/// Which format the extractor should download
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatSelection {
    /// Let the extractor apply its own best-quality policy
    #[default]
    Best,
    /// Exactly this format id
    Id(String),
}

impl FormatSelection {
    /// Map a user choice to a selection. Absent, blank and `"best"` all
    /// mean the extractor's default.
    pub fn from_choice(choice: Option<&str>) -> Self {
        match choice.map(str::trim) {
            None | Some("") | Some(BEST_SENTINEL) => Self::Best,
            Some(id) => Self::Id(id.to_string()),
        }
    }

    /// Explicit format id, `None` for `Best`
    pub fn format_id(&self) -> Option<&str> {
        match self {
            Self::Best => None,
            Self::Id(id) => Some(id),
        }
    }
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best => write!(f, "{}", BEST_SENTINEL),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A single download; lives for the duration of one invoker call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub selection: FormatSelection,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, format_id: Option<&str>) -> Self {
        Self {
            url: url.into(),
            selection: FormatSelection::from_choice(format_id),
        }
    }
}

/// Byte-level download progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
}

impl ProgressEvent {
    /// Completed fraction in `[0, 1]`, when the total is known
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some((self.downloaded_bytes as f64 / total as f64).min(1.0))
            }
            _ => None,
        }
    }
}
