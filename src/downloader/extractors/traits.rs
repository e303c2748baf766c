// Extractor trait and its configuration

use async_trait::async_trait;
use std::path::Path;

use crate::downloader::errors::ExtractorError;
use crate::downloader::models::{FormatDescriptor, FormatSelection};
use crate::downloader::progress::ProgressSink;

/// Configuration passed through to the extraction tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Explicit path to the yt-dlp binary
    pub ytdlp_path: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
    /// Browser to read cookies from (e.g. "chrome")
    pub cookies_from_browser: Option<String>,
    /// Socket timeout applied by yt-dlp itself, in seconds
    pub socket_timeout: Option<u32>,
}

impl ExtractorConfig {
    pub fn with_ytdlp_path(mut self, path: Option<String>) -> Self {
        self.ytdlp_path = path;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<String>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_cookies_from_browser(mut self, browser: Option<String>) -> Self {
        self.cookies_from_browser = browser;
        self
    }

    pub fn with_socket_timeout(mut self, seconds: Option<u32>) -> Self {
        self.socket_timeout = seconds;
        self
    }
}

/// The external video-extraction collaborator
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor can be used at all
    fn is_available(&self) -> bool;

    /// Read the available formats without downloading anything.
    /// Order is whatever the extractor reports.
    async fn extract_metadata(&self, url: &str) -> Result<Vec<FormatDescriptor>, ExtractorError>;

    /// Download `url` into `output_dir`, forwarding every progress event.
    async fn download(
        &self,
        url: &str,
        selection: &FormatSelection,
        output_dir: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<(), ExtractorError>;
}
