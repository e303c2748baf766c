// Download invoker

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::DownloadError;
use super::extractors::Extractor;
use super::models::DownloadRequest;
use super::progress::ProgressSink;
use super::validation::validate_url;

/// Runs a single download through the extractor
pub struct DownloadInvoker {
    extractor: Arc<dyn Extractor>,
    output_dir: PathBuf,
}

impl DownloadInvoker {
    pub fn new(extractor: Arc<dyn Extractor>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Download `request`, forwarding progress to `progress` unchanged.
    /// On failure the output directory is left exactly as the extractor left it.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        progress: &dyn ProgressSink,
    ) -> Result<(), DownloadError> {
        let url = validate_url(&request.url)?;

        info!(
            "[Invoker] Downloading {} (format: {}) into {}",
            url,
            request.selection,
            self.output_dir.display()
        );

        self.extractor
            .download(&url, &request.selection, &self.output_dir, progress)
            .await
            .map_err(|e| {
                warn!("[Invoker] ✗ {}", e);
                DownloadError::download(e)
            })
    }
}
