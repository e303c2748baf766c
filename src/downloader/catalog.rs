// Format catalog fetcher

use std::sync::Arc;
use tracing::{info, warn};

use super::errors::DownloadError;
use super::extractors::Extractor;
use super::models::FormatDescriptor;
use super::validation::validate_url;

/// Lists the formats of a URL through the extractor
pub struct FormatCatalogFetcher {
    extractor: Arc<dyn Extractor>,
}

impl FormatCatalogFetcher {
    pub fn new(extractor: Arc<dyn Extractor>) -> Self {
        Self { extractor }
    }

    /// Fetch descriptors in extractor order. Invalid URLs are rejected
    /// before the extractor is contacted; failures are not retried.
    pub async fn fetch(&self, url: &str) -> Result<Vec<FormatDescriptor>, DownloadError> {
        let url = validate_url(url)?;

        info!("[Catalog] Listing formats via {}: {}", self.extractor.name(), url);
        match self.extractor.extract_metadata(&url).await {
            Ok(formats) => {
                info!("[Catalog] ✓ {} formats", formats.len());
                Ok(formats)
            }
            Err(e) => {
                warn!("[Catalog] ✗ {}", e);
                Err(DownloadError::extraction(e))
            }
        }
    }
}
