// URL validation shared by the fetcher and the invoker

use url::Url;

use super::errors::DownloadError;

/// Check that `input` is a usable http(s) URL and return it trimmed.
///
/// Runs before any call to the extractor, so a bad URL never reaches it.
pub fn validate_url(input: &str) -> Result<String, DownloadError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(DownloadError::InvalidInput(
            "Please enter a video URL".to_string(),
        ));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| DownloadError::InvalidInput(format!("Invalid URL format: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(DownloadError::InvalidInput(format!(
                "URL must start with http:// or https:// (got {}://)",
                other
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(DownloadError::InvalidInput(
            "URL has no host".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}
