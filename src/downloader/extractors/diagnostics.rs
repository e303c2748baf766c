// Failure diagnostics - classifies yt-dlp error output
//
// Used to tell transient failures (network, throttling) apart from permanent
// ones (private, removed, unsupported). Nothing is retried automatically;
// the classification only shapes the message shown to the user.

/// Why the collaborator failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Socket timeout, refused or unreachable connection
    NetworkTimeout,

    /// HTTP 429 or similar throttling
    RateLimited,

    /// HTTP 403 Forbidden
    Http403Forbidden,

    /// Geographic restriction
    GeoBlocked,

    /// Private video requiring authorization
    PrivateVideo,

    /// Video deleted or unavailable
    VideoUnavailable,

    /// No extractor handles this URL
    UnsupportedUrl,

    /// Requested format id does not exist
    FormatUnavailable,

    Unknown,
}

impl FailureReason {
    /// Failure might go away on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkTimeout | Self::RateLimited | Self::Http403Forbidden
        )
    }

    /// Short hint appended to error banners
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_transient() {
            return Some("This looks temporary, try again later.");
        }
        match self {
            Self::FormatUnavailable => Some("List the formats again and pick another id."),
            Self::UnsupportedUrl => Some("Check the URL."),
            _ => None,
        }
    }
}

/// Analyze error output and return the most specific reason
pub fn diagnose_error(error: &str) -> FailureReason {
    let lower = error.to_lowercase();

    if lower.contains("unsupported url") {
        return FailureReason::UnsupportedUrl;
    }

    if lower.contains("requested format is not available") {
        return FailureReason::FormatUnavailable;
    }

    if lower.contains("private video")
        || lower.contains("video is private")
        || lower.contains("sign in if you've been granted access")
    {
        return FailureReason::PrivateVideo;
    }

    if lower.contains("video unavailable")
        || lower.contains("video has been removed")
        || lower.contains("this video is no longer available")
        || lower.contains("video is unavailable")
    {
        return FailureReason::VideoUnavailable;
    }

    if lower.contains("not available in your country")
        || lower.contains("blocked in your country")
        || lower.contains("geo restricted")
        || lower.contains("geo-restricted")
    {
        return FailureReason::GeoBlocked;
    }

    if lower.contains("429") || lower.contains("rate limit") || lower.contains("too many requests") {
        return FailureReason::RateLimited;
    }

    if lower.contains("403") || lower.contains("forbidden") {
        return FailureReason::Http403Forbidden;
    }

    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection refused")
        || lower.contains("connection reset")
        || lower.contains("network is unreachable")
        || lower.contains("temporary failure in name resolution")
    {
        return FailureReason::NetworkTimeout;
    }

    FailureReason::Unknown
}
