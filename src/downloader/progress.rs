// Progress sink interface and yt-dlp progress line parsing

use regex::Regex;

use super::models::ProgressEvent;

/// yt-dlp `--progress-template` producing `progress:<downloaded>/<total>`
pub const PROGRESS_TEMPLATE: &str =
    "download:progress:%(progress.downloaded_bytes)s/%(progress.total_bytes)s";

/// Receives download progress exactly as the extractor emits it
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);

    /// Called once the extractor exits successfully
    fn on_finish(&self) {}
}

/// Discards every event
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}

/// Parse a templated yt-dlp line like `progress:1048576/10485760`.
/// The total is `NA` when yt-dlp does not know it.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    lazy_static::lazy_static! {
        static ref PROGRESS_RE: Regex =
            Regex::new(r"^progress:(\d+|NA)/(\d+|NA)$").unwrap();
    }

    let caps = PROGRESS_RE.captures(line.trim())?;
    let downloaded_bytes = caps.get(1)?.as_str().parse().ok()?;
    let total_bytes = caps.get(2).and_then(|m| m.as_str().parse().ok());

    Some(ProgressEvent {
        downloaded_bytes,
        total_bytes,
    })
}
