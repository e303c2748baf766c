// Terminal progress indicator for downloads

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::downloader::{ProgressEvent, ProgressSink};

/// Progress bar on stderr; falls back to a byte counter while the total is unknown
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {bytes} downloaded ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar }
    }

    fn switch_to_bar(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_style(
            ProgressStyle::with_template(
                "[{bar:40.red/white}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn on_progress(&self, event: ProgressEvent) {
        if let Some(total) = event.total_bytes {
            if self.bar.length() != Some(total) {
                self.switch_to_bar(total);
            }
        }
        self.bar.set_position(event.downloaded_bytes);
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
