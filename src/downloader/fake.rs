// In-memory extractor for unit tests

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::errors::ExtractorError;
use super::extractors::Extractor;
use super::models::{FormatDescriptor, FormatSelection, ProgressEvent};
use super::progress::ProgressSink;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Metadata(String),
    Download {
        url: String,
        selection: FormatSelection,
        output_dir: PathBuf,
    },
}

/// Scripted extractor that records every call
pub struct FakeExtractor {
    formats: Mutex<Result<Vec<FormatDescriptor>, String>>,
    download_result: Mutex<Result<(), String>>,
    events: Vec<ProgressEvent>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExtractor {
    pub fn with_formats(formats: Vec<FormatDescriptor>) -> Self {
        Self {
            formats: Mutex::new(Ok(formats)),
            download_result: Mutex::new(Ok(())),
            events: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        let fake = Self::with_formats(Vec::new());
        fake.fail_metadata(message);
        fake.fail_download(message);
        fake
    }

    pub fn with_events(mut self, events: Vec<ProgressEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn fail_metadata(&self, message: &str) {
        *self.formats.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_download(&self, message: &str) {
        *self.download_result.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn extract_metadata(&self, url: &str) -> Result<Vec<FormatDescriptor>, ExtractorError> {
        self.calls.lock().unwrap().push(Call::Metadata(url.to_string()));
        self.formats
            .lock()
            .unwrap()
            .clone()
            .map_err(ExtractorError::Failed)
    }

    async fn download(
        &self,
        url: &str,
        selection: &FormatSelection,
        output_dir: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<(), ExtractorError> {
        self.calls.lock().unwrap().push(Call::Download {
            url: url.to_string(),
            selection: selection.clone(),
            output_dir: output_dir.to_path_buf(),
        });
        for event in &self.events {
            progress.on_progress(*event);
        }
        let result = self.download_result.lock().unwrap().clone();
        if result.is_ok() {
            progress.on_finish();
        }
        result.map_err(ExtractorError::Failed)
    }
}

/// Sink that keeps every event it receives
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<ProgressEvent>>,
    pub finished: Mutex<bool>,
}

impl ProgressSink for RecordingProgress {
    fn on_progress(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn on_finish(&self) {
        *self.finished.lock().unwrap() = true;
    }
}
