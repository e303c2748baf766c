// Interactive session state and the handlers that act on it
//
// A `Session` lives for one interactive run and is never persisted. Handlers
// never return errors: every failure becomes an error `Banner` so the session
// stays usable afterwards.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::downloader::{
    DownloadError, DownloadInvoker, DownloadRequest, Extractor, FormatCatalogFetcher,
    FormatDescriptor, ProgressSink, BEST_SENTINEL,
};
use crate::presentation::table::{build_rows, selection_options, FormatRow};

/// One-line message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Info(String),
    Error(String),
}

impl Banner {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    fn from_error(err: &DownloadError) -> Self {
        let mut message = format!("Error: {}", err);
        if let Some(hint) = err.reason().and_then(|r| r.hint()) {
            message.push_str(&format!(" ({})", hint));
        }
        Self::Error(message)
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(msg) => write!(f, "✅ {}", msg),
            Self::Info(msg) => write!(f, "ℹ️  {}", msg),
            Self::Error(msg) => write!(f, "❌ {}", msg),
        }
    }
}

/// State of one interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Contents of the URL field
    pub url: String,
    /// Most recent successful catalog; cleared when a fetch fails
    formats: Option<Vec<FormatDescriptor>>,
    /// Current selection, `best` or an id from `formats`
    selected: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            url: String::new(),
            formats: None,
            selected: BEST_SENTINEL.to_string(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formats(&self) -> Option<&[FormatDescriptor]> {
        self.formats.as_deref()
    }

    pub fn rows(&self) -> Option<Vec<FormatRow>> {
        self.formats.as_deref().map(build_rows)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }
}

/// Handlers binding the session to the fetcher and the invoker
pub struct App {
    fetcher: FormatCatalogFetcher,
    invoker: DownloadInvoker,
}

impl App {
    pub fn new(extractor: Arc<dyn Extractor>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher: FormatCatalogFetcher::new(extractor.clone()),
            invoker: DownloadInvoker::new(extractor, output_dir),
        }
    }

    /// "List formats": replaces the cached catalog, or clears it on failure.
    pub async fn list_formats(&self, session: &mut Session, url: &str) -> Banner {
        session.url = url.trim().to_string();

        match self.fetcher.fetch(url).await {
            Ok(formats) => {
                let count = formats.len();
                session.formats = Some(formats);
                session.selected = BEST_SENTINEL.to_string();
                if count == 0 {
                    Banner::Info("No formats reported for this URL".to_string())
                } else {
                    Banner::Success(format!("Found {} formats", count))
                }
            }
            // Rejected input is not a fetch, so the previous catalog survives
            Err(err @ DownloadError::InvalidInput(_)) => Banner::from_error(&err),
            Err(err) => {
                info!("[Session] clearing cached formats after failed fetch");
                session.formats = None;
                session.selected = BEST_SENTINEL.to_string();
                Banner::from_error(&err)
            }
        }
    }

    /// Pick `best` or one of the ids in the cached catalog.
    pub fn select(&self, session: &mut Session, choice: &str) -> Banner {
        let choice = choice.trim();
        if choice == BEST_SENTINEL {
            session.selected = BEST_SENTINEL.to_string();
            return Banner::Info(format!("Selected: {}", choice));
        }

        let Some(rows) = session.rows() else {
            return Banner::Error("List the formats first".to_string());
        };

        match selection_options(&rows).into_iter().find(|(id, _)| id == choice) {
            Some((id, label)) => {
                session.selected = id;
                Banner::Info(format!("Selected: {}", label))
            }
            None => Banner::Error(format!("Unknown format id: {}", choice)),
        }
    }

    /// "Download": uses the session URL and selection.
    pub async fn download(&self, session: &Session, progress: &dyn ProgressSink) -> Banner {
        self.download_with(&session.url, Some(session.selected()), progress)
            .await
    }

    /// Download `url` with an explicit choice; `None` or `best` defers to the extractor.
    pub async fn download_with(
        &self,
        url: &str,
        format_id: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> Banner {
        let request = DownloadRequest::new(url, format_id);
        debug!("[Session] download request: {:?}", request);

        match self.invoker.download(&request, progress).await {
            Ok(()) => Banner::Success(format!(
                "Download completed! Check {}",
                self.invoker.output_dir().display()
            )),
            Err(err) => Banner::from_error(&err),
        }
    }
}
