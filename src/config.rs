// Application configuration: JSON file, then environment/CLI overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::downloader::ExtractorConfig;

const APP_DIR: &str = "video-format-downloader";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where yt-dlp writes downloaded files
    pub output_dir: PathBuf,
    pub ytdlp_path: Option<String>,
    pub proxy: Option<String>,
    pub cookies_path: Option<String>,
    /// Browser name passed to `--cookies-from-browser`
    pub cookies_from_browser: Option<String>,
    /// yt-dlp `--socket-timeout` in seconds
    pub socket_timeout: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            ytdlp_path: None,
            proxy: None,
            cookies_path: None,
            cookies_from_browser: None,
            socket_timeout: None,
        }
    }
}

/// Values that override the file, as collected from flags and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub ytdlp_path: Option<String>,
    pub proxy: Option<String>,
    pub cookies_path: Option<String>,
    pub cookies_from_browser: Option<String>,
    pub socket_timeout: Option<u32>,
}

impl AppConfig {
    /// `<config_dir>/video-format-downloader/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            debug!("[Config] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&content)
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.output_dir = expand_tilde(&config.output_dir);

        debug!("[Config] loaded {}", path.display());
        Ok(config)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.output_dir {
            self.output_dir = expand_tilde(&dir);
        }
        if overrides.ytdlp_path.is_some() {
            self.ytdlp_path = overrides.ytdlp_path;
        }
        if overrides.proxy.is_some() {
            self.proxy = overrides.proxy;
        }
        if overrides.cookies_path.is_some() {
            self.cookies_path = overrides.cookies_path;
        }
        if overrides.cookies_from_browser.is_some() {
            self.cookies_from_browser = overrides.cookies_from_browser;
        }
        if overrides.socket_timeout.is_some() {
            self.socket_timeout = overrides.socket_timeout;
        }
        self
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
            .with_ytdlp_path(self.ytdlp_path.clone())
            .with_proxy(self.proxy.clone())
            .with_cookies_path(self.cookies_path.clone())
            .with_cookies_from_browser(self.cookies_from_browser.clone())
            .with_socket_timeout(self.socket_timeout)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
