// CLI extractor - drives the native `yt-dlp` binary
//
// Metadata comes from `--dump-json`, downloads stream templated progress
// lines on stdout. Nothing here applies a timeout or retries; yt-dlp's own
// socket timeout is the only one in play.

use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::traits::{Extractor, ExtractorConfig};
use crate::downloader::errors::ExtractorError;
use crate::downloader::models::{FormatDescriptor, FormatSelection};
use crate::downloader::progress::{parse_progress_line, ProgressSink, PROGRESS_TEMPLATE};

/// Output template relative to the `-P` directory
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Extractor backed by the yt-dlp binary
pub struct CliExtractor {
    ytdlp_path: String,
    config: ExtractorConfig,
}

impl CliExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let ytdlp_path = config.ytdlp_path.clone().unwrap_or_else(find_ytdlp);
        Self { ytdlp_path, config }
    }

    pub fn ytdlp_path(&self) -> &str {
        &self.ytdlp_path
    }

    /// Proxy, cookies and timeout flags shared by both operations
    fn network_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(timeout) = self.config.socket_timeout {
            args.push("--socket-timeout".to_string());
            args.push(timeout.to_string());
        }

        if let Some(path) = &self.config.cookies_path {
            args.push("--cookies".to_string());
            args.push(path.clone());
        } else if let Some(browser) = &self.config.cookies_from_browser {
            args.push("--cookies-from-browser".to_string());
            args.push(browser.clone());
        }

        if let Some(proxy) = &self.config.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }

        args
    }

    fn build_metadata_args(&self, url: &str) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];
        args.extend(self.network_args());
        args.push(url.to_string());
        args
    }

    fn build_download_args(
        &self,
        url: &str,
        selection: &FormatSelection,
        output_dir: &Path,
    ) -> Vec<String> {
        let mut args = Vec::new();

        // Best leaves format selection entirely to yt-dlp
        if let Some(id) = selection.format_id() {
            args.push("-f".to_string());
            args.push(id.to_string());
        }

        args.extend([
            "--no-playlist".to_string(),
            "--newline".to_string(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
            "-P".to_string(),
            output_dir.to_string_lossy().to_string(),
            "-o".to_string(),
            OUTPUT_TEMPLATE.to_string(),
        ]);
        args.extend(self.network_args());
        args.push(url.to_string());
        args
    }

    fn spawn_error(&self, e: std::io::Error) -> ExtractorError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractorError::ToolNotFound(format!("{}: {}", self.ytdlp_path, e))
        } else {
            ExtractorError::Io(e)
        }
    }
}

impl Default for CliExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[async_trait]
impl Extractor for CliExtractor {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    fn is_available(&self) -> bool {
        match std::process::Command::new(&self.ytdlp_path)
            .arg("--version")
            .output()
        {
            Ok(out) => out.status.success(),
            Err(_) => false,
        }
    }

    async fn extract_metadata(&self, url: &str) -> Result<Vec<FormatDescriptor>, ExtractorError> {
        let args = self.build_metadata_args(url);
        debug!("[CliExtractor] {} {}", self.ytdlp_path, args.join(" "));

        let output = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("[CliExtractor] metadata extraction failed: {}", stderr.trim());
            return Err(ExtractorError::Failed(error_summary(&stderr, output.status)));
        }

        let formats = parse_formats_json(&output.stdout)?;
        info!("[CliExtractor] {} formats for {}", formats.len(), url);
        Ok(formats)
    }

    async fn download(
        &self,
        url: &str,
        selection: &FormatSelection,
        output_dir: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<(), ExtractorError> {
        let args = self.build_download_args(url, selection, output_dir);
        debug!("[CliExtractor] {} {}", self.ytdlp_path, args.join(" "));

        let mut child = Command::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ExtractorError::Failed("Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ExtractorError::Failed("Failed to capture stderr".to_string()))?;

        // Drain stderr alongside stdout so the child never blocks on a full pipe
        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut collected = Vec::new();
            while let Ok(Some(line)) = lines.next_line().await {
                collected.push(line);
            }
            collected.join("\n")
        });

        let mut lines = BufReader::new(stdout).lines();
        let read_result = loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_progress_line(&line) {
                    Some(event) => progress.on_progress(event),
                    None if !line.trim().is_empty() => debug!("[yt-dlp] {}", line),
                    None => {}
                },
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        // Reap the child before surfacing a read error
        if read_result.is_err() {
            let _ = child.start_kill();
        }
        let status = child.wait().await?;
        let stderr_output = stderr_task.await.unwrap_or_default();
        read_result?;

        if status.success() {
            progress.on_finish();
            info!("[CliExtractor] download finished: {}", url);
            return Ok(());
        }

        warn!("[CliExtractor] download failed: {}", stderr_output.trim());
        Err(ExtractorError::Failed(error_summary(&stderr_output, status)))
    }
}

/// Find yt-dlp binary
fn find_ytdlp() -> String {
    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    // Resolved through PATH at spawn time
    "yt-dlp".to_string()
}

/// Parse `--dump-json` output into descriptors, keeping yt-dlp's order
pub fn parse_formats_json(stdout: &[u8]) -> Result<Vec<FormatDescriptor>, ExtractorError> {
    let json: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| ExtractorError::Parse(format!("Invalid JSON: {}", e)))?;

    let formats_array = json["formats"]
        .as_array()
        .ok_or_else(|| ExtractorError::Parse("No formats array in JSON".to_string()))?;

    Ok(formats_array
        .iter()
        .map(|f| FormatDescriptor {
            id: f["format_id"].as_str().unwrap_or("").to_string(),
            container: f["ext"].as_str().unwrap_or("").to_string(),
            resolution: f["resolution"].as_str().map(|s| s.to_string()),
            size_bytes: f["filesize"].as_u64(),
        })
        .collect())
}

/// Short, user-facing reason from yt-dlp stderr
fn error_summary(stderr: &str, status: ExitStatus) -> String {
    let errors: Vec<&str> = stderr
        .lines()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("ERROR:"))
        .collect();

    if !errors.is_empty() {
        return errors.join("\n");
    }

    stderr
        .lines()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(|l| l.to_string())
        .unwrap_or_else(|| format!("yt-dlp exited with {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::fake::RecordingProgress;
    use crate::downloader::models::ProgressEvent;
    use std::path::PathBuf;

    fn extractor() -> CliExtractor {
        CliExtractor::new(ExtractorConfig::default().with_ytdlp_path(Some("yt-dlp".to_string())))
    }

    #[test]
    fn test_best_has_no_format_selector() {
        let args = extractor().build_download_args(
            "https://example.com/v1",
            &FormatSelection::Best,
            &PathBuf::from("/tmp/out"),
        );
        assert!(!args.iter().any(|a| a == "-f"));
        assert!(!args.iter().any(|a| a == "best"));
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/v1"));
    }

    #[test]
    fn test_explicit_id_is_passed_verbatim() {
        let args = extractor().build_download_args(
            "https://example.com/v1",
            &FormatSelection::Id("18".to_string()),
            &PathBuf::from("/tmp/out"),
        );
        let pos = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[pos + 1], "18");
    }

    #[test]
    fn test_download_args_set_output_location() {
        let args = extractor().build_download_args(
            "https://example.com/v1",
            &FormatSelection::Best,
            &PathBuf::from("/tmp/out"),
        );
        let p = args.iter().position(|a| a == "-P").unwrap();
        assert_eq!(args[p + 1], "/tmp/out");
        let o = args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(args[o + 1], OUTPUT_TEMPLATE);
        assert!(args.iter().any(|a| a == PROGRESS_TEMPLATE));
    }

    #[test]
    fn test_network_args_from_config() {
        let config = ExtractorConfig::default()
            .with_ytdlp_path(Some("yt-dlp".to_string()))
            .with_proxy(Some("socks5://127.0.0.1:1080".to_string()))
            .with_cookies_from_browser(Some("firefox".to_string()))
            .with_socket_timeout(Some(15));
        let args = CliExtractor::new(config).build_metadata_args("https://example.com/v1");

        assert_eq!(args[0], "--dump-json");
        assert!(args.windows(2).any(|w| w[0] == "--proxy" && w[1] == "socks5://127.0.0.1:1080"));
        assert!(args.windows(2).any(|w| w[0] == "--cookies-from-browser" && w[1] == "firefox"));
        assert!(args.windows(2).any(|w| w[0] == "--socket-timeout" && w[1] == "15"));
    }

    #[test]
    fn test_cookies_file_wins_over_browser() {
        let config = ExtractorConfig::default()
            .with_ytdlp_path(Some("yt-dlp".to_string()))
            .with_cookies_path(Some("/tmp/cookies.txt".to_string()))
            .with_cookies_from_browser(Some("chrome".to_string()));
        let args = CliExtractor::new(config).build_metadata_args("https://example.com/v1");

        assert!(args.iter().any(|a| a == "--cookies"));
        assert!(!args.iter().any(|a| a == "--cookies-from-browser"));
    }

    #[test]
    fn test_parse_formats_keeps_order_and_gaps() {
        let json = br#"{
            "id": "abc",
            "title": "Clip",
            "formats": [
                {"format_id": "251", "ext": "webm", "resolution": "audio only", "filesize": 3200000},
                {"format_id": "18", "ext": "mp4", "resolution": "640x360", "filesize": 10485760},
                {"format_id": "22", "ext": "mp4", "resolution": "1280x720", "filesize": null}
            ]
        }"#;

        let formats = parse_formats_json(json).unwrap();
        let ids: Vec<&str> = formats.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["251", "18", "22"]);
        assert_eq!(formats[1].size_bytes, Some(10_485_760));
        assert_eq!(formats[2].size_bytes, None);
        assert_eq!(formats[0].resolution.as_deref(), Some("audio only"));
    }

    #[test]
    fn test_parse_formats_rejects_garbage() {
        assert!(matches!(
            parse_formats_json(b"not json"),
            Err(ExtractorError::Parse(_))
        ));
        assert!(matches!(
            parse_formats_json(br#"{"id": "abc"}"#),
            Err(ExtractorError::Parse(_))
        ));
    }

    #[cfg(unix)]
    fn stub_ytdlp(dir: &Path, body: &str) -> CliExtractor {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        CliExtractor::new(
            ExtractorConfig::default().with_ytdlp_path(Some(path.to_string_lossy().to_string())),
        )
    }

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(unix)]
    #[test]
    fn test_error_summary_prefers_error_lines() {
        let stderr = "WARNING: falling back\nERROR: [generic] x: Requested format is not available\nsome trailer\n";
        assert_eq!(
            error_summary(stderr, exit_status(1)),
            "ERROR: [generic] x: Requested format is not available"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_error_summary_falls_back_to_last_line_then_status() {
        assert_eq!(
            error_summary("first\nlast line\n\n", exit_status(2)),
            "last line"
        );
        assert!(error_summary("  \n", exit_status(2)).starts_with("yt-dlp exited with"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_streams_progress_and_finishes() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub_ytdlp(
            dir.path(),
            "echo 'progress:5/10'\necho '[download] Destination: clip.mp4'\necho 'progress:10/NA'\nexit 0",
        );
        let sink = RecordingProgress::default();

        extractor
            .download("https://example.com/v1", &FormatSelection::Best, dir.path(), &sink)
            .await
            .unwrap();

        assert_eq!(
            *sink.events.lock().unwrap(),
            vec![
                ProgressEvent { downloaded_bytes: 5, total_bytes: Some(10) },
                ProgressEvent { downloaded_bytes: 10, total_bytes: None },
            ]
        );
        assert!(*sink.finished.lock().unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_failure_reports_stderr_without_finish() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub_ytdlp(
            dir.path(),
            "echo 'progress:5/10'\necho 'progress:10/10'\n\
             echo 'ERROR: [generic] x: Requested format is not available' >&2\nexit 1",
        );
        let sink = RecordingProgress::default();

        let result = extractor
            .download(
                "https://example.com/v1",
                &FormatSelection::Id("999".to_string()),
                dir.path(),
                &sink,
            )
            .await;

        match result {
            Err(ExtractorError::Failed(message)) => {
                assert_eq!(message, "ERROR: [generic] x: Requested format is not available")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(sink.events.lock().unwrap().len(), 2);
        assert!(!*sink.finished.lock().unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_output_kills_and_reaps_child() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub_ytdlp(dir.path(), "printf '\\377\\376\\n'\nexec sleep 30");
        let sink = RecordingProgress::default();

        let started = std::time::Instant::now();
        let result = extractor
            .download("https://example.com/v1", &FormatSelection::Best, dir.path(), &sink)
            .await;

        assert!(matches!(result, Err(ExtractorError::Io(_))));
        assert!(started.elapsed() < std::time::Duration::from_secs(20));
        assert!(!*sink.finished.lock().unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_metadata_parses_stub_output() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub_ytdlp(
            dir.path(),
            r#"echo '{"formats": [{"format_id": "18", "ext": "mp4", "resolution": "640x360", "filesize": 10485760}]}'"#,
        );

        let formats = extractor.extract_metadata("https://example.com/v1").await.unwrap();

        assert_eq!(
            formats,
            vec![FormatDescriptor::new("18", "mp4")
                .with_resolution("640x360")
                .with_size(10_485_760)]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_metadata_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub_ytdlp(
            dir.path(),
            "echo 'ERROR: [youtube] abc: Video unavailable' >&2\nexit 1",
        );

        let result = extractor.extract_metadata("https://example.com/v1").await;

        assert!(matches!(
            result,
            Err(ExtractorError::Failed(ref m)) if m == "ERROR: [youtube] abc: Video unavailable"
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let extractor = CliExtractor::new(
            ExtractorConfig::default().with_ytdlp_path(Some("/nonexistent/bin/yt-dlp".to_string())),
        );

        let result = extractor.extract_metadata("https://example.com/v1").await;

        assert!(matches!(result, Err(ExtractorError::ToolNotFound(_))));
    }
}
