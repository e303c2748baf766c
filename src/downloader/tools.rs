use std::process::Command;

use super::extractors::{CliExtractor, Extractor};

/// Installation status of the extraction tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub version: Option<String>,
    pub path: String,
    pub is_available: bool,
}

pub struct ToolManager;

impl ToolManager {
    pub fn new() -> Self {
        Self
    }

    pub fn get_tool_info(&self, extractor: &CliExtractor) -> ToolInfo {
        let path = extractor.ytdlp_path().to_string();
        let is_available = extractor.is_available();
        let version = if is_available {
            self.get_version(&path)
        } else {
            None
        };

        ToolInfo {
            name: "yt-dlp".to_string(),
            version,
            path,
            is_available,
        }
    }

    fn get_version(&self, path: &str) -> Option<String> {
        match Command::new(path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let out = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if out.is_empty() {
                    None
                } else {
                    Some(out)
                }
            }
            _ => None,
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}
