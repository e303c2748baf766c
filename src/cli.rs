use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "video-format-downloader")]
#[command(about = "List the formats of a video URL and download one through yt-dlp")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to <config dir>/video-format-downloader/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory downloads are written to
    #[arg(short, long, global = true, env = "VFD_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the yt-dlp binary
    #[arg(long, global = true, env = "VFD_YTDLP")]
    pub ytdlp: Option<String>,

    /// Proxy URL passed to yt-dlp
    #[arg(long, global = true, env = "VFD_PROXY")]
    pub proxy: Option<String>,

    /// cookies.txt file passed to yt-dlp
    #[arg(long, global = true)]
    pub cookies: Option<String>,

    /// Browser to read cookies from (chrome, firefox, ...)
    #[arg(long, global = true)]
    pub cookies_from_browser: Option<String>,

    /// yt-dlp socket timeout in seconds
    #[arg(long, global = true)]
    pub socket_timeout: Option<u32>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Interactive session (default)
    Interactive,
    /// List downloadable formats of a URL
    Formats {
        url: String,
    },
    /// Download a URL
    Download {
        url: String,
        /// Format id from `formats`; omit or pass `best` to let yt-dlp choose
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Show yt-dlp availability and version
    Tools,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            ytdlp_path: self.ytdlp.clone(),
            proxy: self.proxy.clone(),
            cookies_path: self.cookies.clone(),
            cookies_from_browser: self.cookies_from_browser.clone(),
            socket_timeout: self.socket_timeout,
        }
    }
}
