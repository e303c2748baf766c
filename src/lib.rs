pub mod cli;
pub mod config;
pub mod downloader;
pub mod logging;
pub mod presentation;
pub mod session;

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use cli::{Cli, Commands};
use config::AppConfig;
use downloader::tools::ToolManager;
use downloader::CliExtractor;
use presentation::{render_table, Console, TerminalProgress};
use session::{App, Banner, Session};

/// Parse arguments, load configuration and run the selected command.
pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply(cli.overrides());
    info!("Output directory: {}", config.output_dir.display());

    let extractor = Arc::new(CliExtractor::new(config.extractor_config()));
    let app = App::new(extractor.clone(), config.output_dir.clone());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut console = Console::new(app, stdin.lock(), io::stdout()).with_progress(true);
            console.run().await.context("Console I/O failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Formats { url } => {
            let mut session = Session::new();
            let banner = app.list_formats(&mut session, &url).await;
            if let Some(rows) = session.rows().filter(|rows| !rows.is_empty()) {
                print!("{}", render_table(&rows));
            }
            Ok(report(&banner))
        }
        Commands::Download { url, format } => {
            let progress = TerminalProgress::new();
            let banner = app.download_with(&url, format.as_deref(), &progress).await;
            Ok(report(&banner))
        }
        Commands::Tools => {
            let tool = ToolManager::new().get_tool_info(&extractor);
            println!("{}: {}", tool.name, tool.path);
            match (&tool.version, tool.is_available) {
                (Some(version), true) => println!("version: {}", version),
                (None, true) => println!("available (version unknown)"),
                _ => println!("not available"),
            }
            Ok(if tool.is_available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn report(banner: &Banner) -> ExitCode {
    if banner.is_error() {
        eprintln!("{}", banner);
        ExitCode::FAILURE
    } else {
        println!("{}", banner);
        ExitCode::SUCCESS
    }
}
