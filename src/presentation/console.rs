// Interactive console front-end
//
// Each command runs to completion before the next line is read, so there is
// never more than one action in flight.

use std::io::{self, BufRead, Write};
use tracing::debug;

use super::progress_bar::TerminalProgress;
use super::table::{render_table, selection_options};
use crate::downloader::{NullProgress, ProgressSink};
use crate::session::{App, Banner, Session};

const HELP: &str = "\
Commands:
  url <URL>          set the video URL
  list [URL]         list downloadable formats
  formats            show the last listed formats again
  select <ID|best>   choose a format to download
  download [URL]     download the selected format
  help               show this help
  quit               leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SetUrl(String),
    List(Option<String>),
    Formats,
    Select(String),
    Download(Option<String>),
    Help,
    Quit,
    Empty,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match word.to_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "url" => Ok(Self::SetUrl(rest.to_string())),
            "list" | "ls" => Ok(Self::List(arg)),
            "formats" | "show" => Ok(Self::Formats),
            "select" | "use" => arg
                .map(Self::Select)
                .ok_or_else(|| "Usage: select <ID|best>".to_string()),
            "download" | "dl" => Ok(Self::Download(arg)),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {} (type 'help')", other)),
        }
    }
}

/// Line-oriented session driver over any reader/writer pair
pub struct Console<R, W> {
    app: App,
    session: Session,
    input: R,
    output: W,
    show_progress: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(app: App, input: R, output: W) -> Self {
        Self {
            app,
            session: Session::new(),
            input,
            output,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read and execute commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "🎬 Video Downloader (type 'help' for commands)")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }

            match ConsoleCommand::parse(&line) {
                Ok(ConsoleCommand::Quit) => return Ok(()),
                Ok(command) => self.execute(command).await?,
                Err(msg) => writeln!(self.output, "{}", Banner::Error(msg))?,
            }
        }
    }

    async fn execute(&mut self, command: ConsoleCommand) -> io::Result<()> {
        debug!("[Console] {:?}", command);
        match command {
            ConsoleCommand::Empty | ConsoleCommand::Quit => {}
            ConsoleCommand::Help => writeln!(self.output, "{}", HELP)?,
            ConsoleCommand::SetUrl(url) => {
                self.session.url = url;
            }
            ConsoleCommand::List(url) => {
                let url = url.unwrap_or_else(|| self.session.url.clone());
                writeln!(self.output, "Fetching available formats...")?;
                let banner = self.app.list_formats(&mut self.session, &url).await;
                writeln!(self.output, "{}", banner)?;
                self.print_formats()?;
            }
            ConsoleCommand::Formats => {
                if self.session.formats().is_none() {
                    writeln!(self.output, "{}", Banner::Info("No formats listed yet".to_string()))?;
                } else {
                    self.print_formats()?;
                }
            }
            ConsoleCommand::Select(choice) => {
                let banner = self.app.select(&mut self.session, &choice);
                writeln!(self.output, "{}", banner)?;
            }
            ConsoleCommand::Download(url) => {
                if let Some(url) = url {
                    self.session.url = url;
                }
                writeln!(self.output, "Downloading... This may take a while")?;
                let banner = if self.show_progress {
                    let progress = TerminalProgress::new();
                    self.app.download(&self.session, &progress).await
                } else {
                    self.app.download(&self.session, &NullProgress as &dyn ProgressSink).await
                };
                writeln!(self.output, "{}", banner)?;
            }
        }
        Ok(())
    }

    fn print_formats(&mut self) -> io::Result<()> {
        let Some(rows) = self.session.rows() else {
            return Ok(());
        };
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(self.output, "{}", render_table(&rows))?;
        writeln!(self.output, "Select Download Format:")?;
        for (id, label) in selection_options(&rows) {
            let marker = if id == self.session.selected() { "*" } else { " " };
            writeln!(self.output, " {} {}", marker, label)?;
        }
        Ok(())
    }
}
