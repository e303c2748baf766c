// Terminal presentation: tables, progress and the interactive console

pub mod console;
pub mod progress_bar;
pub mod table;

pub use console::{Console, ConsoleCommand};
pub use progress_bar::TerminalProgress;
pub use table::{build_rows, format_size, render_table, selection_options, FormatRow};
