use crate::kanban_board::KanbanBoard;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Drag-and-drop task board for the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "dropboard", version, about)]
pub struct Config {
    /// Append logs to this file. Logging is off when omitted.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,

    /// Start with no demo tasks.
    #[arg(long)]
    pub empty: bool,
}

impl Config {
    pub fn initial_board(&self) -> KanbanBoard {
        if self.empty {
            KanbanBoard::new()
        } else {
            KanbanBoard::seeded()
        }
    }
}
