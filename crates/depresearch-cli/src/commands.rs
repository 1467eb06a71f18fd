//! Available `dpr` commands.

use clap::Subcommand;

use crate::config_commands::ConfigCommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research a library by analyzing its source code
    Research {
        /// Research question (e.g. "how does zod parse work internally")
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Stream response tokens in real-time
        #[arg(long)]
        stream: bool,
    },

    /// View or change configuration (api-key, model, port)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Check whether the background research server is running
    Status,

    /// Stop the background research server
    Stop,

    /// Show resolved paths for all depresearch files
    Paths,
}
