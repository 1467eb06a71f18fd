//! Configuration management subcommands.

use clap::Subcommand;

/// `dpr config` subcommands.
///
/// Keys are taken as plain strings so an unknown key is reported with the
/// list of valid ones instead of a usage error.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// One of: api-key, model, port
        key: String,
        /// New value
        value: String,
    },
    /// Show a configuration value (the API key is masked)
    Get {
        /// One of: api-key, model, port
        key: String,
    },
}
