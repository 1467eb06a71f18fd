//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Research any open-source repository without leaving your project.
///
/// `dpr <question>` is shorthand for `dpr research <question>`.
#[derive(Parser, Debug)]
#[command(name = "dpr")]
#[command(about = "Research any open-source repository without leaving your project")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Research question (e.g. "how does streaming work in https://github.com/user/repo")
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Stream response tokens in real-time
    #[arg(long)]
    pub stream: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve the bare-query shorthand into an explicit command.
    ///
    /// Returns `None` when neither a command nor a query was given.
    pub fn into_command(self) -> Option<Commands> {
        match self.command {
            Some(command) => Some(command),
            None if self.query.is_empty() => None,
            None => Some(Commands::Research {
                query: self.query,
                stream: self.stream,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_commands::ConfigCommand;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_query_becomes_research() {
        let cli = Cli::parse_from(["dpr", "how", "does", "zod", "parse"]);
        match cli.into_command() {
            Some(Commands::Research { query, stream }) => {
                assert_eq!(query.join(" "), "how does zod parse");
                assert!(!stream);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn subcommands_take_precedence() {
        let cli = Cli::parse_from(["dpr", "-v", "status"]);
        assert!(cli.verbose);
        assert!(matches!(cli.into_command(), Some(Commands::Status)));

        let cli = Cli::parse_from(["dpr", "config", "set", "port", "9000"]);
        match cli.into_command() {
            Some(Commands::Config {
                command: ConfigCommand::Set { key, value },
            }) => {
                assert_eq!(key, "port");
                assert_eq!(value, "9000");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn stream_flag_applies_to_both_forms() {
        let cli = Cli::parse_from(["dpr", "--stream", "how does zod parse"]);
        assert!(matches!(
            cli.into_command(),
            Some(Commands::Research { stream: true, .. })
        ));

        let cli = Cli::parse_from(["dpr", "research", "how", "--stream"]);
        assert!(matches!(
            cli.into_command(),
            Some(Commands::Research { stream: true, .. })
        ));
    }

    #[test]
    fn no_arguments_yields_no_command() {
        let cli = Cli::parse_from(["dpr"]);
        assert!(cli.into_command().is_none());
    }

    #[test]
    fn research_requires_a_query() {
        assert!(Cli::try_parse_from(["dpr", "research"]).is_err());
    }
}
