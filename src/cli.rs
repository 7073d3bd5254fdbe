//! Command-line interface for the pretty-callback binary.

use clap::Parser;
use std::path::PathBuf;

/// Render a stream of execution events as a pretty console log.
///
/// Events are read as JSON lines, one event per line, from FILE or stdin.
#[derive(Parser, Debug, Clone)]
#[command(name = "pretty-callback")]
#[command(version)]
#[command(about = "Emoji and color annotated console reporter", long_about = None)]
pub struct Cli {
    /// JSON-lines event file ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Disable emoji markers
    #[arg(long)]
    pub no_emoji: bool,

    /// Keep colors even when stdout is not a terminal
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Path to configuration file
    #[arg(short = 'c', long, env = "PRETTY_CALLBACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail on the first line that is not a valid event
    #[arg(long)]
    pub strict: bool,

    /// Verbosity level for diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Reads from stdin when no file (or "-") was given.
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_ref()
            .map_or(true, |path| path.as_os_str() == "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dash_reads_stdin() {
        let cli = Cli::parse_from(["pretty-callback", "-"]);
        assert!(cli.reads_stdin());

        let cli = Cli::parse_from(["pretty-callback", "events.jsonl", "--no-emoji", "-vv"]);
        assert!(!cli.reads_stdin());
        assert!(cli.no_emoji);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_force_color_conflicts_with_no_color() {
        let result = Cli::try_parse_from(["pretty-callback", "--no-color", "--force-color"]);
        assert!(result.is_err());
    }
}
