//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Controller serial lookups for chat slash commands.
#[derive(Debug, Parser)]
#[command(name = "serialbot", version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the config file (defaults to the platform config dir).
    #[arg(long, global = true, env = "SERIALBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the slash-command webhook server.
    Serve(ServeArgs),

    /// Check whether a controller runs firmware that supports the doorbell.
    Check(LookupArgs),

    /// Print the reporting dashboard link for a controller.
    Link(LookupArgs),

    /// Inspect configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind).
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Serial number text, as it would be typed after the slash command.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Channel to authorize as (defaults to the first allowed channel).
    #[arg(long)]
    pub channel: Option<String>,
}

impl LookupArgs {
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration with secrets redacted.
    Show,
    /// Print the config file path.
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lookup_text_is_joined() {
        let cli = Cli::parse_from(["serialbot", "check", "92000000", "92000001"]);
        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.joined_text(), "92000000 92000001");
    }
}
