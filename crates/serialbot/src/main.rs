mod cli;
mod error;

use std::io::Write;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use serialbot::AppState;
use serialbot_config::{Config, config_path, load_config, to_pipeline_config, to_toml};
use serialbot_core::Pipeline;

use crate::cli::{Cli, Command, ConfigCommand, GlobalOpts, LogFormat, LookupArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.log_format);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "serialbot", &mut std::io::stdout());
            Ok(())
        }

        Command::Config(ConfigCommand::Path) => {
            writeln!(std::io::stdout(), "{}", resolved_path(&cli.global))?;
            Ok(())
        }

        Command::Config(ConfigCommand::Show) => {
            let mut cfg = load(&cli.global)?;
            if cfg.cloud.password.is_some() {
                cfg.cloud.password = Some("********".into());
            }
            let rendered = to_toml(&cfg).map_err(|source| CliError::Config {
                path: resolved_path(&cli.global),
                source,
            })?;
            write!(std::io::stdout(), "{rendered}")?;
            Ok(())
        }

        Command::Serve(args) => {
            let cfg = load(&cli.global)?;
            let bind = args.bind.unwrap_or_else(|| cfg.server.bind.clone());
            let pipeline = build_pipeline(&cfg, &cli.global)?;

            tracing::info!(
                channels = pipeline.config().allowed_channels.len(),
                "starting webhook server"
            );
            serialbot::server::run(AppState::new(pipeline), &bind)
                .await
                .map_err(|source| CliError::Server { bind, source })
        }

        Command::Check(args) => {
            let pipeline = build_pipeline(&load(&cli.global)?, &cli.global)?;
            let channel = pick_channel(&pipeline, &args)?;
            let message = pipeline
                .check_device(&channel, &args.joined_text())
                .await?;
            writeln!(std::io::stdout(), "{message}")?;
            Ok(())
        }

        Command::Link(args) => {
            let pipeline = build_pipeline(&load(&cli.global)?, &cli.global)?;
            let channel = pick_channel(&pipeline, &args)?;
            let message = pipeline.dashboard_link(&channel, &args.joined_text())?;
            writeln!(std::io::stdout(), "{message}")?;
            Ok(())
        }
    }
}

fn resolved_path(global: &GlobalOpts) -> String {
    global
        .config
        .clone()
        .unwrap_or_else(config_path)
        .display()
        .to_string()
}

fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    load_config(global.config.as_deref()).map_err(|source| CliError::Config {
        path: resolved_path(global),
        source,
    })
}

fn build_pipeline(cfg: &Config, global: &GlobalOpts) -> Result<Pipeline, CliError> {
    let pipeline_config = to_pipeline_config(cfg).map_err(|source| CliError::Config {
        path: resolved_path(global),
        source,
    })?;
    Pipeline::from_config(pipeline_config).map_err(CliError::Client)
}

/// `--channel`, or the lexically first allowed channel.
fn pick_channel(pipeline: &Pipeline, args: &LookupArgs) -> Result<String, CliError> {
    if let Some(channel) = &args.channel {
        return Ok(channel.clone());
    }
    pipeline
        .config()
        .allowed_channels
        .iter()
        .min()
        .cloned()
        .ok_or(CliError::NoChannel)
}
