use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use onefile::cli::Cli;
use onefile::config::{Config, Mode};
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(mode) = Mode::from_cli(&cli) else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "provide --scan-filename, --scan-folder, --folder-path or --calc-token",
            )
            .exit();
    };
    let config = Config::from_cli(cli, mode)?;

    let stdout = std::io::stdout();
    onefile::pipeline::run(&config, &mut stdout.lock())
}

// Logs go to stderr so stdout only carries reports.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "onefile=warn",
            1 => "onefile=info",
            2 => "onefile=debug",
            _ => "onefile=trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();
}
