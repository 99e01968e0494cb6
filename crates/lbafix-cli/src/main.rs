mod cli;
mod commands;
mod number;
mod profile;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, _) => "debug",
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("lbafix={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Patch(args) => commands::patch::run(&args),
        Command::Convert(args) => commands::convert::run(&args),
        Command::Flag { boot_sector } => commands::flag::run(&boot_sector).map(|_| ()),
        Command::Logo { image, boot_sector } => {
            commands::logo::run(&image, &boot_sector).map(|_| ())
        }
    }
}
