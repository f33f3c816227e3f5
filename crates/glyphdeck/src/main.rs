mod app;
mod cli;
mod commands;
mod config;
mod fullscreen;
mod input;
mod nav;
mod navigator;
mod parser;
mod render;
mod scrollbar;
mod theme;
mod watch;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = cli.run() {
        tracing::debug!("Exiting with error: {err:?}");
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the verbosity flags when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("glyphdeck={level}")));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();
}
