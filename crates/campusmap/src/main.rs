mod app;
mod campus;
mod cli;
mod commands;
mod config;
mod geometry;
mod path;
mod scene;
mod selection;
mod session;
mod theme;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // RUST_LOG wins over -v/-q so individual modules can be traced.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("campusmap={}", cli.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(e) = cli.run() {
        tracing::debug!("{e:?}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
