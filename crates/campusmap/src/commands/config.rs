use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, VALID_KEYS};

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    println!("  defaults.theme    = {}", config.theme());
    println!("  defaults.windowed = {}", config.windowed());
    match config.campus() {
        Some(campus) => println!("  defaults.campus   = {}", campus.display()),
        None => println!("  defaults.campus   = {}", "(not set)".dimmed()),
    }
    println!();
    println!("Valid keys: {VALID_KEYS}");
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::info!(key, value, "config updated");
    println!("{} {key} = {value} ({})", "✓".green(), path.display());
    Ok(())
}
