use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let origin = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not created yet, showing defaults)", path.display())
    };
    println!("{} {}", "# Config:".bold(), origin.dimmed());

    let effective = Config::load_or_default().effective();
    print!("{}", serde_yaml::to_string(&effective)?);
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::debug!(key, value, path = %path.display(), "Config updated");
    println!("{} {key} = {value}", "Set".green().bold());
    Ok(())
}
