use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod logging;
mod tui;

use cli::Cli;
use tui::EditorApp;
use tuiarea::config::Config;
use tuiarea::keymap::Keymap;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.clone())?;
    if cli.overwrite {
        config = config.with_overwrite(true);
    }

    let _log_guard = logging::init(&config.log_dir())?;
    match &config.source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    let keymap = Keymap::default()
        .with_overrides(&config.keybindings)
        .context("Invalid key binding in config")?;

    let mut app = EditorApp::new(&config, keymap);
    if let Some(text) = &cli.text {
        app.seed(text);
    }
    app.run()?;

    if cli.print_json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    }

    Ok(())
}
