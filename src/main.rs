use anyhow::{Context, Result};
use clap::Parser;

use mustard::cli::Cli;
use mustard::core::run;
use mustard::demo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.window_config().context("loading window config")?;
    log::info!("starting '{}' at {}x{}", config.title, config.width, config.height);

    run(config, |window| {
        demo::build(window);
    })?;

    Ok(())
}
