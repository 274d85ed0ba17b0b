use clap::Parser;

mod cli;
mod config;
mod emulator;
mod error;
mod input;
mod video;

use cli::Cli;
use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.apply_cli(&cli);
    config.validate()?;

    emulator::run(&config)?;
    Ok(())
}
