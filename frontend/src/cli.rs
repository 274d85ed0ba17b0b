use std::path::PathBuf;

use clap::Parser;

/// Command-line overrides. Anything left unset comes from the config file.
#[derive(Parser, Debug, Default)]
#[command(
    name = "oberon",
    about = "Oberon workstation emulator",
    long_about = "Runs the emulated workstation in an SDL window.\n\
                  F12 resets the processor (Shift+F12 for a cold reset); \
                  Alt acts as the middle mouse button.",
    version
)]
pub struct Cli {
    /// Integer window scale factor
    #[arg(short = 's', long)]
    pub scale: Option<u32>,

    /// Use the large address space
    #[arg(long)]
    pub large: bool,

    /// Config file (default: <config dir>/oberon/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Display width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Display height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}
