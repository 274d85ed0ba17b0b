use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum FrontendError {
    /// SDL reports errors as plain strings.
    #[error("SDL: {0}")]
    Sdl(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Machine(#[from] oberon_machines::MachineError),

    #[error(transparent)]
    Core(#[from] oberon_core::Error),
}
