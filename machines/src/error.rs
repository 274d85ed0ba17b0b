use thiserror::Error;

/// Why a running processor stopped on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Trap {
    /// The program asked to halt.
    #[error("halt requested by the running program")]
    Halt,

    /// A memory access fell outside the board's RAM.
    #[error("bus fault at word {0:#x}")]
    BusFault(usize),
}

/// Errors building a board or attaching a video observer to it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("display {width}x{height} needs {needed} words but memory has {available}")]
    DisplayTooLarge {
        width: u32,
        height: u32,
        needed: usize,
        available: usize,
    },

    #[error("framebuffer is {actual:?}, display is {expected:?}")]
    FramebufferMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error(transparent)]
    Core(#[from] oberon_core::Error),
}
