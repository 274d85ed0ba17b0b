use thiserror::Error;

/// Errors raised by the control surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A framebuffer must have at least one pixel in each dimension.
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidFramebuffer { width: u32, height: u32 },

    /// The receiving side of the host event queue has been dropped.
    #[error("host event queue closed")]
    QueueClosed,
}
