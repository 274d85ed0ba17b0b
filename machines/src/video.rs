use std::sync::Arc;
use std::sync::atomic::Ordering;

use oberon_core::device::Framebuffer;

use crate::board::Board;
use crate::error::MachineError;

pub const DEFAULT_FOREGROUND: u32 = 0xFFFFFF;
pub const DEFAULT_BACKGROUND: u32 = 0x000000;

/// Expands the board's 1bpp display memory into framebuffer pixels.
pub struct VideoObserver {
    framebuffer: Arc<Framebuffer>,
    foreground: u32,
    background: u32,
    row: Vec<u32>,
}

impl VideoObserver {
    /// The framebuffer must have the board's display dimensions.
    pub fn new(board: &Board, framebuffer: Arc<Framebuffer>) -> Result<Self, MachineError> {
        let expected = board.display_size();
        let actual = (framebuffer.width(), framebuffer.height());
        if expected != actual {
            return Err(MachineError::FramebufferMismatch { expected, actual });
        }
        Ok(Self {
            row: vec![0; actual.0 as usize],
            framebuffer,
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        })
    }

    pub fn with_colors(mut self, foreground: u32, background: u32) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Re-read the whole display region.
    pub fn refresh(&mut self, board: &Board) {
        let width = self.row.len();
        for y in 0..self.framebuffer.height() {
            for (i, word) in board.display_row(y).iter().enumerate() {
                let bits = word.load(Ordering::Relaxed);
                let start = i * 32;
                let end = (start + 32).min(width);
                for (bit, px) in self.row[start..end].iter_mut().enumerate() {
                    *px = if bits & (0x8000_0000 >> bit) != 0 {
                        self.foreground
                    } else {
                        self.background
                    };
                }
            }
            self.framebuffer.write_row(y, &self.row);
        }
    }
}
