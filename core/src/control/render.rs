//! Per-paint composition of the framebuffer, halt overlay and title.

use std::sync::Arc;

use crate::control::lifecycle::LivenessProbe;
use crate::device::{Framebuffer, IoDevice};

/// Appended to the indicator status in the window title.
pub const PRODUCT_LABEL: &str = "Oberon Emulator";

/// Where a composed frame ends up (a window, or a recorder in tests).
pub trait Surface {
    fn set_title(&mut self, title: &str);

    /// Present an RGB24 frame of the framebuffer's dimensions.
    fn present(&mut self, rgb: &[u8]);
}

/// Uniform color blended over the frame while the processor is halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: u8,
}

impl Tint {
    pub const HALTED: Self = Self {
        r: 255,
        g: 0,
        b: 0,
        alpha: 100,
    };

    /// Source-over blend of the tint onto one channel value.
    pub fn blend(self, dst: u8, src: u8) -> u8 {
        let a = self.alpha as u16;
        ((src as u16 * a + dst as u16 * (255 - a) + 127) / 255) as u8
    }

    fn apply(self, rgb: &mut [u8]) {
        for px in rgb.chunks_exact_mut(3) {
            px[0] = self.blend(px[0], self.r);
            px[1] = self.blend(px[1], self.g);
            px[2] = self.blend(px[2], self.b);
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::HALTED
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintReport {
    pub halted: bool,
}

pub struct RenderLoop<D> {
    framebuffer: Arc<Framebuffer>,
    io: Arc<D>,
    liveness: LivenessProbe,
    tint: Tint,
    frame: Vec<u8>,
}

impl<D: IoDevice> RenderLoop<D> {
    pub fn new(framebuffer: Arc<Framebuffer>, io: Arc<D>, liveness: LivenessProbe) -> Self {
        let len = framebuffer.width() as usize * framebuffer.height() as usize * 3;
        Self {
            framebuffer,
            io,
            liveness,
            tint: Tint::default(),
            frame: vec![0; len],
        }
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    /// Compose and present one frame.
    pub fn paint<S: Surface + ?Sized>(&mut self, surface: &mut S) -> PaintReport {
        surface.set_title(&window_title(&self.io.status_indicator()));

        self.framebuffer.copy_rgb24(&mut self.frame);
        let halted = !self.liveness.is_alive();
        if halted {
            self.tint.apply(&mut self.frame);
        }
        surface.present(&self.frame);

        PaintReport { halted }
    }
}

pub fn window_title(status: &str) -> String {
    format!("{status} - {PRODUCT_LABEL}")
}
