//! Mouse and LED registers of the I/O page.

use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use oberon_core::control::event::MouseButton;
use oberon_core::device::IoDevice;

/// Latched mouse state as the running program sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: u32,
    pub y: u32,
    /// Bit `n - 1` is set while button `n` is held.
    pub buttons: u8,
}

impl MouseState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        button_bit(button).is_some_and(|bit| self.buttons & bit != 0)
    }
}

#[derive(Default)]
pub struct Mmio {
    mouse_x: AtomicU32,
    mouse_y: AtomicU32,
    buttons: AtomicU8,
    leds: AtomicU8,
}

impl Mmio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse(&self) -> MouseState {
        MouseState {
            x: self.mouse_x.load(Ordering::Relaxed),
            y: self.mouse_y.load(Ordering::Relaxed),
            buttons: self.buttons.load(Ordering::Relaxed),
        }
    }

    /// Written by the running program.
    pub fn set_leds(&self, leds: u8) {
        self.leds.store(leds, Ordering::Relaxed);
    }

    pub fn leds(&self) -> u8 {
        self.leds.load(Ordering::Relaxed)
    }
}

impl IoDevice for Mmio {
    fn set_mouse_button(&self, button: MouseButton, down: bool) {
        let Some(bit) = button_bit(button) else {
            log::debug!("ignoring mouse button {}", button.0);
            return;
        };
        if down {
            self.buttons.fetch_or(bit, Ordering::Relaxed);
        } else {
            self.buttons.fetch_and(!bit, Ordering::Relaxed);
        }
    }

    fn set_mouse_position(&self, x: u32, y: u32) {
        self.mouse_x.store(x, Ordering::Relaxed);
        self.mouse_y.store(y, Ordering::Relaxed);
    }

    /// Eight characters, LED 7 first: `*` lit, `-` dark.
    fn status_indicator(&self) -> String {
        let leds = self.leds();
        (0..8)
            .rev()
            .map(|i| if leds & (1 << i) != 0 { '*' } else { '-' })
            .collect()
    }
}

fn button_bit(button: MouseButton) -> Option<u8> {
    match button.0 {
        1..=8 => Some(1 << (button.0 - 1)),
        _ => None,
    }
}
