use crate::control::event::MouseButton;

/// Mouse and indicator registers of the memory-mapped I/O device.
pub trait IoDevice: Send + Sync {
    /// Latch a button state. `button` is the host button index.
    fn set_mouse_button(&self, button: MouseButton, down: bool);

    /// Latch the mouse position in emulated coordinates (origin bottom-left).
    fn set_mouse_position(&self, x: u32, y: u32);

    /// Short text describing the indicator lights, shown in the window title.
    fn status_indicator(&self) -> String;
}
