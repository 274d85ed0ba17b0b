use crate::control::event::{KeyCode, KeyLocation};

/// Character and scancode queue feeding the emulated keyboard controller.
pub trait KeyboardQueue: Send + Sync {
    /// Queue a printable character produced by the host's text input.
    fn push_char(&self, c: char);

    /// Queue a key press for the given host key identity.
    fn press_key(&self, location: KeyLocation, code: KeyCode);

    /// Queue a key release for the given host key identity.
    fn release_key(&self, location: KeyLocation, code: KeyCode);
}
