//! Host input events and the queue that carries them from the capture
//! side (the window system) to the input translator.

use std::sync::mpsc;

use bitflags::bitflags;

use crate::error::Error;

/// Host key identity as a USB HID keyboard usage ID.
///
/// SDL scancodes use the same numbering, so a frontend can convert with a
/// plain cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const A: Self = Self(0x04);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const F1: Self = Self(0x3A);
    pub const F12: Self = Self(0x45);
    pub const INSERT: Self = Self(0x49);
    pub const LEFT_CONTROL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const RIGHT_CONTROL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
}

/// Which physical copy of a key produced the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyLocation {
    #[default]
    Standard,
    Left,
    Right,
    Numpad,
}

bitflags! {
    /// Modifier keys held when a key event was produced.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// Mouse button index as reported by the host (1 = left, 2 = middle,
/// 3 = right).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseButton(pub u8);

impl MouseButton {
    pub const LEFT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);
    pub const RIGHT: Self = Self(3);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub location: KeyLocation,
    pub code: KeyCode,
    /// Character the key produces, if any. Informational only: typed text
    /// arrives separately as [`HostEvent::Typed`].
    pub character: Option<char>,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(location: KeyLocation, code: KeyCode) -> Self {
        Self {
            location,
            code,
            character: None,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Typed(char),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Pointer motion in host pixel coordinates (origin top-left).
    MouseMoved { x: i32, y: i32 },
    /// Pointer motion with a button held; handled exactly like a move.
    MouseDragged { x: i32, y: i32 },
}

/// Capture side of the host event queue.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<HostEvent>,
}

impl EventSender {
    pub fn send(&self, event: HostEvent) -> Result<(), Error> {
        self.tx.send(event).map_err(|_| Error::QueueClosed)
    }
}

/// Processing side of the host event queue.
pub struct EventReceiver {
    rx: mpsc::Receiver<HostEvent>,
}

impl EventReceiver {
    /// Every event queued so far, in arrival order, without blocking.
    pub fn pending(&self) -> impl Iterator<Item = HostEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Create a connected sender/receiver pair.
pub fn event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventReceiver { rx })
}
