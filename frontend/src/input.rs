//! SDL events to host events.

use oberon_core::control::event::{
    HostEvent, KeyCode, KeyEvent, KeyLocation, Modifiers, MouseButton,
};
use sdl2::event::Event;
use sdl2::keyboard::{Mod, Scancode};
use sdl2::mouse;

/// Converts SDL events into [`HostEvent`]s in framebuffer pixel units.
pub struct HostInput {
    scale: i32,
}

impl HostInput {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1) as i32,
        }
    }

    /// Host events produced by one SDL event. Key repeats are dropped;
    /// repeated characters still arrive through text input.
    pub fn translate(&self, event: &Event) -> Vec<HostEvent> {
        match event {
            Event::TextInput { text, .. } => text.chars().map(HostEvent::Typed).collect(),

            Event::KeyDown {
                scancode: Some(sc),
                keymod,
                repeat: false,
                ..
            } => vec![HostEvent::KeyDown(key_event(*sc, *keymod))],

            Event::KeyUp {
                scancode: Some(sc),
                keymod,
                ..
            } => vec![HostEvent::KeyUp(key_event(*sc, *keymod))],

            Event::MouseButtonDown { mouse_btn, .. } => mouse_button(*mouse_btn)
                .map(HostEvent::MouseDown)
                .into_iter()
                .collect(),

            Event::MouseButtonUp { mouse_btn, .. } => mouse_button(*mouse_btn)
                .map(HostEvent::MouseUp)
                .into_iter()
                .collect(),

            Event::MouseMotion {
                x, y, mousestate, ..
            } => {
                let (x, y) = (x / self.scale, y / self.scale);
                if mousestate.left() || mousestate.middle() || mousestate.right() {
                    vec![HostEvent::MouseDragged { x, y }]
                } else {
                    vec![HostEvent::MouseMoved { x, y }]
                }
            }

            _ => Vec::new(),
        }
    }
}

/// SDL scancodes are USB HID usage IDs.
pub fn key_event(scancode: Scancode, keymod: Mod) -> KeyEvent {
    KeyEvent::new(location_of(scancode), KeyCode(scancode as i32 as u16))
        .with_modifiers(modifiers_from(keymod))
}

pub fn location_of(scancode: Scancode) -> KeyLocation {
    match scancode {
        Scancode::LCtrl | Scancode::LShift | Scancode::LAlt | Scancode::LGui => KeyLocation::Left,
        Scancode::RCtrl | Scancode::RShift | Scancode::RAlt | Scancode::RGui => {
            KeyLocation::Right
        }
        // Keypad block: KP_DIVIDE through KP_PERIOD, plus KP_EQUALS.
        sc if matches!(sc as i32, 84..=99 | 103) => KeyLocation::Numpad,
        _ => KeyLocation::Standard,
    }
}

pub fn modifiers_from(keymod: Mod) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD) {
        modifiers |= Modifiers::SHIFT;
    }
    if keymod.intersects(Mod::LCTRLMOD | Mod::RCTRLMOD) {
        modifiers |= Modifiers::CONTROL;
    }
    if keymod.intersects(Mod::LALTMOD | Mod::RALTMOD) {
        modifiers |= Modifiers::ALT;
    }
    modifiers
}

pub fn mouse_button(button: mouse::MouseButton) -> Option<MouseButton> {
    match button {
        mouse::MouseButton::Left => Some(MouseButton::LEFT),
        mouse::MouseButton::Middle => Some(MouseButton::MIDDLE),
        mouse::MouseButton::Right => Some(MouseButton::RIGHT),
        mouse::MouseButton::X1 => Some(MouseButton(4)),
        mouse::MouseButton::X2 => Some(MouseButton(5)),
        mouse::MouseButton::Unknown => None,
    }
}
