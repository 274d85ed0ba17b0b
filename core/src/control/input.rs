//! Host input to emulated keyboard/mouse translation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::control::event::{
    EventReceiver, HostEvent, KeyCode, KeyEvent, KeyLocation, Modifiers, MouseButton,
};
use crate::control::lifecycle::{LifecycleController, ResetKind};
use crate::cpu::Processor;
use crate::device::{IoDevice, KeyboardQueue};

/// Special handling for one host key. Keys without a rule pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemapRule {
    /// Reset the processor on press; shift selects a cold reset.
    ResetTrigger,
    /// Forward as this canonical emulated key instead.
    Coalesce { location: KeyLocation, code: KeyCode },
    /// Act as a mouse button unless one of `unless` is held at press time.
    MouseChord { button: MouseButton, unless: Modifiers },
}

/// Lookup table from host key code to [`RemapRule`].
#[derive(Clone, Debug)]
pub struct RemapTable {
    rules: HashMap<KeyCode, RemapRule>,
}

impl RemapTable {
    /// A table with no rules: every key passes through.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn bind(&mut self, code: KeyCode, rule: RemapRule) {
        self.rules.insert(code, rule);
    }

    pub fn get(&self, code: KeyCode) -> Option<RemapRule> {
        self.rules.get(&code).copied()
    }
}

impl Default for RemapTable {
    /// F12 resets, Insert doubles as F1 for keyboards without it, and Alt
    /// is the middle mouse button unless Control is held.
    fn default() -> Self {
        let mut table = Self::empty();
        table.bind(KeyCode::F12, RemapRule::ResetTrigger);

        let f1 = RemapRule::Coalesce {
            location: KeyLocation::Standard,
            code: KeyCode::F1,
        };
        table.bind(KeyCode::F1, f1);
        table.bind(KeyCode::INSERT, f1);

        let chord = RemapRule::MouseChord {
            button: MouseButton::MIDDLE,
            unless: Modifiers::CONTROL,
        };
        table.bind(KeyCode::LEFT_ALT, chord);
        table.bind(KeyCode::RIGHT_ALT, chord);
        table
    }
}

/// Serially applies host events to the keyboard queue, the I/O device and
/// the lifecycle controller.
pub struct InputTranslator<P: Processor, K, D> {
    lifecycle: LifecycleController<P>,
    keyboard: Arc<K>,
    io: Arc<D>,
    table: RemapTable,
    width: u32,
    height: u32,
    /// Chord keys whose press became a mouse button press.
    chords_down: HashSet<KeyCode>,
}

impl<P, K, D> InputTranslator<P, K, D>
where
    P: Processor,
    K: KeyboardQueue,
    D: IoDevice,
{
    /// `width` and `height` are the framebuffer dimensions used for mouse
    /// clamping; both must be non-zero.
    pub fn new(
        lifecycle: LifecycleController<P>,
        keyboard: Arc<K>,
        io: Arc<D>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            lifecycle,
            keyboard,
            io,
            table: RemapTable::default(),
            width,
            height,
            chords_down: HashSet::new(),
        }
    }

    pub fn with_table(mut self, table: RemapTable) -> Self {
        self.table = table;
        self
    }

    pub fn remap_for(&self, code: KeyCode) -> Option<RemapRule> {
        self.table.get(code)
    }

    pub fn lifecycle(&self) -> &LifecycleController<P> {
        &self.lifecycle
    }

    /// Apply every queued event in arrival order. Returns how many were
    /// handled.
    pub fn drain(&mut self, events: &EventReceiver) -> usize {
        let mut handled = 0;
        for event in events.pending() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Typed(c) => self.keyboard.push_char(c),
            HostEvent::KeyDown(key) => self.key_down(key),
            HostEvent::KeyUp(key) => self.key_up(key),
            HostEvent::MouseDown(button) => self.io.set_mouse_button(button, true),
            HostEvent::MouseUp(button) => self.io.set_mouse_button(button, false),
            HostEvent::MouseMoved { x, y } | HostEvent::MouseDragged { x, y } => {
                let (x, y) = to_emulated(x, y, self.width, self.height);
                self.io.set_mouse_position(x, y);
            }
        }
    }

    fn key_down(&mut self, key: KeyEvent) {
        match self.table.get(key.code) {
            Some(RemapRule::ResetTrigger) => {
                let kind = if key.modifiers.contains(Modifiers::SHIFT) {
                    ResetKind::Cold
                } else {
                    ResetKind::Warm
                };
                self.lifecycle.reset(kind);
            }
            Some(RemapRule::Coalesce { location, code }) => {
                self.keyboard.press_key(location, code);
            }
            Some(RemapRule::MouseChord { button, unless })
                if !key.modifiers.intersects(unless) =>
            {
                self.chords_down.insert(key.code);
                self.io.set_mouse_button(button, true);
            }
            Some(RemapRule::MouseChord { .. }) | None => {
                self.keyboard.press_key(key.location, key.code);
            }
        }
    }

    fn key_up(&mut self, key: KeyEvent) {
        match self.table.get(key.code) {
            Some(RemapRule::ResetTrigger) => {}
            Some(RemapRule::Coalesce { location, code }) => {
                self.keyboard.release_key(location, code);
            }
            Some(RemapRule::MouseChord { button, .. }) if self.chords_down.remove(&key.code) => {
                self.io.set_mouse_button(button, false);
            }
            Some(RemapRule::MouseChord { .. }) | None => {
                self.keyboard.release_key(key.location, key.code);
            }
        }
    }
}

/// Clamp host coordinates into the framebuffer and flip the vertical axis:
/// the host origin is top-left, the emulated origin bottom-left.
pub fn to_emulated(x: i32, y: i32, width: u32, height: u32) -> (u32, u32) {
    let x = x.clamp(0, width.saturating_sub(1) as i32) as u32;
    let y = y.clamp(0, height.saturating_sub(1) as i32) as u32;
    (x, flip_y(y, height))
}

/// Mirror a row index. Applying it twice returns the original row.
pub fn flip_y(y: u32, height: u32) -> u32 {
    height - 1 - y
}
