#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use oberon_core::control::event::{KeyCode, KeyLocation, MouseButton};
use oberon_core::cpu::{AddressSpace, Processor};
use oberon_core::device::{IoDevice, KeyboardQueue};

/// Memory stand-in that counts how many processors were bound to it.
#[derive(Default)]
pub struct TestMemory {
    pub bound: AtomicUsize,
}

/// Processor double: "runs" from `start()` until `stop()` or `crash()`.
pub struct FakeProcessor {
    pub memory: Arc<TestMemory>,
    pub address_space: AddressSpace,
    pub running: AtomicBool,
    pub started: AtomicBool,
    pub stopped: AtomicBool,
    /// Opaque register file, reduced to a program counter.
    pub pc: AtomicU32,
}

impl FakeProcessor {
    /// Simulate an internal trap.
    pub fn crash(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Processor for FakeProcessor {
    type Memory = TestMemory;

    fn new(memory: Arc<TestMemory>, address_space: AddressSpace) -> Self {
        memory.bound.fetch_add(1, Ordering::SeqCst);
        Self {
            memory,
            address_space,
            running: AtomicBool::new(false),
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            pc: AtomicU32::new(0),
        }
    }

    fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn copy_registers_from(&self, other: &Self) {
        self.pc.store(other.pc.load(Ordering::SeqCst), Ordering::SeqCst);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyboardCall {
    Char(char),
    Press(KeyLocation, KeyCode),
    Release(KeyLocation, KeyCode),
}

#[derive(Default)]
pub struct RecordingKeyboard {
    pub calls: Mutex<Vec<KeyboardCall>>,
}

impl RecordingKeyboard {
    pub fn take(&self) -> Vec<KeyboardCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl KeyboardQueue for RecordingKeyboard {
    fn push_char(&self, c: char) {
        self.calls.lock().unwrap().push(KeyboardCall::Char(c));
    }

    fn press_key(&self, location: KeyLocation, code: KeyCode) {
        self.calls
            .lock()
            .unwrap()
            .push(KeyboardCall::Press(location, code));
    }

    fn release_key(&self, location: KeyLocation, code: KeyCode) {
        self.calls
            .lock()
            .unwrap()
            .push(KeyboardCall::Release(location, code));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IoCall {
    Button(MouseButton, bool),
    Position(u32, u32),
}

pub struct RecordingIo {
    pub calls: Mutex<Vec<IoCall>>,
    pub status: Mutex<String>,
}

impl Default for RecordingIo {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status: Mutex::new("--------".to_string()),
        }
    }
}

impl RecordingIo {
    pub fn take(&self) -> Vec<IoCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl IoDevice for RecordingIo {
    fn set_mouse_button(&self, button: MouseButton, down: bool) {
        self.calls.lock().unwrap().push(IoCall::Button(button, down));
    }

    fn set_mouse_position(&self, x: u32, y: u32) {
        self.calls.lock().unwrap().push(IoCall::Position(x, y));
    }

    fn status_indicator(&self) -> String {
        self.status.lock().unwrap().clone()
    }
}
