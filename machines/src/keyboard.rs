//! Bounded FIFO between the input translator and the running program.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use oberon_core::control::event::{KeyCode, KeyLocation};
use oberon_core::device::KeyboardQueue;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Press(KeyLocation, KeyCode),
    Release(KeyLocation, KeyCode),
}

pub struct KeyQueue {
    inputs: Mutex<VecDeque<KeyInput>>,
    capacity: usize,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inputs: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Queue an input. When full the input is dropped.
    pub fn push(&self, input: KeyInput) -> bool {
        let mut inputs = self.inputs.lock().unwrap_or_else(PoisonError::into_inner);
        if inputs.len() >= self.capacity {
            log::warn!("keyboard queue full, dropping {input:?}");
            return false;
        }
        inputs.push_back(input);
        true
    }

    pub fn pop(&self) -> Option<KeyInput> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardQueue for KeyQueue {
    fn push_char(&self, c: char) {
        self.push(KeyInput::Char(c));
    }

    fn press_key(&self, location: KeyLocation, code: KeyCode) {
        self.push(KeyInput::Press(location, code));
    }

    fn release_key(&self, location: KeyLocation, code: KeyCode) {
        self.push(KeyInput::Release(location, code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let q = KeyQueue::new();
        q.push_char('x');
        q.press_key(KeyLocation::Standard, KeyCode::F1);
        assert_eq!(q.pop(), Some(KeyInput::Char('x')));
        assert_eq!(
            q.pop(),
            Some(KeyInput::Press(KeyLocation::Standard, KeyCode::F1))
        );
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn overflow_drops_newest() {
        let q = KeyQueue::with_capacity(2);
        assert!(q.push(KeyInput::Char('a')));
        assert!(q.push(KeyInput::Char('b')));
        assert!(!q.push(KeyInput::Char('c')));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(KeyInput::Char('a')));
        assert_eq!(q.pop(), Some(KeyInput::Char('b')));
        assert!(q.is_empty());
    }
}
