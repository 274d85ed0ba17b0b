//! Shared memory and device wiring for the emulated workstation.
//!
//! RAM is word addressed. The display occupies the last words of RAM at
//! one bit per pixel: rows run top to bottom, each row is padded to a whole
//! number of 32-bit words, and bit 31 of a word is its leftmost pixel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use oberon_core::cpu::AddressSpace;

use crate::error::{MachineError, Trap};
use crate::keyboard::KeyQueue;
use crate::mmio::Mmio;

/// 1 MiB of RAM.
pub const STANDARD_WORDS: usize = 0x4_0000;
/// 8 MiB of RAM.
pub const LARGE_WORDS: usize = 0x20_0000;

pub fn memory_words(address_space: AddressSpace) -> usize {
    match address_space {
        AddressSpace::Standard => STANDARD_WORDS,
        AddressSpace::Large => LARGE_WORDS,
    }
}

pub struct Board {
    ram: Box<[AtomicU32]>,
    mmio: Arc<Mmio>,
    keyboard: Arc<KeyQueue>,
    width: u32,
    height: u32,
    stride: usize,
    display_base: usize,
}

impl Board {
    pub fn new(
        address_space: AddressSpace,
        width: u32,
        height: u32,
        mmio: Arc<Mmio>,
        keyboard: Arc<KeyQueue>,
    ) -> Result<Self, MachineError> {
        Self::with_words(memory_words(address_space), width, height, mmio, keyboard)
    }

    /// Build a board with an explicit RAM size in words.
    pub fn with_words(
        words: usize,
        width: u32,
        height: u32,
        mmio: Arc<Mmio>,
        keyboard: Arc<KeyQueue>,
    ) -> Result<Self, MachineError> {
        let stride = (width as usize).div_ceil(32);
        let needed = stride * height as usize;
        if needed == 0 || needed > words {
            return Err(MachineError::DisplayTooLarge {
                width,
                height,
                needed,
                available: words,
            });
        }
        let ram = (0..words).map(|_| AtomicU32::new(0)).collect();
        Ok(Self {
            ram,
            mmio,
            keyboard,
            width,
            height,
            stride,
            display_base: words - needed,
        })
    }

    pub fn mmio(&self) -> &Mmio {
        &self.mmio
    }

    pub fn keyboard(&self) -> &KeyQueue {
        &self.keyboard
    }

    pub fn words(&self) -> usize {
        self.ram.len()
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn display_base(&self) -> usize {
        self.display_base
    }

    pub fn read_word(&self, index: usize) -> Result<u32, Trap> {
        self.ram
            .get(index)
            .map(|w| w.load(Ordering::Relaxed))
            .ok_or(Trap::BusFault(index))
    }

    pub fn write_word(&self, index: usize, value: u32) -> Result<(), Trap> {
        self.ram
            .get(index)
            .map(|w| w.store(value, Ordering::Relaxed))
            .ok_or(Trap::BusFault(index))
    }

    /// One display row as packed words.
    pub fn display_row(&self, y: u32) -> &[AtomicU32] {
        let start = self.display_base + y as usize * self.stride;
        &self.ram[start..start + self.stride]
    }

    /// Set or clear one display pixel. `y` counts rows from the top;
    /// out-of-range pixels are ignored.
    pub fn plot(&self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = &self.display_row(y)[x as usize / 32];
        let mask = 0x8000_0000u32 >> (x % 32);
        if on {
            word.fetch_or(mask, Ordering::Relaxed);
        } else {
            word.fetch_and(!mask, Ordering::Relaxed);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.display_row(y)[x as usize / 32].load(Ordering::Relaxed);
        word & (0x8000_0000u32 >> (x % 32)) != 0
    }

    pub fn clear_display(&self) {
        for word in &self.ram[self.display_base..] {
            word.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(words: usize, width: u32, height: u32) -> Result<Board, MachineError> {
        Board::with_words(
            words,
            width,
            height,
            Arc::new(Mmio::new()),
            Arc::new(KeyQueue::new()),
        )
    }

    #[test]
    fn display_sits_at_top_of_memory() {
        let b = board(1024, 64, 4).unwrap();
        assert_eq!(b.display_base(), 1024 - 2 * 4);
        b.plot(0, 0, true);
        assert_eq!(b.read_word(b.display_base()).unwrap(), 0x8000_0000);
        b.plot(63, 3, true);
        assert_eq!(b.read_word(1023).unwrap(), 1);
    }

    #[test]
    fn partial_words_pad_rows() {
        let b = board(64, 33, 2).unwrap();
        assert_eq!(b.display_base(), 64 - 4);
        b.plot(32, 1, true);
        assert!(b.pixel(32, 1));
        assert_eq!(b.read_word(63).unwrap(), 0x8000_0000);
    }

    #[test]
    fn rejects_display_larger_than_memory() {
        assert!(matches!(
            board(16, 1024, 768),
            Err(MachineError::DisplayTooLarge { needed: 24576, .. })
        ));
    }

    #[test]
    fn out_of_range_access_faults() {
        let b = board(16, 32, 1).unwrap();
        assert_eq!(b.read_word(16), Err(Trap::BusFault(16)));
        assert_eq!(b.write_word(99, 1), Err(Trap::BusFault(99)));
        b.plot(32, 0, true);
        assert!(!b.pixel(32, 0));
    }

    #[test]
    fn clear_only_touches_display() {
        let b = board(16, 32, 2).unwrap();
        b.write_word(0, 7).unwrap();
        b.plot(5, 1, true);
        b.clear_display();
        assert!(!b.pixel(5, 1));
        assert_eq!(b.read_word(0).unwrap(), 7);
    }

    #[test]
    fn standard_memory_fits_default_display() {
        let b = Board::new(
            AddressSpace::Standard,
            1024,
            768,
            Arc::new(Mmio::new()),
            Arc::new(KeyQueue::new()),
        )
        .unwrap();
        assert_eq!(b.words(), STANDARD_WORDS);
        assert_eq!(b.display_size(), (1024, 768));
    }
}
