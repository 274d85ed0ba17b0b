//! Demonstration engine that exercises every collaborator without an
//! instruction set.
//!
//! - Left button held: draw at the mouse position.
//! - Right button held: erase.
//! - Typed `c`: clear the screen.
//! - Typed `q`: halt (trap), so the halt overlay and reset can be tried.
//!
//! Each new stroke bumps a counter shown on the LEDs. The counter and pen
//! state are registers, so a warm reset after `q` keeps counting.

use oberon_core::control::event::MouseButton;
use oberon_core::cpu::AddressSpace;

use crate::board::Board;
use crate::error::Trap;
use crate::keyboard::KeyInput;
use crate::threaded::{Engine, Step};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SketchRegisters {
    pub pen_down: bool,
    /// Last plotted position in display coordinates (y from the top).
    pub last: Option<(u32, u32)>,
    pub strokes: u32,
}

pub struct Sketchpad;

impl Engine for Sketchpad {
    type Registers = SketchRegisters;

    fn new(_address_space: AddressSpace) -> Self {
        Self
    }

    fn step(&mut self, board: &Board, regs: &mut SketchRegisters) -> Result<Step, Trap> {
        if let Some(input) = board.keyboard().pop() {
            match input {
                KeyInput::Char('c') => board.clear_display(),
                KeyInput::Char('q') => return Err(Trap::Halt),
                _ => {}
            }
            return Ok(Step::Continue);
        }

        let mouse = board.mmio().mouse();
        let draw = mouse.is_down(MouseButton::LEFT);
        let erase = mouse.is_down(MouseButton::RIGHT);
        if !draw && !erase {
            regs.pen_down = false;
            regs.last = None;
            return Ok(Step::Idle);
        }

        if !regs.pen_down {
            regs.pen_down = true;
            regs.strokes = regs.strokes.wrapping_add(1);
            board.mmio().set_leds(regs.strokes as u8);
        }

        // Mouse coordinates have a bottom-left origin.
        let (_, height) = board.display_size();
        let pos = (mouse.x, height.saturating_sub(1).saturating_sub(mouse.y));
        if regs.last == Some(pos) {
            return Ok(Step::Idle);
        }
        board.plot(pos.0, pos.1, draw);
        regs.last = Some(pos);
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use oberon_core::device::{IoDevice, KeyboardQueue};

    use super::*;
    use crate::keyboard::KeyQueue;
    use crate::mmio::Mmio;

    fn board() -> Board {
        Board::with_words(
            1024,
            64,
            32,
            Arc::new(Mmio::new()),
            Arc::new(KeyQueue::new()),
        )
        .unwrap()
    }

    #[test]
    fn host_pointer_stays_visible() {
        // Strokes are drawn, the pointer is not.
        assert!(!Sketchpad::DRAWS_POINTER);
    }

    #[test]
    fn idle_without_buttons() {
        let b = board();
        let mut regs = SketchRegisters::default();
        assert_eq!(Sketchpad.step(&b, &mut regs), Ok(Step::Idle));
        assert_eq!(regs, SketchRegisters::default());
    }

    #[test]
    fn draws_with_flipped_y_and_counts_strokes() {
        let b = board();
        let mut regs = SketchRegisters::default();
        b.mmio().set_mouse_position(3, 31);
        b.mmio().set_mouse_button(MouseButton::LEFT, true);

        assert_eq!(Sketchpad.step(&b, &mut regs), Ok(Step::Continue));
        assert!(b.pixel(3, 0));
        assert_eq!(regs.strokes, 1);
        assert_eq!(b.mmio().leds(), 1);

        // Same position again: nothing new to draw.
        assert_eq!(Sketchpad.step(&b, &mut regs), Ok(Step::Idle));

        b.mmio().set_mouse_button(MouseButton::LEFT, false);
        Sketchpad.step(&b, &mut regs).unwrap();
        b.mmio().set_mouse_button(MouseButton::LEFT, true);
        b.mmio().set_mouse_position(4, 31);
        Sketchpad.step(&b, &mut regs).unwrap();
        assert_eq!(regs.strokes, 2);
    }

    #[test]
    fn right_button_erases() {
        let b = board();
        b.plot(10, 21, true);
        let mut regs = SketchRegisters::default();
        b.mmio().set_mouse_position(10, 10);
        b.mmio().set_mouse_button(MouseButton::RIGHT, true);
        Sketchpad.step(&b, &mut regs).unwrap();
        assert!(!b.pixel(10, 21));
    }

    #[test]
    fn keyboard_commands() {
        let b = board();
        let mut regs = SketchRegisters::default();
        b.plot(0, 0, true);
        b.keyboard().push_char('c');
        b.keyboard().push_char('q');
        assert_eq!(Sketchpad.step(&b, &mut regs), Ok(Step::Continue));
        assert!(!b.pixel(0, 0));
        assert_eq!(Sketchpad.step(&b, &mut regs), Err(Trap::Halt));
    }
}
