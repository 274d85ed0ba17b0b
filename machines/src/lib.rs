//! Reference collaborators for the control surface: shared memory, the
//! I/O page, the keyboard queue, the display observer and a threaded
//! processor host.

pub mod board;
pub mod error;
pub mod keyboard;
pub mod mmio;
pub mod sketchpad;
pub mod threaded;
pub mod video;

pub use board::Board;
pub use error::{MachineError, Trap};
pub use keyboard::{KeyInput, KeyQueue};
pub use mmio::{MouseState, Mmio};
pub use sketchpad::Sketchpad;
pub use threaded::{Engine, Step, ThreadedProcessor};
pub use video::VideoObserver;
