pub mod framebuffer;
pub mod io;
pub mod keyboard;

pub use framebuffer::Framebuffer;
pub use io::IoDevice;
pub use keyboard::KeyboardQueue;
