pub mod control;
pub mod cpu;
pub mod device;
pub mod error;

pub use error::Error;

pub mod prelude {
    pub use crate::control::event::{
        EventReceiver, EventSender, HostEvent, KeyCode, KeyEvent, KeyLocation, Modifiers,
        MouseButton, event_queue,
    };
    pub use crate::control::input::{InputTranslator, RemapRule, RemapTable};
    pub use crate::control::lifecycle::{LifecycleController, LivenessProbe, ResetKind};
    pub use crate::control::render::{RenderLoop, Surface, Tint};
    pub use crate::cpu::{AddressSpace, Liveness, Processor};
    pub use crate::device::{Framebuffer, IoDevice, KeyboardQueue};
}
