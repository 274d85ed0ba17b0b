//! The control surface: lifecycle, input translation and rendering.

pub mod event;
pub mod input;
pub mod lifecycle;
pub mod render;

pub use event::{EventReceiver, EventSender, HostEvent, event_queue};
pub use input::{InputTranslator, RemapRule, RemapTable};
pub use lifecycle::{LifecycleController, LivenessProbe, ResetKind, ResetReport};
pub use render::{PaintReport, RenderLoop, Surface, Tint};
