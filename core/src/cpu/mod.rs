//! Processor lifecycle interface.
//!
//! The instruction engine itself lives outside this crate. The control
//! surface only needs to construct instances, start and stop them, poll
//! their liveness, and move register state from one instance to another.

use std::sync::Arc;

/// Address-space size selected at construction and carried across resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressSpace {
    #[default]
    Standard,
    Large,
}

impl AddressSpace {
    pub fn from_large_flag(large: bool) -> Self {
        if large { Self::Large } else { Self::Standard }
    }

    pub fn is_large(self) -> bool {
        self == Self::Large
    }
}

/// Whether a processor instance is still executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liveness {
    Running,
    Halted,
}

impl Liveness {
    pub fn from_running(running: bool) -> Self {
        if running { Self::Running } else { Self::Halted }
    }
}

/// An independently scheduled processor bound to shared memory.
///
/// All operations take `&self`: an instance is shared between the
/// lifecycle controller and whichever context polls its liveness, so
/// implementations keep their thread handle and registers behind
/// interior mutability.
pub trait Processor: Send + Sync + 'static {
    /// Address space visible to the processor. Owned outside the
    /// controller and shared unchanged across resets.
    type Memory: Send + Sync + 'static;

    /// Construct a new, not yet started instance.
    fn new(memory: Arc<Self::Memory>, address_space: AddressSpace) -> Self
    where
        Self: Sized;

    /// Begin execution on the processor's own schedule.
    fn start(&self);

    /// Signal execution to stop. Does not wait for acknowledgment.
    fn stop(&self);

    /// `false` once the instance has halted, trapped or been stopped.
    fn is_running(&self) -> bool;

    /// Overwrite this instance's registers with a snapshot of `other`'s.
    ///
    /// Only called with an `other` that has already halted.
    fn copy_registers_from(&self, other: &Self);

    fn liveness(&self) -> Liveness {
        Liveness::from_running(self.is_running())
    }
}
