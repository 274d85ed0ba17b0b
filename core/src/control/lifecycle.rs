//! Processor run/halt/reset lifecycle.
//!
//! The controller owns the single active [`Processor`] instance. Resets
//! replace it with a fresh instance on the same memory; a warm reset of a
//! processor that already halted carries its registers over so the crashed
//! program's context can be resumed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::cpu::{AddressSpace, Liveness, Processor};

/// How a reset treats the outgoing instance's registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetKind {
    /// Discard registers unconditionally (reset key pressed with shift).
    Cold,
    /// Copy registers if the outgoing instance had already halted.
    Warm,
}

/// What a reset did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetReport {
    pub kind: ResetKind,
    /// Liveness of the outgoing instance when the reset was triggered.
    pub previous: Liveness,
    pub registers_copied: bool,
    /// Generation of the newly installed instance.
    pub generation: u64,
}

/// Holds the active instance. Readers clone the `Arc` under the read lock,
/// so a reset can never expose a half-installed instance.
struct ProcessorSlot<P> {
    active: RwLock<Arc<P>>,
    generation: AtomicU64,
}

impl<P: Processor> ProcessorSlot<P> {
    fn new(processor: P) -> Self {
        Self {
            active: RwLock::new(Arc::new(processor)),
            generation: AtomicU64::new(0),
        }
    }

    fn current(&self) -> Arc<P> {
        let active = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*active)
    }

    /// Install `next` as active and return the outgoing instance along with
    /// the new generation number.
    fn install(&self, next: Arc<P>) -> (Arc<P>, u64) {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *active, next);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        (previous, generation)
    }
}

/// Type-erased view of the active instance, for contexts that only poll.
trait ActiveInstance: Send + Sync {
    fn is_alive(&self) -> bool;
    fn generation(&self) -> u64;
}

impl<P: Processor> ActiveInstance for ProcessorSlot<P> {
    fn is_alive(&self) -> bool {
        self.current().is_running()
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

/// Read-only liveness handle onto whichever instance is currently active.
#[derive(Clone)]
pub struct LivenessProbe {
    slot: Arc<dyn ActiveInstance>,
}

impl LivenessProbe {
    pub fn is_alive(&self) -> bool {
        self.slot.is_alive()
    }

    pub fn liveness(&self) -> Liveness {
        Liveness::from_running(self.is_alive())
    }

    pub fn generation(&self) -> u64 {
        self.slot.generation()
    }
}

pub struct LifecycleController<P: Processor> {
    slot: Arc<ProcessorSlot<P>>,
    memory: Arc<P::Memory>,
    address_space: AddressSpace,
}

impl<P: Processor> LifecycleController<P> {
    /// Construct the first instance on `memory`. It is not started until
    /// [`start`](Self::start) is called.
    pub fn new(memory: Arc<P::Memory>, address_space: AddressSpace) -> Self {
        let processor = P::new(Arc::clone(&memory), address_space);
        Self {
            slot: Arc::new(ProcessorSlot::new(processor)),
            memory,
            address_space,
        }
    }

    pub fn start(&self) {
        log::debug!("starting processor generation {}", self.generation());
        self.slot.current().start();
    }

    /// Replace the active instance and start the replacement.
    ///
    /// Liveness is sampled once, here. An instance that is still running is
    /// told to stop and its registers are never copied. An instance that had
    /// already halted donates its registers on a warm reset.
    pub fn reset(&mut self, kind: ResetKind) -> ResetReport {
        let outgoing = self.slot.current();
        let previous = outgoing.liveness();
        if previous == Liveness::Running {
            outgoing.stop();
        }

        let next = Arc::new(P::new(Arc::clone(&self.memory), self.address_space));
        let registers_copied = kind == ResetKind::Warm && previous == Liveness::Halted;
        if registers_copied {
            next.copy_registers_from(&outgoing);
        }

        let (_, generation) = self.slot.install(Arc::clone(&next));
        next.start();

        let report = ResetReport {
            kind,
            previous,
            registers_copied,
            generation,
        };
        log::info!(
            "{:?} reset: previous instance {:?}, registers {}, now generation {}",
            report.kind,
            report.previous,
            if registers_copied { "copied" } else { "discarded" },
            generation
        );
        report
    }

    pub fn is_alive(&self) -> bool {
        self.slot.current().is_running()
    }

    pub fn probe(&self) -> LivenessProbe {
        LivenessProbe {
            slot: self.slot.clone(),
        }
    }

    /// Number of resets performed so far.
    pub fn generation(&self) -> u64 {
        self.slot.generation.load(Ordering::Acquire)
    }

    /// The active instance.
    pub fn active(&self) -> Arc<P> {
        self.slot.current()
    }

    pub fn address_space(&self) -> AddressSpace {
        self.address_space
    }

    /// Stop the active instance. Also done on drop.
    pub fn shutdown(&self) {
        let active = self.slot.current();
        if active.is_running() {
            log::info!("stopping processor generation {}", self.generation());
        }
        active.stop();
    }
}

impl<P: Processor> Drop for LifecycleController<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
