//! A [`Processor`] that runs an [`Engine`] on its own OS thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use oberon_core::cpu::{AddressSpace, Processor};

use crate::board::Board;
use crate::error::Trap;

/// Steps executed per register-lock acquisition.
pub const SLICE_STEPS: usize = 1024;
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Outcome of a single successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Nothing to do; the thread may sleep briefly before the next slice.
    Idle,
}

/// Execution engine driven by [`ThreadedProcessor`].
pub trait Engine: Send + 'static {
    type Registers: Clone + Default + Send + 'static;

    /// Whether the engine draws its own mouse pointer into the display,
    /// in which case the host pointer should be hidden over the window.
    const DRAWS_POINTER: bool = false;

    fn new(address_space: AddressSpace) -> Self;

    fn step(&mut self, board: &Board, registers: &mut Self::Registers) -> Result<Step, Trap>;
}

struct Shared<R> {
    running: AtomicBool,
    stop: AtomicBool,
    registers: Mutex<R>,
}

pub struct ThreadedProcessor<E: Engine> {
    board: Arc<Board>,
    shared: Arc<Shared<E::Registers>>,
    /// Moved onto the thread by `start`.
    engine: Mutex<Option<E>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl<E: Engine> ThreadedProcessor<E> {
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// A copy of the current registers. Blocks for at most one slice.
    pub fn registers(&self) -> E::Registers {
        lock(&self.shared.registers).clone()
    }

    pub fn set_registers(&self, registers: E::Registers) {
        *lock(&self.shared.registers) = registers;
    }

    /// Wait for the execution thread to exit. Returns immediately if it
    /// was never started or has already been joined.
    pub fn join(&self) {
        let handle = lock(&self.thread).take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            log::error!("processor thread panicked");
        }
    }
}

impl<E: Engine> Processor for ThreadedProcessor<E> {
    type Memory = Board;

    fn new(board: Arc<Board>, address_space: AddressSpace) -> Self {
        Self {
            board,
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                stop: AtomicBool::new(false),
                registers: Mutex::new(E::Registers::default()),
            }),
            engine: Mutex::new(Some(E::new(address_space))),
            thread: Mutex::new(None),
        }
    }

    fn start(&self) {
        let Some(engine) = lock(&self.engine).take() else {
            log::warn!("processor already started");
            return;
        };
        let board = Arc::clone(&self.board);
        let shared = Arc::clone(&self.shared);
        self.shared.running.store(true, Ordering::Release);

        let spawned = thread::Builder::new()
            .name("oberon-cpu".into())
            .spawn(move || run(engine, &board, &shared));
        match spawned {
            Ok(handle) => *lock(&self.thread) = Some(handle),
            Err(e) => {
                log::error!("failed to spawn processor thread: {e}");
                self.shared.running.store(false, Ordering::Release);
            }
        }
    }

    fn stop(&self) {
        self.shared.stop.store(true, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    fn copy_registers_from(&self, other: &Self) {
        other.join();
        self.set_registers(other.registers());
    }
}

impl<E: Engine> Drop for ThreadedProcessor<E> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clears the running flag when the execution thread exits, including by
/// unwinding out of a panicking engine.
struct RunningFlag<'a>(&'a AtomicBool);

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            log::error!("processor thread panicked; reporting halted");
        }
        self.0.store(false, Ordering::Release);
    }
}

fn run<E: Engine>(mut engine: E, board: &Board, shared: &Shared<E::Registers>) {
    let _running = RunningFlag(&shared.running);
    loop {
        if shared.stop.load(Ordering::Acquire) {
            log::debug!("processor stopped");
            break;
        }
        let outcome = {
            let mut registers = lock(&shared.registers);
            run_slice(&mut engine, board, &mut registers)
        };
        match outcome {
            Ok(Step::Continue) => {}
            Ok(Step::Idle) => thread::sleep(IDLE_SLEEP),
            Err(trap) => {
                log::warn!("processor halted: {trap}");
                break;
            }
        }
    }
}

fn run_slice<E: Engine>(
    engine: &mut E,
    board: &Board,
    registers: &mut E::Registers,
) -> Result<Step, Trap> {
    for _ in 0..SLICE_STEPS {
        if engine.step(board, registers)? == Step::Idle {
            return Ok(Step::Idle);
        }
    }
    Ok(Step::Continue)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
