//! Backend abstraction for NPU chip variants
//!
//! Every variant executes the same instruction semantics. What differs is
//! the chip geometry and the command-buffer conventions: which descriptors
//! raise an interrupt and how the end of a buffer is marked. A
//! [`ChipBackend`] owns both, so a test builds one [`CmdBuf`], lets the
//! backend finish it, and submits it.

use crate::backends::chips::{Bm1880v2Backend, Cv180xBackend, Cv181xBackend, Cv182xBackend, Cv183xBackend};
use crate::cmdbuf::{CmdBuf, Instruction, Output};
use crate::error::{DriverError, Result};
use npu_chip::{ChipInfo, ChipVariant};
use std::fmt::Debug;
use tracing::info;

/// One NPU device of a fixed variant.
pub trait ChipBackend: Debug + Send {
    /// Open device `index`.
    ///
    /// # Errors
    ///
    /// Returns error if no such device exists.
    fn open(index: usize) -> Result<Self>
    where
        Self: Sized;

    /// Variant of the device.
    fn variant(&self) -> ChipVariant;

    /// Lane, EU and memory geometry.
    fn info(&self) -> ChipInfo {
        self.variant().info()
    }

    /// Set interrupt bits the way this variant expects.
    fn enable_interrupt(&self, buf: &mut CmdBuf);

    /// Mark end-of-descriptors the way this variant expects.
    fn set_eod(&self, buf: &mut CmdBuf);

    /// Execute a finished buffer, one output per descriptor.
    ///
    /// # Errors
    ///
    /// Returns error if the buffer was not finished for this variant, an
    /// instruction is not supported, or an operand is malformed.
    fn submit(&mut self, buf: CmdBuf) -> Result<Vec<Output>>;

    /// Whether the device accepts submissions.
    fn is_ready(&self) -> bool;
}

/// Finish `buf` for `backend` and submit it.
///
/// # Errors
///
/// Propagates [`ChipBackend::submit`] errors.
pub fn run(backend: &mut dyn ChipBackend, mut buf: CmdBuf) -> Result<Vec<Output>> {
    backend.enable_interrupt(&mut buf);
    backend.set_eod(&mut buf);
    backend.submit(buf)
}

/// Run a single instruction and return its output.
///
/// # Errors
///
/// Propagates [`ChipBackend::submit`] errors.
pub fn run_one(backend: &mut dyn ChipBackend, instruction: Instruction) -> Result<Output> {
    run(backend, CmdBuf::single(instruction))?
        .pop()
        .ok_or_else(|| DriverError::invalid_state("submission returned no output"))
}

/// Open device `index` of `variant`.
///
/// # Errors
///
/// Returns error if the device cannot be opened.
pub fn select_backend(variant: ChipVariant, index: usize) -> Result<Box<dyn ChipBackend>> {
    info!("Opening {variant} device {index}");
    match variant {
        ChipVariant::Cv180x => Cv180xBackend::open(index).map(|b| Box::new(b) as Box<dyn ChipBackend>),
        ChipVariant::Cv181x => Cv181xBackend::open(index).map(|b| Box::new(b) as Box<dyn ChipBackend>),
        ChipVariant::Cv182x => Cv182xBackend::open(index).map(|b| Box::new(b) as Box<dyn ChipBackend>),
        ChipVariant::Cv183x => Cv183xBackend::open(index).map(|b| Box::new(b) as Box<dyn ChipBackend>),
        ChipVariant::Bm1880v2 => Bm1880v2Backend::open(index).map(|b| Box::new(b) as Box<dyn ChipBackend>),
    }
}
