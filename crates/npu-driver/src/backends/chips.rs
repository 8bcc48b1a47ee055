//! One backend per chip variant
//!
//! The variants fall into two command-buffer families:
//!
//! ```text
//! per-engine (180x, 181x, 182x):
//!   TIU and TDMA descriptors form separate streams; the last descriptor
//!   of each stream carries EOD and raises the interrupt.
//!
//! single-stream (183x, 1880v2):
//!   one stream; only the final descriptor carries EOD and the interrupt.
//! ```
//!
//! A variant is a zero-sized [`Strategy`]; [`CModelBackend`] pairs it with
//! the shared [`CModel`] executor.

use super::cmodel::CModel;
use crate::backend::ChipBackend;
use crate::cmdbuf::{CmdBuf, Descriptor, Engine, Output};
use crate::error::{DriverError, Result};
use npu_chip::ChipVariant;
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::debug;

const ENGINES: [Engine; 2] = [Engine::Tiu, Engine::Tdma];

/// How a variant splits a buffer into descriptor streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamLayout {
    /// One stream per engine; each stream ends on its own.
    PerEngine,
    /// One stream ending at the final descriptor.
    Single,
}

/// Command-buffer conventions of one variant.
pub trait Strategy: Debug + Send + 'static {
    /// Variant this strategy drives.
    const VARIANT: ChipVariant;
    /// Stream layout of the variant.
    const LAYOUT: StreamLayout;

    /// Set the interrupt bits.
    fn enable_interrupt(buf: &mut CmdBuf) {
        mark(buf, Self::LAYOUT, |d| d.interrupt = true);
    }

    /// Set the EOD bits.
    fn set_eod(buf: &mut CmdBuf) {
        mark(buf, Self::LAYOUT, |d| d.eod = true);
    }

    /// Whether EOD and interrupt bits are where this variant needs them.
    fn is_finished(buf: &CmdBuf) -> bool {
        let done = |d: Option<&Descriptor>| d.map_or(true, |d| d.eod && d.interrupt);
        match Self::LAYOUT {
            StreamLayout::PerEngine => ENGINES.iter().all(|&engine| {
                done(buf.descriptors().iter().rev().find(|d| d.instruction.engine() == engine))
            }),
            StreamLayout::Single => done(buf.descriptors().last()),
        }
    }
}

fn mark(buf: &mut CmdBuf, layout: StreamLayout, set: fn(&mut Descriptor)) {
    match layout {
        StreamLayout::PerEngine => {
            for engine in ENGINES {
                if let Some(d) = buf.last_on_mut(engine) {
                    set(d);
                }
            }
        }
        StreamLayout::Single => {
            if let Some(d) = buf.descriptors_mut().last_mut() {
                set(d);
            }
        }
    }
}

/// 180x conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cv180x;

impl Strategy for Cv180x {
    const VARIANT: ChipVariant = ChipVariant::Cv180x;
    const LAYOUT: StreamLayout = StreamLayout::PerEngine;
}

/// 181x conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cv181x;

impl Strategy for Cv181x {
    const VARIANT: ChipVariant = ChipVariant::Cv181x;
    const LAYOUT: StreamLayout = StreamLayout::PerEngine;
}

/// 182x / 1822 conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cv182x;

impl Strategy for Cv182x {
    const VARIANT: ChipVariant = ChipVariant::Cv182x;
    const LAYOUT: StreamLayout = StreamLayout::PerEngine;
}

/// 183x conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cv183x;

impl Strategy for Cv183x {
    const VARIANT: ChipVariant = ChipVariant::Cv183x;
    const LAYOUT: StreamLayout = StreamLayout::Single;
}

/// 1880v2 conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bm1880v2;

impl Strategy for Bm1880v2 {
    const VARIANT: ChipVariant = ChipVariant::Bm1880v2;
    const LAYOUT: StreamLayout = StreamLayout::Single;
}

/// 180x device.
pub type Cv180xBackend = CModelBackend<Cv180x>;
/// 181x device.
pub type Cv181xBackend = CModelBackend<Cv181x>;
/// 182x device.
pub type Cv182xBackend = CModelBackend<Cv182x>;
/// 183x device.
pub type Cv183xBackend = CModelBackend<Cv183x>;
/// 1880v2 device.
pub type Bm1880v2Backend = CModelBackend<Bm1880v2>;

/// A variant strategy over the shared cmodel.
#[derive(Debug)]
pub struct CModelBackend<S: Strategy> {
    cmodel: CModel,
    index: usize,
    strategy: PhantomData<S>,
}

impl<S: Strategy> CModelBackend<S> {
    /// Device index this backend was opened with.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The executor, for its counters.
    pub const fn cmodel(&self) -> &CModel {
        &self.cmodel
    }
}

impl<S: Strategy> ChipBackend for CModelBackend<S> {
    fn open(index: usize) -> Result<Self> {
        // one simulated device per variant
        if index != 0 {
            return Err(DriverError::DeviceNotFound { index });
        }
        debug!("CModel backend open: {} device {index}", S::VARIANT);
        Ok(Self { cmodel: CModel::new(S::VARIANT), index, strategy: PhantomData })
    }

    fn variant(&self) -> ChipVariant {
        S::VARIANT
    }

    fn enable_interrupt(&self, buf: &mut CmdBuf) {
        S::enable_interrupt(buf);
    }

    fn set_eod(&self, buf: &mut CmdBuf) {
        S::set_eod(buf);
    }

    fn submit(&mut self, buf: CmdBuf) -> Result<Vec<Output>> {
        if !S::is_finished(&buf) {
            return Err(DriverError::invalid_state(format!(
                "{} command buffer submitted without EOD/interrupt marks",
                S::VARIANT
            )));
        }
        if !S::VARIANT.supports_bf16() {
            if let Some(d) = buf.descriptors().iter().find(|d| d.instruction.needs_bf16()) {
                return Err(DriverError::Unsupported { variant: S::VARIANT, instruction: d.instruction.name() });
            }
        }
        self.cmodel.run(buf.into_descriptors())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmdbuf::{Instruction, TdmaOp};
    use bytes::Bytes;
    use npu_chip::{Fmt, TensorShape};
    use npu_ref::bf16::bf16;

    fn ge() -> Instruction {
        Instruction::Ge { a: vec![3], b: vec![1], fmt: Fmt::U8 }
    }

    fn fill() -> Instruction {
        Instruction::Tdma { src: Bytes::new(), op: TdmaOp::Fill { shape: TensorShape::new(1, 1, 1, 2), value: 9 } }
    }

    fn mixed() -> CmdBuf {
        let mut buf = CmdBuf::new();
        buf.push(ge()).push(fill()).push(ge()).push(fill()).push(ge());
        buf
    }

    fn marks(buf: &CmdBuf) -> Vec<(bool, bool)> {
        buf.descriptors().iter().map(|d| (d.interrupt, d.eod)).collect()
    }

    #[test]
    fn per_engine_marks_last_of_each_stream() {
        let mut buf = mixed();
        Cv182x::enable_interrupt(&mut buf);
        Cv182x::set_eod(&mut buf);
        let n = (false, false);
        let y = (true, true);
        assert_eq!(marks(&buf), [n, n, n, y, y]);
        assert!(Cv182x::is_finished(&buf));
    }

    #[test]
    fn single_stream_marks_final_only() {
        let mut buf = mixed();
        Bm1880v2::enable_interrupt(&mut buf);
        Bm1880v2::set_eod(&mut buf);
        let n = (false, false);
        assert_eq!(marks(&buf), [n, n, n, n, (true, true)]);
        assert!(Bm1880v2::is_finished(&buf));
        // a single-stream buffer lacks the TDMA stream's EOD
        assert!(!Cv180x::is_finished(&buf));
    }

    #[test]
    fn unfinished_buffer_rejected() {
        let mut dev = Cv181xBackend::open(0).unwrap();
        assert!(matches!(dev.submit(mixed()), Err(DriverError::InvalidState { .. })));
        let mut buf = mixed();
        dev.set_eod(&mut buf);
        assert!(dev.submit(buf).is_err());
    }

    #[test]
    fn finished_buffer_runs_in_order() {
        let mut dev = Cv180xBackend::open(0).unwrap();
        let mut buf = mixed();
        dev.enable_interrupt(&mut buf);
        dev.set_eod(&mut buf);
        let out = dev.submit(buf).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[1], Output::U8(vec![9, 9]));
        assert_eq!(out[4], Output::U8(vec![1]));
        assert_eq!(dev.cmodel().executed(), 5);
        assert_eq!(dev.cmodel().interrupts(), 2);
    }

    #[test]
    fn only_device_zero_exists() {
        assert!(matches!(Cv183xBackend::open(1), Err(DriverError::DeviceNotFound { index: 1 })));
        assert_eq!(Bm1880v2Backend::open(0).unwrap().index(), 0);
    }

    #[test]
    fn bf16_rejected_without_bf16_unit() {
        let mut dev = Cv183xBackend::open(0).unwrap();
        let mut buf = CmdBuf::single(Instruction::Bf16AddConst { a: vec![bf16::ONE], b: bf16::ONE, relu: false });
        dev.enable_interrupt(&mut buf);
        dev.set_eod(&mut buf);
        assert!(matches!(dev.submit(buf), Err(DriverError::Unsupported { instruction: "bf16_add_const", .. })));
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut dev = Cv180xBackend::open(0).unwrap();
        assert!(dev.submit(CmdBuf::new()).unwrap().is_empty());
    }
}
