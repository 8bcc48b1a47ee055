//! Device adapter layer for NPU conformance testing.
//!
//! Tests describe work as a [`CmdBuf`] of typed [`Instruction`]s and hand it
//! to a [`ChipBackend`]. The backend finishes the buffer the way its chip
//! variant expects (interrupt and end-of-descriptor bits), executes it and
//! returns one [`Output`] per instruction.
//!
//! # Backend hierarchy
//!
//! ```text
//! select_backend(variant, index)
//!   CModelBackend<Cv180x | Cv181x | Cv182x>   per-engine EOD
//!   CModelBackend<Cv183x | Bm1880v2>          single-stream EOD
//!        │
//!        └── CModel  (npu-ref numerics, lookup tables per lane count)
//! ```
//!
//! # Quick start
//!
//! ```
//! use npu_chip::{ChipVariant, Fmt};
//! use npu_driver::{run_one, select_backend, Instruction, Output};
//!
//! # fn main() -> Result<(), npu_driver::DriverError> {
//! let mut dev = select_backend(ChipVariant::Cv182x, 0)?;
//! let out = run_one(dev.as_mut(), Instruction::Ge { a: vec![1, 5], b: vec![3, 3], fmt: Fmt::U8 })?;
//! assert_eq!(out, Output::U8(vec![0, 1]));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

mod backend;
pub mod backends;
mod cmdbuf;
mod config;
mod error;

pub use backend::{run, run_one, select_backend, ChipBackend};
pub use cmdbuf::{CmdBuf, Descriptor, Engine, Instruction, Output, TdmaOp};
pub use config::SuiteConfig;
pub use error::{DriverError, Result};
