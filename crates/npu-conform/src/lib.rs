// SPDX-License-Identifier: AGPL-3.0-only

//! Conformance runner for the NPU reference layer.
//!
//! A run opens one device, draws every operand from a single seeded RNG,
//! and checks each operator family against recorded device vectors and
//! host models written apart from `npu_ref`'s kernels:
//!
//! ```text
//! SuiteConfig ──> select_backend(variant, 0) ──> checks::run_all ──> Report
//!                                                  quant / tdma / vlc / lut
//! ```
//!
//! A check that cannot find usable data within the retry budget, or that
//! needs a unit the variant lacks, is skipped rather than failed.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod args;
pub mod checks;
mod oracle;
mod suite;

pub use args::RunArgs;
pub use suite::{compare, CheckResult, Outcome, Report, Suite};

use anyhow::{Context, Result};
use npu_driver::{select_backend, SuiteConfig};
use tracing::info;

/// Run every check family on device 0 of `cfg.variant`.
///
/// `suite` decides whether progress is printed; the returned report holds
/// the totals.
///
/// # Errors
///
/// Returns error if the settings are invalid or the device cannot be
/// opened. Failing checks are counted, not returned as errors.
pub fn run_suite(cfg: &SuiteConfig, mut suite: Suite) -> Result<Report> {
    cfg.validate().context("invalid conformance settings")?;
    let mut dev = select_backend(cfg.variant, 0).with_context(|| format!("opening {}", cfg.variant))?;
    info!(variant = %cfg.variant, seed = cfg.seed, "conformance run");
    let mut rng = cfg.rng();
    checks::run_all(&mut suite, dev.as_mut(), cfg, &mut rng);
    Ok(suite.finish())
}
