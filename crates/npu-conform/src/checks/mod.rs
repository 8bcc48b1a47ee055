// SPDX-License-Identifier: AGPL-3.0-only

//! Check families
//!
//! | Family | Checks |
//! |--------|--------|
//! | [`quant`] | mul_qm, depthwise, avg_pool, ge, min_const, bf16 add |
//! | [`tdma`] | copies, fills, transposes, strided writes |
//! | [`vlc`] | codec round trip in hardware and compiler bias modes |
//! | [`lut`] | arctangent modes, reciprocal special values |
//!
//! Every check runs its operands on the device and compares the result with
//! a recorded device vector, a host model from the `oracle` module, or a
//! floating-point bound. Only operand generation and quant-parameter search
//! come from `npu_ref`.

pub mod lut;
pub mod quant;
pub mod tdma;
pub mod vlc;

use crate::suite::{compare, CheckResult, Suite};
use npu_driver::{ChipBackend, Output, SuiteConfig};
use npu_ref::bf16::bf16;
use rand::rngs::StdRng;
use std::fmt;

/// Run every family against `dev`, drawing all data from `rng`.
pub fn run_all(suite: &mut Suite, dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) {
    quant::register(suite, dev, cfg, rng);
    tdma::register(suite, dev, cfg, rng);
    vlc::register(suite, dev, cfg, rng);
    lut::register(suite, dev, cfg);
}

/// A bf16 word shown in hex.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Word(u16);

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

fn words(v: &[bf16]) -> Vec<Word> {
    v.iter().map(|x| Word(x.to_bits())).collect()
}

/// Compare a device output against the reference, bit for bit.
pub fn expect(what: &str, got: &Output, expected: &Output) -> CheckResult {
    match (got, expected) {
        (Output::I8(g), Output::I8(e)) => compare(what, g, e),
        (Output::U8(g), Output::U8(e)) => compare(what, g, e),
        (Output::Bf16(g), Output::Bf16(e)) => compare(what, &words(g), &words(e)),
        (Output::Stream(g), Output::Stream(e)) => compare(what, &g[..], &e[..]),
        _ => CheckResult::fail(format!("{what}: output kind differs from the reference")),
    }
}

/// A skip result when `cfg`'s variant has no bf16 unit.
fn bf16_unit(cfg: &SuiteConfig) -> Option<CheckResult> {
    (!cfg.variant.supports_bf16()).then(|| CheckResult::skip(format!("{} has no bf16 unit", cfg.variant)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::Outcome;
    use npu_chip::ChipVariant;
    use npu_driver::CmdBuf;
    use rand::SeedableRng;

    #[test]
    fn bf16_mismatch_shown_as_words() {
        let r = expect("atan", &Output::Bf16(vec![bf16::ONE]), &Output::Bf16(vec![bf16::ZERO]));
        assert_eq!(r.message, "atan: index 0: got 0x3f80, expected 0x0000");
    }

    #[test]
    fn kind_mismatch_fails() {
        let r = expect("x", &Output::U8(vec![1]), &Output::I8(vec![1]));
        assert_eq!(r.outcome, Outcome::Fail);
    }

    /// Backend that runs `inner` but corrupts every result it returns.
    #[derive(Debug)]
    struct Corrupting {
        inner: Box<dyn ChipBackend>,
    }

    impl ChipBackend for Corrupting {
        fn open(_index: usize) -> npu_driver::Result<Self> {
            Err(npu_driver::DriverError::invalid_state("wraps an open device"))
        }

        fn variant(&self) -> ChipVariant {
            self.inner.variant()
        }

        fn enable_interrupt(&self, buf: &mut CmdBuf) {
            self.inner.enable_interrupt(buf);
        }

        fn set_eod(&self, buf: &mut CmdBuf) {
            self.inner.set_eod(buf);
        }

        fn submit(&mut self, buf: CmdBuf) -> npu_driver::Result<Vec<Output>> {
            let mut out = self.inner.submit(buf)?;
            for o in &mut out {
                match o {
                    Output::I8(v) => {
                        if let Some(x) = v.last_mut() {
                            *x ^= 1;
                        }
                    }
                    Output::U8(v) => {
                        if let Some(x) = v.last_mut() {
                            *x ^= 1;
                        }
                    }
                    Output::Bf16(v) => {
                        if let Some(x) = v.last_mut() {
                            *x = bf16::from_bits(x.to_bits() ^ 0x4000);
                        }
                    }
                    Output::Stream(s) => {
                        let mut bytes = s.to_vec();
                        if let Some(bias0) = bytes.get_mut(1) {
                            *bias0 ^= 1;
                        }
                        *s = bytes.into();
                    }
                }
            }
            Ok(out)
        }

        fn is_ready(&self) -> bool {
            self.inner.is_ready()
        }
    }

    #[test]
    fn corrupted_results_fail_every_check() {
        let cfg = SuiteConfig::new(ChipVariant::Cv182x);
        let inner = npu_driver::select_backend(cfg.variant, 0).unwrap();
        let mut dev = Corrupting { inner };
        let mut rng = StdRng::seed_from_u64(21);
        let mut suite = Suite::quiet();
        quant::register(&mut suite, &mut dev, &cfg, &mut rng);
        tdma::register(&mut suite, &mut dev, &cfg, &mut rng);
        vlc::register(&mut suite, &mut dev, &cfg, &mut rng);
        let report = suite.report();
        assert_eq!(report.passed, 0, "{report}");
        assert!(report.failed > 0);
    }

    #[test]
    fn bf16_checks_skip_without_unit() {
        assert!(bf16_unit(&SuiteConfig::new(ChipVariant::Cv183x)).is_some());
        assert!(bf16_unit(&SuiteConfig::new(ChipVariant::Cv181x)).is_none());
    }
}
