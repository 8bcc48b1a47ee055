// SPDX-License-Identifier: AGPL-3.0-only

//! Lookup-table checks: arctangent in each test mode, reciprocal at its
//! special values and across the normal range.

use super::{bf16_unit, expect};
use crate::suite::{CheckResult, Suite};
use anyhow::Result;
use npu_chip::TensorShape;
use npu_driver::{run_one, ChipBackend, Instruction, Output, SuiteConfig};
use npu_ref::bf16::bf16;
use npu_ref::{AtanTestMode, Tensor};

/// Register the lookup-table checks.
pub fn register(suite: &mut Suite, dev: &mut dyn ChipBackend, cfg: &SuiteConfig) {
    for mode in cfg.atan_modes() {
        suite.run(&format!("atan: {mode} mode"), || atan(dev, cfg, mode));
    }
    suite.run("reciprocal: zero, infinity, powers of two", || reciprocal_specials(dev, cfg));
    suite.run("reciprocal: normal range error", || reciprocal_sweep(dev, cfg));
}

fn atan(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, mode: AtanTestMode) -> Result<CheckResult> {
    if let Some(skip) = bf16_unit(cfg) {
        return Ok(skip);
    }
    let shape = mode.shape(cfg.variant.npu_num());
    let inputs = mode.inputs(shape, cfg.atan_range)?;
    let want = mode.expected(&inputs);
    let out = run_one(dev, Instruction::Atan { input: Tensor::new(shape, inputs.clone())? })?;
    let Some(got) = out.as_bf16() else {
        return Ok(CheckResult::fail("atan returned non-bf16 output"));
    };
    if got.len() != want.len() {
        return Ok(CheckResult::fail(format!("{} outputs for {} inputs", got.len(), want.len())));
    }
    if let Some(i) = got.iter().zip(&want).position(|(&g, &w)| !mode.accepts(g, w, cfg.atan_epsilon)) {
        return Ok(CheckResult::fail(format!(
            "x = {} ({:#06x}): got {}, expected {}",
            inputs[i],
            inputs[i].to_bits(),
            got[i],
            want[i]
        )));
    }
    Ok(CheckResult::pass(match mode {
        AtanTestMode::PreDataCompareFix => format!("{} elements bit-exact", got.len()),
        _ => format!("{} elements within {}", got.len(), cfg.atan_epsilon),
    }))
}

fn reciprocal_specials(dev: &mut dyn ChipBackend, cfg: &SuiteConfig) -> Result<CheckResult> {
    if let Some(skip) = bf16_unit(cfg) {
        return Ok(skip);
    }
    let cases: [(f32, f32); 8] = [
        (0.0, bf16::MAX.to_f32()),
        (-0.0, -bf16::MAX.to_f32()),
        (f32::INFINITY, 0.0),
        (1.0, 1.0),
        (2.0, 0.5),
        (0.5, 2.0),
        (-4.0, -0.25),
        (1024.0, 1.0 / 1024.0),
    ];
    let input: Vec<bf16> = cases.iter().map(|&(x, _)| bf16::from_f32(x)).collect();
    let want: Vec<bf16> = cases.iter().map(|&(_, r)| bf16::from_f32(r)).collect();
    let input = Tensor::new(TensorShape::new(1, cases.len(), 1, 1), input)?;
    let got = run_one(dev, Instruction::Reciprocal { input })?;
    Ok(expect("reciprocal", &got, &Output::Bf16(want)))
}

fn reciprocal_sweep(dev: &mut dyn ChipBackend, cfg: &SuiteConfig) -> Result<CheckResult> {
    if let Some(skip) = bf16_unit(cfg) {
        return Ok(skip);
    }
    // exponents 2..=252 keep the result normal; one code in 31
    let codes: Vec<bf16> = (0x0100u16..0x7e80).step_by(31).map(bf16::from_bits).collect();
    let lanes = cfg.variant.npu_num();
    let w = codes.len().div_ceil(lanes);
    let mut padded = codes.clone();
    padded.resize(lanes * w, bf16::ONE);
    let input = Tensor::new(TensorShape::new(1, lanes, 1, w), padded)?;
    let out = run_one(dev, Instruction::Reciprocal { input })?;
    let Some(got) = out.as_bf16() else {
        return Ok(CheckResult::fail("reciprocal returned non-bf16 output"));
    };
    for (x, r) in codes.iter().zip(got) {
        let err = (r.to_f32() * x.to_f32() - 1.0).abs();
        if err >= 1.0 / 128.0 {
            return Ok(CheckResult::fail(format!("1/{x} = {r}, relative error {err}")));
        }
    }
    Ok(CheckResult::pass(format!("{} codes within 1/128", codes.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use npu_chip::ChipVariant;
    use npu_driver::select_backend;

    #[test]
    fn every_mode_passes_on_bf16_variants() {
        for variant in ChipVariant::ALL.into_iter().filter(ChipVariant::supports_bf16) {
            let cfg = SuiteConfig::new(variant);
            let mut dev = select_backend(variant, 0).unwrap();
            let mut suite = Suite::quiet();
            register(&mut suite, dev.as_mut(), &cfg);
            assert_eq!(suite.report().passed, 5, "{variant}: {:?}", suite.failures());
        }
    }

    #[test]
    fn single_mode_runs_once() {
        let cfg = SuiteConfig::new(ChipVariant::Cv181x).with_atan_mode(AtanTestMode::DataCompareU8);
        let mut dev = select_backend(cfg.variant, 0).unwrap();
        let mut suite = Suite::quiet();
        register(&mut suite, dev.as_mut(), &cfg);
        assert_eq!(suite.report().total(), 3);
    }

    #[test]
    fn fixed_mode_is_exact_regardless_of_epsilon() {
        let cfg = SuiteConfig::new(ChipVariant::Cv182x).with_atan_epsilon(1e-12);
        let mut dev = select_backend(cfg.variant, 0).unwrap();
        let r = atan(dev.as_mut(), &cfg, AtanTestMode::PreDataCompareFix).unwrap();
        assert!(r.passed(), "{r:?}");
    }

    #[test]
    fn tight_epsilon_fails_accuracy_mode() {
        let cfg = SuiteConfig::new(ChipVariant::Cv182x).with_atan_epsilon(1e-9);
        let mut dev = select_backend(cfg.variant, 0).unwrap();
        let r = atan(dev.as_mut(), &cfg, AtanTestMode::DataCompareAccuracy).unwrap();
        assert_eq!(r.outcome, crate::suite::Outcome::Fail);
    }
}
