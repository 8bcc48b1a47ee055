// SPDX-License-Identifier: AGPL-3.0-only

//! TDMA transfer checks on random shapes.
//!
//! Relayouts are checked against gathers from `oracle`: each
//! destination element is looked up in the source rather than scattered.

use super::{bf16_unit, expect};
use crate::oracle::{self, gather};
use crate::suite::{CheckResult, Suite};
use anyhow::Result;
use bytes::Bytes;
use npu_chip::{Fmt, LocalMatrixShape, TensorShape, TensorStride};
use npu_driver::{run_one, ChipBackend, Instruction, Output, SuiteConfig, TdmaOp};
use npu_ref::testdata::fill_random_u8;
use rand::rngs::StdRng;
use rand::Rng;

/// Relayouts checked in both element formats.
#[derive(Debug, Clone, Copy)]
enum Relayout {
    Cw,
    Nc,
    Nhwc,
}

impl Relayout {
    const ALL: [Self; 3] = [Self::Cw, Self::Nc, Self::Nhwc];

    fn op(self, shape: TensorShape, fmt: Fmt) -> TdmaOp {
        match self {
            Self::Cw => TdmaOp::CwTranspose { shape, fmt },
            Self::Nc => TdmaOp::NcTranspose { shape, fmt },
            Self::Nhwc => TdmaOp::NhwcToNchw { shape, fmt },
        }
    }

    fn order(self, shape: TensorShape) -> Vec<usize> {
        match self {
            Self::Cw => gather::cw_transpose(shape),
            Self::Nc => gather::nc_transpose(shape),
            Self::Nhwc => gather::nhwc_to_nchw(shape),
        }
    }
}

/// Register the TDMA checks.
pub fn register(suite: &mut Suite, dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) {
    for fmt in [Fmt::I8, Fmt::Bf16] {
        suite.run(&format!("tdma copy: {fmt:?}"), || copy(dev, cfg, rng, fmt));
        for relayout in Relayout::ALL {
            suite.run(&format!("tdma {relayout:?} transpose: {fmt:?}"), || transpose(dev, cfg, rng, relayout, fmt));
        }
        suite.run(&format!("tdma strided write: {fmt:?}"), || strided(dev, cfg, rng, fmt));
    }
    suite.run("tdma matrix copy", || matrix(dev, cfg, rng));
    suite.run("tdma fill", || fill(dev, cfg, rng));
    for signed in [false, true] {
        let label = if signed { "i8" } else { "u8" };
        suite.run(&format!("tdma nc transpose {label} -> bf16"), || widen(dev, cfg, rng, signed));
    }
}

fn random_shape(rng: &mut StdRng, cfg: &SuiteConfig) -> TensorShape {
    TensorShape::new(
        rng.gen_range(1..=3),
        rng.gen_range(1..=2 * cfg.variant.npu_num()),
        rng.gen_range(1..=9),
        rng.gen_range(1..=9),
    )
}

fn format_unit(cfg: &SuiteConfig, fmt: Fmt) -> Option<CheckResult> {
    if fmt == Fmt::Bf16 {
        bf16_unit(cfg)
    } else {
        None
    }
}

fn copy(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng, fmt: Fmt) -> Result<CheckResult> {
    if let Some(skip) = format_unit(cfg, fmt) {
        return Ok(skip);
    }
    let shape = random_shape(rng, cfg);
    let src = fill_random_u8(rng, shape.byte_size(fmt));
    let want = src.clone();
    let got = run_one(dev, Instruction::Tdma { src: src.into(), op: TdmaOp::Copy { shape, fmt } })?;
    Ok(expect(&format!("copy {shape}"), &got, &Output::U8(want)))
}

fn transpose(
    dev: &mut dyn ChipBackend,
    cfg: &SuiteConfig,
    rng: &mut StdRng,
    relayout: Relayout,
    fmt: Fmt,
) -> Result<CheckResult> {
    if let Some(skip) = format_unit(cfg, fmt) {
        return Ok(skip);
    }
    let shape = random_shape(rng, cfg);
    let src = fill_random_u8(rng, shape.byte_size(fmt));
    let want = oracle::gather_elements(&src, fmt.byte_size(), &relayout.order(shape));
    let got = run_one(dev, Instruction::Tdma { src: src.into(), op: relayout.op(shape, fmt) })?;
    Ok(expect(&format!("{relayout:?} {shape}"), &got, &Output::U8(want)))
}

fn strided(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng, fmt: Fmt) -> Result<CheckResult> {
    if let Some(skip) = format_unit(cfg, fmt) {
        return Ok(skip);
    }
    let shape = random_shape(rng, cfg);
    let es = fmt.byte_size();
    let packed = TensorStride::packed(&shape, fmt);
    let h = packed.h + es * rng.gen_range(0..4);
    let c = shape.h * h + es * rng.gen_range(0..4);
    let stride = TensorStride { n: shape.c * c + es * rng.gen_range(0..4), c, h, w: es };
    let src = fill_random_u8(rng, shape.byte_size(fmt));
    let want = oracle::strided(&src, shape, &stride, es);
    let got = run_one(dev, Instruction::Tdma { src: src.into(), op: TdmaOp::Strided { shape, stride, fmt } })?;
    Ok(expect(&format!("strided {shape}"), &got, &Output::U8(want)))
}

fn matrix(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) -> Result<CheckResult> {
    let shape = LocalMatrixShape::new(rng.gen_range(1..=16), rng.gen_range(1..=64), cfg.variant.info().eu_num);
    let src = fill_random_u8(rng, shape.size());
    let want = src.clone();
    let got = run_one(dev, Instruction::Tdma { src: src.into(), op: TdmaOp::MatrixCopy { shape } })?;
    Ok(expect("matrix copy", &got, &Output::U8(want)))
}

fn fill(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) -> Result<CheckResult> {
    let shape = random_shape(rng, cfg);
    let value: u8 = rng.gen();
    let want = vec![value; shape.size()];
    let got = run_one(dev, Instruction::Tdma { src: Bytes::new(), op: TdmaOp::Fill { shape, value } })?;
    Ok(expect(&format!("fill {shape}"), &got, &Output::U8(want)))
}

fn widen(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng, signed: bool) -> Result<CheckResult> {
    if let Some(skip) = bf16_unit(cfg) {
        return Ok(skip);
    }
    let shape = random_shape(rng, cfg);
    let src = fill_random_u8(rng, shape.size());
    let want: Vec<u8> = gather::nc_transpose(shape)
        .into_iter()
        .flat_map(|i| oracle::int8_to_bf16(src[i], signed).to_le_bytes())
        .collect();
    let got = run_one(dev, Instruction::Tdma { src: src.into(), op: TdmaOp::NcTransposeToBf16 { shape, signed } })?;
    Ok(expect(&format!("nc -> bf16 {shape}"), &got, &Output::U8(want)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::Outcome;
    use npu_chip::ChipVariant;
    use npu_driver::select_backend;
    use rand::SeedableRng;

    #[test]
    fn every_transfer_passes_on_1880v2() {
        let cfg = SuiteConfig::new(ChipVariant::Bm1880v2);
        let mut dev = select_backend(cfg.variant, 0).unwrap();
        let mut suite = Suite::quiet();
        register(&mut suite, dev.as_mut(), &cfg, &mut StdRng::seed_from_u64(11));
        assert_eq!(suite.failures(), &[] as &[String]);
        assert_eq!(suite.report().skipped, 0);
    }

    #[test]
    fn bf16_transfers_skip_on_183x() {
        let cfg = SuiteConfig::new(ChipVariant::Cv183x);
        let mut dev = select_backend(cfg.variant, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(copy(dev.as_mut(), &cfg, &mut rng, Fmt::Bf16).unwrap().outcome, Outcome::Skip);
        assert!(copy(dev.as_mut(), &cfg, &mut rng, Fmt::I8).unwrap().passed());
    }
}
