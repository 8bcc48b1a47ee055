// SPDX-License-Identifier: AGPL-3.0-only

//! Quantized-engine checks: fixed vectors first, then seeded random cases.
//!
//! Random cases are held to the integer models in `oracle`.

use super::{bf16_unit, expect};
use crate::oracle;
use crate::suite::{CheckResult, Suite};
use anyhow::Result;
use npu_chip::Fmt;
use npu_driver::{run_one, ChipBackend, Instruction, Output, SuiteConfig};
use npu_ref::bf16::bf16;
use npu_ref::conv::{golden, pack_chl_quan};
use npu_ref::policy::{accumulator_range, perturb, search_quant_params};
use npu_ref::testdata::{fill_random_bias, fill_random_i8, fill_random_u8, random_depthwise_case, random_pool_case};
use npu_ref::{DepthwiseParams, QuantParams, QuantSearch, Tensor};
use rand::rngs::StdRng;
use rand::Rng;

const MUL_A: [i8; 4] = [-102, 25, 115, 89];
const MUL_B: [i8; 4] = [77, 51, 115, 102];
const MUL_QUANT: QuantParams = QuantParams::new(1_077_952_640, 6);
const MUL_OUT: [i8; 4] = [-62, 10, 104, 71];

/// Large pooling strides exercised on top of the random ones.
const POOL_STRIDES: [Option<usize>; 4] = [None, Some(15), Some(16), Some(31)];

/// Register the quantized-engine checks.
pub fn register(suite: &mut Suite, dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) {
    suite.run("mul_qm: recorded vector", || mul_golden(dev));
    for i in 0..cfg.random_cases {
        suite.run(&format!("mul_qm: random #{i}"), || mul_random(dev, cfg, rng));
    }

    suite.run("depthwise: recorded 8-channel case", || depthwise_golden(dev));
    for i in 0..cfg.random_cases {
        suite.run(&format!("depthwise: random #{i}"), || depthwise_random(dev, cfg, rng));
    }

    for stride in POOL_STRIDES {
        let label = stride.map_or_else(|| "random".to_string(), |s| s.to_string());
        suite.run(&format!("avg_pool: stride {label}"), || avg_pool_random(dev, cfg, rng, stride));
    }

    for fmt in [Fmt::I8, Fmt::U8] {
        suite.run(&format!("ge: {fmt:?}"), || ge_random(dev, rng, fmt));
        suite.run(&format!("min_const: {fmt:?}"), || min_const_random(dev, rng, fmt));
    }
    suite.run("bf16_add_const: relu on/off", || bf16_add_random(dev, cfg, rng));
}

fn no_scale(cfg: &SuiteConfig) -> CheckResult {
    CheckResult::skip(format!("no scale below one in {} attempts", cfg.retry_budget))
}

fn mul_golden(dev: &mut dyn ChipBackend) -> Result<CheckResult> {
    let got = run_one(dev, Instruction::MulQm { a: MUL_A.to_vec(), b: MUL_B.to_vec(), quant: MUL_QUANT })?;
    Ok(expect("mul_qm", &got, &Output::I8(MUL_OUT.to_vec())))
}

fn mul_random(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) -> Result<CheckResult> {
    let len = rng.gen_range(1..=256);
    let search = search_quant_params(rng, cfg.retry_budget, |rng| {
        let a = fill_random_i8(rng, len);
        let b = fill_random_i8(rng, len);
        let acc: Vec<i32> = a.iter().zip(&b).map(|(&x, &y)| i32::from(x) * i32::from(y)).collect();
        let range = accumulator_range(&acc);
        ((a, b), range)
    });
    let QuantSearch::Found { params, data: (a, b), .. } = search else {
        return Ok(no_scale(cfg));
    };
    let want = oracle::mul_qm(&a, &b, params);
    let got = run_one(dev, Instruction::MulQm { a, b, quant: params })?;
    Ok(expect("mul_qm", &got, &Output::I8(want)))
}

fn depthwise_golden(dev: &mut dyn ChipBackend) -> Result<CheckResult> {
    let input = Tensor::new(golden::INPUT_SHAPE, golden::INPUT.to_vec())?;
    let chl_quan = pack_chl_quan(Some(&golden::BIAS[..]), &golden::quant())?;
    let got = run_one(
        dev,
        Instruction::Depthwise {
            input,
            filter: golden::FILTER.to_vec(),
            chl_quan,
            has_bias: true,
            params: DepthwiseParams::new(3, 3),
        },
    )?;
    Ok(expect("depthwise", &got, &Output::I8(golden::OUTPUT.to_vec())))
}

fn depthwise_random(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) -> Result<CheckResult> {
    let Some(case) = random_depthwise_case(rng, cfg.variant.npu_num()) else {
        return Ok(CheckResult::skip("no legal window drawn"));
    };
    let taps = case.shape.c * case.params.h.kernel * case.params.w.kernel;
    let search = search_quant_params(rng, cfg.retry_budget, |rng| {
        let input = fill_random_i8(rng, case.shape.size());
        let filter = fill_random_i8(rng, taps);
        let bias = case.has_bias.then(|| fill_random_bias(rng, case.shape.c));
        let range = oracle::depthwise_acc(&input, case.shape, &filter, bias.as_deref(), &case.params)
            .ok()
            .and_then(|(_, acc)| accumulator_range(&acc));
        ((input, filter, bias), range)
    });
    let QuantSearch::Found { params, data: (input, filter, bias), .. } = search else {
        return Ok(no_scale(cfg));
    };

    let quant: Vec<QuantParams> = (0..case.shape.c).map(|_| perturb(params, rng)).collect();
    let want = oracle::depthwise(&input, case.shape, &filter, bias.as_deref(), &quant, &case.params)?;
    let input = Tensor::new(case.shape, input)?;
    let chl_quan = pack_chl_quan(bias.as_deref(), &quant)?;
    let got = run_one(
        dev,
        Instruction::Depthwise { input, filter, chl_quan, has_bias: bias.is_some(), params: case.params },
    )?;
    Ok(expect(&format!("depthwise {}", case.shape), &got, &Output::I8(want)))
}

fn avg_pool_random(
    dev: &mut dyn ChipBackend,
    cfg: &SuiteConfig,
    rng: &mut StdRng,
    stride: Option<usize>,
) -> Result<CheckResult> {
    let Some(case) = random_pool_case(rng, cfg.variant.npu_num(), stride) else {
        return Ok(CheckResult::skip("no legal window drawn"));
    };
    let data = fill_random_u8(rng, case.shape.size());
    let want = oracle::avg_pool(&data, case.shape, case.signed, &case.params)?;
    let input = Tensor::new(case.shape, data)?;
    let got = run_one(dev, Instruction::AvgPool { input, signed: case.signed, params: case.params })?;
    Ok(expect(&format!("avg_pool {}", case.shape), &got, &Output::U8(want)))
}

fn ge_random(dev: &mut dyn ChipBackend, rng: &mut StdRng, fmt: Fmt) -> Result<CheckResult> {
    let len = rng.gen_range(1..=512);
    let a = fill_random_u8(rng, len);
    let mut b = fill_random_u8(rng, len);
    // equal pairs exercise the boundary
    for i in (0..len).step_by(7) {
        b[i] = a[i];
    }
    let want = oracle::ge(&a, &b, fmt == Fmt::I8);
    let got = run_one(dev, Instruction::Ge { a, b, fmt })?;
    Ok(expect("ge", &got, &Output::U8(want)))
}

fn min_const_random(dev: &mut dyn ChipBackend, rng: &mut StdRng, fmt: Fmt) -> Result<CheckResult> {
    let len = rng.gen_range(1..=512);
    let a = fill_random_u8(rng, len);
    let b: u8 = rng.gen();
    let raw = oracle::min_const(&a, b, fmt == Fmt::I8);
    let want = match fmt {
        Fmt::I8 => Output::I8(raw.iter().map(|&x| i8::from_ne_bytes([x])).collect()),
        _ => Output::U8(raw),
    };
    let got = run_one(dev, Instruction::MinConst { a, b, fmt })?;
    Ok(expect("min_const", &got, &want))
}

fn bf16_add_random(dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) -> Result<CheckResult> {
    if let Some(skip) = bf16_unit(cfg) {
        return Ok(skip);
    }
    let len = rng.gen_range(1..=256);
    let a: Vec<bf16> = (0..len).map(|_| bf16::from_f32(rng.gen_range(-8.0f32..8.0))).collect();
    let b = bf16::from_f32(rng.gen_range(-4.0f32..4.0));
    for relu in [false, true] {
        let out = run_one(dev, Instruction::Bf16AddConst { a: a.clone(), b, relu })?;
        let Some(got) = out.as_bf16() else {
            return Ok(CheckResult::fail("bf16_add_const returned non-bf16 output"));
        };
        if got.len() != len {
            return Ok(CheckResult::fail(format!("{} outputs for {len} inputs", got.len())));
        }
        if let Some(i) = (0..len).find(|&i| !oracle::bf16_add_close(got[i], a[i], b, relu)) {
            return Ok(CheckResult::fail(format!("{} + {b} (relu {relu}): got {}", a[i], got[i])));
        }
    }
    Ok(CheckResult::pass(format!("{len} elements within one rounding, with and without relu")))
}
