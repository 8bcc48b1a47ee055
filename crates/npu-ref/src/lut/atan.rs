//! Arctangent by table interpolation.
//!
//! For `|x| <= 1` the result is read from a table sampled every `1/100`
//! and linearly interpolated from the nearest sample: the input is scaled
//! by 100, its nearest integer (ties to even, taken from the exponent and
//! significand bits) picks the entry and the signed remainder scales the
//! slope. For `|x| > 1` the input is first replaced by
//! its reciprocal and the result folded back with
//! `atan(x) = pi/2 - atan(1/x)`. The two cases are not branched on: the
//! `invert` and `pos_neg` tables, indexed by the exponent byte, hold the
//! blend weights (`invert` is 1 from exponent 127 upwards, `pos_neg` is
//! `1 - 2 * invert`), so both paths are evaluated and mixed the way the
//! vector unit does it.
//!
//! Every step after table construction is a bf16 operation.

use super::reciprocal::{bf16_reciprocal, ReciprocalTable};
use super::{check_table_shape, TABLE_ENTRIES};
use crate::bf16::bf16;
use crate::error::{RefError, Result};
use crate::tensor::Tensor;
use npu_chip::TensorShape;
use tracing::debug;

/// Table entries per unit of input.
const SCALE: f32 = 100.0;
/// First exponent byte of values `>= 1.0`.
const ONE_EXPONENT: usize = 127;

/// Interpolation and blend tables, replicated per lane.
#[derive(Debug, Clone, PartialEq)]
pub struct AtanTable {
    shape: TensorShape,
    y0: Vec<bf16>,
    slope: Vec<bf16>,
    invert: Vec<bf16>,
    pos_neg: Vec<bf16>,
}

/// Build the four arctangent tables for `shape`.
///
/// # Errors
///
/// Returns error if `shape` does not hold 256 entries per lane.
pub fn build_atan_table(shape: TensorShape) -> Result<AtanTable> {
    check_table_shape(shape)?;
    // i <= 256 is exact in f64
    #[allow(clippy::cast_precision_loss)]
    let at = |i: usize| (i as f64 / f64::from(SCALE)).atan();
    let y0: Vec<bf16> = (0..TABLE_ENTRIES).map(|i| bf16::from_f64(at(i))).collect();
    let slope: Vec<bf16> = (0..TABLE_ENTRIES)
        .map(|i| if i + 1 < TABLE_ENTRIES { bf16::from_f64(at(i + 1) - at(i)) } else { bf16::ZERO })
        .collect();
    let invert: Vec<bf16> = (0..TABLE_ENTRIES).map(|e| if e >= ONE_EXPONENT { bf16::ONE } else { bf16::ZERO }).collect();
    let pos_neg: Vec<bf16> = invert.iter().map(|&v| bf16::ONE - v - v).collect();
    debug!(lanes = shape.c, "built atan tables");
    Ok(AtanTable {
        shape,
        y0: y0.repeat(shape.c),
        slope: slope.repeat(shape.c),
        invert: invert.repeat(shape.c),
        pos_neg: pos_neg.repeat(shape.c),
    })
}

impl AtanTable {
    /// Table shape.
    pub const fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Table values `atan(i / 100)`, all lanes.
    pub fn y0(&self) -> &[bf16] {
        &self.y0
    }

    /// `atan((i + 1) / 100) - atan(i / 100)`, all lanes.
    pub fn slope(&self) -> &[bf16] {
        &self.slope
    }

    /// Reciprocal blend weight per exponent, all lanes.
    pub fn invert(&self) -> &[bf16] {
        &self.invert
    }

    /// Sign of the table term per exponent, all lanes.
    pub fn pos_neg(&self) -> &[bf16] {
        &self.pos_neg
    }
}

/// `atan(x)` using the tables of `lane`.
///
/// Magnitudes are clamped to `bf16::MAX` first, so infinities give
/// `±pi/2` and NaN gives `pi/2` with the sign of its sign bit.
#[must_use]
pub fn bf16_atan(x: bf16, atan: &AtanTable, recip: &ReciprocalTable, lane: usize) -> bf16 {
    let base = (lane % atan.shape.c) * TABLE_ENTRIES;
    let sign = if x.is_sign_negative() { bf16::NEG_ONE } else { bf16::ONE };
    let magnitude = bf16::from_bits(x.to_bits() & 0x7fff);
    let a = if magnitude.is_nan() || magnitude > bf16::MAX { bf16::MAX } else { magnitude };

    let exponent = base + usize::from((a.to_bits() >> 7) & 0xff);
    let invert = atan.invert[exponent];
    let t = invert * bf16_reciprocal(a, recip, lane) + (bf16::ONE - invert) * a;

    let i = nearest_index(t * bf16::from_f32(SCALE));
    // t * 100 and the subtraction are exact in f32, so one rounding
    #[allow(clippy::cast_precision_loss)]
    let frac = bf16::from_f32(t.to_f32().mul_add(SCALE, -(i as f32)));
    let idx = base + i;
    let y = atan.y0[idx] + atan.slope[idx] * frac;

    let folded = invert * bf16::FRAC_PI_2 + atan.pos_neg[exponent] * y;
    sign * folded
}

/// Nearest integer to a non-negative bf16, ties to even, saturated to the
/// last table entry.
fn nearest_index(v: bf16) -> usize {
    let bits = v.to_bits();
    let exponent = u32::from((bits >> 7) & 0xff);
    if exponent == 0 || bits & 0x8000 != 0 {
        return 0;
    }
    let significand = u32::from(bits & 0x7f) | 0x80;
    // value = significand * 2^(exponent - 134)
    let Some(shift) = 134u32.checked_sub(exponent).filter(|&s| s > 0) else {
        return TABLE_ENTRIES - 1;
    };
    if shift > 8 {
        return 0;
    }
    let mut q = significand >> shift;
    let rem = significand & ((1 << shift) - 1);
    let half = 1 << (shift - 1);
    if rem > half || (rem == half && q & 1 == 1) {
        q += 1;
    }
    (q as usize).min(TABLE_ENTRIES - 1)
}

/// Elementwise [`bf16_atan`], lane `c % lanes` for channel `c`.
///
/// # Errors
///
/// Returns error if the two tables disagree in shape.
pub fn bf16_atan_tensor(input: &Tensor<bf16>, atan: &AtanTable, recip: &ReciprocalTable) -> Result<Tensor<bf16>> {
    if atan.shape() != recip.shape() {
        return Err(RefError::invalid_param(format!(
            "atan table {} and reciprocal table {} differ",
            atan.shape(),
            recip.shape()
        )));
    }
    let shape = input.shape();
    let plane = shape.hw();
    let out = input
        .data()
        .iter()
        .enumerate()
        .map(|(i, &x)| bf16_atan(x, atan, recip, (i / plane) % shape.c))
        .collect();
    Tensor::new(shape, out)
}
