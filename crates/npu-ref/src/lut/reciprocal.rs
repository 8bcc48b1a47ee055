//! Reciprocal by table lookup.
//!
//! `1 / (2^(e-127) * (1 + m/128)) = 2^(127-e) * 1 / (1 + m/128)`, so one
//! table indexed by the exponent byte and one by the 7 mantissa bits give
//! the reciprocal with a single bf16 multiply. The sign bit is copied back
//! afterwards.

use super::{check_table_shape, TABLE_ENTRIES};
use crate::bf16::bf16;
use crate::error::Result;
use npu_chip::TensorShape;

const SIGN: u16 = 0x8000;

/// Exponent and mantissa answer tables, replicated per lane.
#[derive(Debug, Clone, PartialEq)]
pub struct ReciprocalTable {
    shape: TensorShape,
    answer: Vec<bf16>,
    mantissa: Vec<bf16>,
}

fn exponent_answer(e: usize) -> bf16 {
    match e {
        0 => bf16::MAX,
        255 => bf16::ZERO,
        // 127 - e lies in -127..=126
        _ => bf16::from_f64(2f64.powi(127 - i32::try_from(e).unwrap_or(127))),
    }
}

fn mantissa_answer(m: usize) -> bf16 {
    if m < 128 {
        // m < 128 is exact in f64
        #[allow(clippy::cast_precision_loss)]
        let frac = m as f64 / 128.0;
        bf16::from_f64(1.0 / (1.0 + frac))
    } else {
        bf16::ZERO
    }
}

/// Build both reciprocal tables for `shape` (see [`table_shape`](super::table_shape)).
///
/// Zero and subnormal inputs (exponent 0) map to `bf16::MAX`; infinities
/// and NaN (exponent 255) map to zero.
///
/// # Errors
///
/// Returns error if `shape` does not hold 256 entries per lane.
pub fn build_reciprocal_table(shape: TensorShape) -> Result<ReciprocalTable> {
    check_table_shape(shape)?;
    let answer_lane: Vec<bf16> = (0..TABLE_ENTRIES).map(exponent_answer).collect();
    let mantissa_lane: Vec<bf16> = (0..TABLE_ENTRIES).map(mantissa_answer).collect();
    Ok(ReciprocalTable {
        shape,
        answer: answer_lane.repeat(shape.c),
        mantissa: mantissa_lane.repeat(shape.c),
    })
}

impl ReciprocalTable {
    /// Table shape.
    pub const fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Exponent answers, all lanes.
    pub fn answer(&self) -> &[bf16] {
        &self.answer
    }

    /// Mantissa answers, all lanes.
    pub fn mantissa(&self) -> &[bf16] {
        &self.mantissa
    }

    fn lane_base(&self, lane: usize) -> usize {
        (lane % self.shape.c) * TABLE_ENTRIES
    }
}

/// `1 / x` using the tables of `lane`.
#[must_use]
pub fn bf16_reciprocal(x: bf16, table: &ReciprocalTable, lane: usize) -> bf16 {
    let bits = x.to_bits();
    let exponent = usize::from((bits >> 7) & 0xff);
    let mantissa = usize::from(bits & 0x7f);
    let base = table.lane_base(lane);
    let r = table.answer[base + exponent] * table.mantissa[base + mantissa];
    bf16::from_bits(r.to_bits() | (bits & SIGN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::table_shape;

    fn table() -> ReciprocalTable {
        build_reciprocal_table(table_shape(2)).unwrap()
    }

    #[test]
    fn powers_of_two_are_exact() {
        let t = table();
        for (x, r) in [(1.0f32, 1.0f32), (2.0, 0.5), (0.5, 2.0), (-4.0, -0.25), (1024.0, 1.0 / 1024.0)] {
            assert_eq!(bf16_reciprocal(bf16::from_f32(x), &t, 0).to_f32(), r);
        }
    }

    #[test]
    fn special_exponents() {
        let t = table();
        assert_eq!(bf16_reciprocal(bf16::ZERO, &t, 0), bf16::MAX);
        assert_eq!(bf16_reciprocal(bf16::NEG_ZERO, &t, 1).to_f32(), -bf16::MAX.to_f32());
        assert_eq!(bf16_reciprocal(bf16::INFINITY, &t, 0), bf16::ZERO);
    }

    #[test]
    fn relative_error_across_normal_range() {
        let t = table();
        // exponents 2..=252 keep the result normal
        for bits in 0x0100u16..0x7e80 {
            let x = bf16::from_bits(bits);
            let r = bf16_reciprocal(x, &t, 0).to_f32();
            assert!((r * x.to_f32() - 1.0).abs() < 1.0 / 128.0, "{x}: {r}");
        }
    }

    #[test]
    fn no_jump_at_index_boundaries() {
        let t = table();
        for bits in 0x0100u16..0x7e80 {
            let a = bf16_reciprocal(bf16::from_bits(bits), &t, 0).to_f32();
            let b = bf16_reciprocal(bf16::from_bits(bits + 1), &t, 0).to_f32();
            assert!((a - b).abs() / a < 1.0 / 64.0, "{bits:#06x}: {a} -> {b}");
        }
    }

    #[test]
    fn lanes_are_replicas() {
        let t = table();
        assert_eq!(t.answer().len(), 2 * TABLE_ENTRIES);
        assert_eq!(t.answer()[..TABLE_ENTRIES], t.answer()[TABLE_ENTRIES..]);
        let x = bf16::from_f32(3.0);
        assert_eq!(bf16_reciprocal(x, &t, 0), bf16_reciprocal(x, &t, 7));
    }
}
