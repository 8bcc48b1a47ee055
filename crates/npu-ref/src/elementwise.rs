//! Elementwise TIU operations.

use crate::bf16::bf16;
use crate::error::{RefError, Result};
use crate::quant::{saturate_i8, QuantParams};
use npu_chip::Fmt;

/// Quantized multiply: `clamp(q(a[i] * b[i]), -128, 127)`.
///
/// # Errors
///
/// Returns error if the operands differ in length.
pub fn tensor_mul_qm(a: &[i8], b: &[i8], quant: QuantParams) -> Result<Vec<i8>> {
    RefError::check_len("mul operand b", a.len(), b.len())?;
    Ok(a.iter()
        .zip(b)
        .map(|(&x, &y)| saturate_i8(quant.apply(i32::from(x) * i32::from(y))))
        .collect())
}

fn widen(byte: u8, fmt: Fmt) -> Result<i32> {
    match fmt {
        Fmt::I8 => Ok(i32::from(i8::from_ne_bytes([byte]))),
        Fmt::U8 => Ok(i32::from(byte)),
        Fmt::Bf16 => Err(RefError::UnsupportedFormat("bf16 in an 8-bit compare")),
    }
}

/// Compare `a >= b` per element; 1 when true, 0 otherwise.
///
/// Operand bytes are read as i8 or u8 according to `fmt`.
///
/// # Errors
///
/// Returns error on length mismatch or a non-8-bit format.
pub fn tensor_ge(a: &[u8], b: &[u8], fmt: Fmt) -> Result<Vec<u8>> {
    RefError::check_len("ge operand b", a.len(), b.len())?;
    a.iter()
        .zip(b)
        .map(|(&x, &y)| Ok(u8::from(widen(x, fmt)? >= widen(y, fmt)?)))
        .collect()
}

/// `min(a[i], b)` over signed bytes.
#[must_use]
pub fn min_const_i8(a: &[i8], b: i8) -> Vec<i8> {
    a.iter().map(|&x| x.min(b)).collect()
}

/// `min(a[i], b)` over unsigned bytes.
#[must_use]
pub fn min_const_u8(a: &[u8], b: u8) -> Vec<u8> {
    a.iter().map(|&x| x.min(b)).collect()
}

/// `a[i] + b` in bf16, optionally followed by ReLU.
#[must_use]
pub fn bf16_add_const(a: &[bf16], b: bf16, relu: bool) -> Vec<bf16> {
    a.iter()
        .map(|&x| {
            let sum = x + b;
            if relu && sum < bf16::ZERO {
                bf16::ZERO
            } else {
                sum
            }
        })
        .collect()
}
