//! Integer average pooling.
//!
//! Division is never performed: every element in the window is multiplied
//! by the 8-bit `avg_const` (a reciprocal of the window size chosen by the
//! caller), and the sum is brought back to 8 bits by a round-half-up right
//! shift.

use crate::error::{RefError, Result};
use crate::quant::{rshift_round_half_up, saturate_i8, saturate_u8};
use crate::tensor::Tensor;
use crate::window::Axis;
use npu_chip::TensorShape;

/// Parameters of an average pooling instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolParams {
    /// Vertical window axis (dilation is always 1).
    pub h: Axis,
    /// Horizontal window axis.
    pub w: Axis,
    /// Per-element weight applied before the shift.
    pub avg_const: u8,
    /// Right shift applied to the weighted sum, `0..32`.
    pub rshift: u8,
}

impl PoolParams {
    /// `kh x kw` window, stride 1, weight `avg_const`, shift `rshift`.
    #[must_use]
    pub const fn new(kh: usize, kw: usize, avg_const: u8, rshift: u8) -> Self {
        Self { h: Axis::plain(kh), w: Axis::plain(kw), avg_const, rshift }
    }

    /// Output shape for `input`.
    ///
    /// # Errors
    ///
    /// Returns error if the window does not fit the extended input.
    pub fn output_shape(&self, input: TensorShape) -> Result<TensorShape> {
        Ok(TensorShape::new(input.n, input.c, self.h.output_len(input.h)?, self.w.output_len(input.w)?))
    }
}

/// Reference average pooling over raw 8-bit data.
///
/// `signed` selects whether bytes are read and saturated as i8 or u8; the
/// output uses the same interpretation.
///
/// # Errors
///
/// Returns error if the window does not fit or `rshift` is 32 or more.
pub fn avg_pool(input: &Tensor<u8>, signed: bool, params: &PoolParams) -> Result<Tensor<u8>> {
    if params.rshift >= 32 {
        return Err(RefError::invalid_param(format!("rshift {} out of range 0..32", params.rshift)));
    }
    if params.h.dilation != 1 || params.w.dilation != 1 {
        return Err(RefError::invalid_param("pooling windows are not dilated"));
    }
    let ishape = input.shape();
    let oshape = params.output_shape(ishape)?;
    let weight = i32::from(params.avg_const);
    let mut out = Vec::with_capacity(oshape.size());

    for n in 0..ishape.n {
        for c in 0..ishape.c {
            for oy in 0..oshape.h {
                for ox in 0..oshape.w {
                    let mut acc = 0i32;
                    for ky in 0..params.h.kernel {
                        let Some(iy) = params.h.source(params.h.tap(oy, ky), ishape.h) else {
                            continue;
                        };
                        for kx in 0..params.w.kernel {
                            let Some(ix) = params.w.source(params.w.tap(ox, kx), ishape.w) else {
                                continue;
                            };
                            let raw = *input.at(n, c, iy, ix);
                            let x = if signed { i32::from(i8::from_ne_bytes([raw])) } else { i32::from(raw) };
                            acc += x * weight;
                        }
                    }
                    let v = rshift_round_half_up(acc, params.rshift);
                    out.push(if signed { saturate_i8(v).to_ne_bytes()[0] } else { saturate_u8(v) });
                }
            }
        }
    }

    Tensor::new(oshape, out)
}
