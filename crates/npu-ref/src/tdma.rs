//! Reference results for TDMA (tensor DMA) transfers.
//!
//! Transfers move bytes between global and local memory, optionally
//! transposing axes, converting int8 to bf16, or writing through a
//! non-packed destination stride. All functions here work on packed
//! row-major buffers; strides are applied only by [`copy_to_strided`].

use crate::bf16::convert_int8_bf16;
use crate::error::{RefError, Result};
use npu_chip::{Fmt, LocalMatrixShape, TensorShape, TensorStride};

/// Byte the device leaves in destination gaps of a strided copy.
pub const STRIDE_FILL: u8 = 0xcf;

/// Plain copy: the destination equals the source.
///
/// # Errors
///
/// Returns error if `src` does not hold `shape` elements of `fmt`.
pub fn tensor_copy(src: &[u8], shape: &TensorShape, fmt: Fmt) -> Result<Vec<u8>> {
    RefError::check_len("tensor copy source", shape.byte_size(fmt), src.len())?;
    Ok(src.to_vec())
}

/// Local matrix copy: the `row x col` payload is unchanged.
///
/// # Errors
///
/// Returns error if `src` is not `row * col` bytes.
pub fn matrix_copy(src: &[u8], shape: &LocalMatrixShape) -> Result<Vec<u8>> {
    RefError::check_len("matrix copy source", shape.size(), src.len())?;
    Ok(src.to_vec())
}

/// Destination of a fill: every byte is `value`.
#[must_use]
pub fn fill_constant(shape: &TensorShape, value: u8) -> Vec<u8> {
    vec![value; shape.size()]
}

/// Swap the C and W axes: `dst[n][w][h][c] = src[n][c][h][w]`.
///
/// # Errors
///
/// Returns error if `src` is not `shape.size()` elements.
pub fn copy_cw_transposed<T: Copy + Default>(src: &[T], shape: &TensorShape) -> Result<Vec<T>> {
    RefError::check_len("cw-transpose source", shape.size(), src.len())?;
    let TensorShape { n, c, h, w } = *shape;
    let mut dst = vec![T::default(); src.len()];
    for ni in 0..n {
        for ci in 0..c {
            for hi in 0..h {
                for wi in 0..w {
                    let s = shape.index(ni, ci, hi, wi);
                    let d = ni * c * h * w + wi * h * c + hi * c + ci;
                    dst[d] = src[s];
                }
            }
        }
    }
    Ok(dst)
}

/// Swap the N and C axes: `dst[c][n][hw] = src[n][c][hw]`.
///
/// # Errors
///
/// Returns error if `src` is not `shape.size()` elements.
pub fn copy_nc_transposed<T: Copy + Default>(src: &[T], shape: &TensorShape) -> Result<Vec<T>> {
    RefError::check_len("nc-transpose source", shape.size(), src.len())?;
    let (n, c, hw) = (shape.n, shape.c, shape.hw());
    let mut dst = vec![T::default(); src.len()];
    for ni in 0..n {
        for ci in 0..c {
            let s = (ni * c + ci) * hw;
            let d = (ci * n + ni) * hw;
            dst[d..d + hw].copy_from_slice(&src[s..s + hw]);
        }
    }
    Ok(dst)
}

/// N/C transpose that widens 8-bit source elements to bf16 on the way.
///
/// # Errors
///
/// Returns error if `src` is not `shape.size()` bytes.
pub fn copy_nc_transposed_to_bf16(src: &[u8], shape: &TensorShape, signed: bool) -> Result<Vec<u16>> {
    let widened: Vec<u16> = src.iter().map(|&b| convert_int8_bf16(b, signed)).collect();
    copy_nc_transposed(&widened, shape)
}

/// Write a packed tensor through a destination byte stride.
///
/// The result is `shape.n * stride.n` bytes; bytes no element lands on keep
/// [`STRIDE_FILL`] (repeated per element, so bf16 gaps read `0x00cf`).
///
/// # Errors
///
/// Returns error if `src` is the wrong size, or the stride is not a whole
/// number of elements or overlaps itself.
pub fn copy_to_strided(src: &[u8], shape: &TensorShape, stride: &TensorStride, fmt: Fmt) -> Result<Vec<u8>> {
    let es = fmt.byte_size();
    RefError::check_len("strided copy source", shape.byte_size(fmt), src.len())?;
    if stride.w != es || stride.h < shape.w * es || stride.c < shape.h * stride.h || stride.n < shape.c * stride.c {
        return Err(RefError::invalid_param(format!("stride {stride:?} does not cover shape {shape}")));
    }
    if stride.h % es != 0 || stride.c % es != 0 || stride.n % es != 0 {
        return Err(RefError::invalid_param("stride is not a multiple of the element size"));
    }

    // gap elements hold STRIDE_FILL in their low byte
    let mut dst = vec![0u8; shape.n * stride.n];
    for chunk in dst.chunks_exact_mut(es) {
        chunk[0] = STRIDE_FILL;
    }

    let mut elem = src.chunks_exact(es);
    for ni in 0..shape.n {
        for ci in 0..shape.c {
            for hi in 0..shape.h {
                for wi in 0..shape.w {
                    let off = ni * stride.n + ci * stride.c + hi * stride.h + wi * stride.w;
                    if let Some(e) = elem.next() {
                        dst[off..off + es].copy_from_slice(e);
                    }
                }
            }
        }
    }
    Ok(dst)
}

/// Reorder an NHWC buffer to NCHW.
///
/// # Errors
///
/// Returns error if `src` is not `shape.size()` elements.
pub fn nhwc_to_nchw<T: Copy + Default>(src: &[T], shape: &TensorShape) -> Result<Vec<T>> {
    RefError::check_len("nhwc source", shape.size(), src.len())?;
    let TensorShape { n, c, h, w } = *shape;
    let mut dst = vec![T::default(); src.len()];
    for ni in 0..n {
        for hi in 0..h {
            for wi in 0..w {
                for ci in 0..c {
                    let s = ((ni * h + hi) * w + wi) * c + ci;
                    dst[shape.index(ni, ci, hi, wi)] = src[s];
                }
            }
        }
    }
    Ok(dst)
}
