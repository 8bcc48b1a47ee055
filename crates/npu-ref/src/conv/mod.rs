//! Per-channel quantized depthwise convolution.
//!
//! Layout is NCHW for activations and `[c][kh][kw]` for the filter. Each
//! output channel owns an optional bias and a [`QuantParams`] pair; the
//! accumulator is requantized with
//! [`multiply_by_quantized_multiplier`](crate::quant::multiply_by_quantized_multiplier)
//! and clamped to `[-128, 127]`.
//!
//! The same per-channel triple is handed to the device packed into a
//! "channel quantization" side buffer, see [`pack_chl_quan`].

use crate::error::{RefError, Result};
use crate::quant::{saturate_i8, QuantParams};
use crate::tensor::Tensor;
use crate::window::Axis;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use npu_chip::TensorShape;

pub mod golden;

/// Window parameters of a depthwise convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthwiseParams {
    /// Vertical axis: kernel height, stride, dilation, padding, insertion.
    pub h: Axis,
    /// Horizontal axis.
    pub w: Axis,
}

impl DepthwiseParams {
    /// `kh x kw` kernel, stride 1, nothing else.
    #[must_use]
    pub const fn new(kh: usize, kw: usize) -> Self {
        Self { h: Axis::plain(kh), w: Axis::plain(kw) }
    }

    /// Output shape for `input`.
    ///
    /// # Errors
    ///
    /// Returns error if the kernel does not fit the extended input.
    pub fn output_shape(&self, input: TensorShape) -> Result<TensorShape> {
        Ok(TensorShape::new(input.n, input.c, self.h.output_len(input.h)?, self.w.output_len(input.w)?))
    }
}

/// Raw depthwise accumulators, bias included, before requantization.
///
/// `filter` holds `c * kh * kw` taps and `bias` (if any) one entry per
/// channel. Sums wrap on i32 overflow as the TIU accumulator does.
///
/// # Errors
///
/// Returns error if a buffer length disagrees with the input shape or the
/// kernel does not fit.
pub fn depthwise_accumulate(
    input: &Tensor<i8>,
    filter: &[i8],
    bias: Option<&[i32]>,
    params: &DepthwiseParams,
) -> Result<Tensor<i32>> {
    let ishape = input.shape();
    let (kh, kw) = (params.h.kernel, params.w.kernel);
    RefError::check_len("depthwise filter", ishape.c * kh * kw, filter.len())?;
    if let Some(b) = bias {
        RefError::check_len("per-channel bias", ishape.c, b.len())?;
    }

    let oshape = params.output_shape(ishape)?;
    let mut out = Vec::with_capacity(oshape.size());

    for n in 0..ishape.n {
        for c in 0..ishape.c {
            let taps = &filter[c * kh * kw..(c + 1) * kh * kw];
            for oy in 0..oshape.h {
                for ox in 0..oshape.w {
                    let mut acc = 0i32;
                    for ky in 0..kh {
                        let Some(iy) = params.h.source(params.h.tap(oy, ky), ishape.h) else {
                            continue;
                        };
                        for kx in 0..kw {
                            let Some(ix) = params.w.source(params.w.tap(ox, kx), ishape.w) else {
                                continue;
                            };
                            let x = i32::from(*input.at(n, c, iy, ix));
                            acc = acc.wrapping_add(i32::from(taps[ky * kw + kx]) * x);
                        }
                    }
                    if let Some(b) = bias {
                        acc = acc.wrapping_add(b[c]);
                    }
                    out.push(acc);
                }
            }
        }
    }

    Tensor::new(oshape, out)
}

/// Reference depthwise convolution.
///
/// Accumulates as [`depthwise_accumulate`], then requantizes each channel
/// with its own `quant` entry and clamps to i8.
///
/// # Errors
///
/// Returns error if a buffer length disagrees with the input shape or the
/// kernel does not fit.
pub fn depthwise_conv(
    input: &Tensor<i8>,
    filter: &[i8],
    bias: Option<&[i32]>,
    quant: &[QuantParams],
    params: &DepthwiseParams,
) -> Result<Tensor<i8>> {
    RefError::check_len("per-channel quant", input.shape().c, quant.len())?;
    let acc = depthwise_accumulate(input, filter, bias, params)?;
    let oshape = acc.shape();
    let plane = oshape.hw();
    let out = acc
        .into_data()
        .into_iter()
        .enumerate()
        .map(|(i, a)| saturate_i8(quant[(i / plane) % oshape.c].apply(a)))
        .collect();
    Tensor::new(oshape, out)
}

/// Bytes per channel in a packed channel-quantization buffer.
#[must_use]
pub const fn chl_quan_entry_size(has_bias: bool) -> usize {
    if has_bias {
        9
    } else {
        5
    }
}

/// Pack per-channel `[bias i32 LE]? [multiplier u32 LE] [shift i8]` entries.
///
/// # Errors
///
/// Returns error if `bias` and `quant` disagree in length.
pub fn pack_chl_quan(bias: Option<&[i32]>, quant: &[QuantParams]) -> Result<Bytes> {
    if let Some(b) = bias {
        RefError::check_len("per-channel bias", quant.len(), b.len())?;
    }
    let mut buf = BytesMut::with_capacity(quant.len() * chl_quan_entry_size(bias.is_some()));
    for (c, q) in quant.iter().enumerate() {
        if let Some(b) = bias {
            buf.put_i32_le(b[c]);
        }
        buf.put_u32_le(q.multiplier);
        buf.put_i8(q.shift);
    }
    Ok(buf.freeze())
}

/// Inverse of [`pack_chl_quan`].
///
/// # Errors
///
/// Returns error if `packed` is not exactly `channels` entries long.
pub fn unpack_chl_quan(mut packed: &[u8], channels: usize, has_bias: bool) -> Result<(Option<Vec<i32>>, Vec<QuantParams>)> {
    RefError::check_len("channel quant buffer", channels * chl_quan_entry_size(has_bias), packed.len())?;
    let mut bias = has_bias.then(|| Vec::with_capacity(channels));
    let mut quant = Vec::with_capacity(channels);
    for _ in 0..channels {
        if let Some(b) = bias.as_mut() {
            b.push(packed.get_i32_le());
        }
        let multiplier = packed.get_u32_le();
        let shift = packed.get_i8();
        quant.push(QuantParams { multiplier, shift });
    }
    Ok((bias, quant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_depthwise_case() {
        let input = Tensor::new(golden::INPUT_SHAPE, golden::INPUT.to_vec()).unwrap();
        let out = depthwise_conv(
            &input,
            &golden::FILTER,
            Some(&golden::BIAS),
            &golden::quant(),
            &DepthwiseParams::new(3, 3),
        )
        .unwrap();
        assert_eq!(out.shape(), TensorShape::new(1, 8, 3, 4));
        assert_eq!(out.data(), &golden::OUTPUT[..]);
    }

    #[test]
    fn identity_kernel_with_padding_keeps_shape() {
        let shape = TensorShape::new(1, 2, 3, 3);
        let data: Vec<i8> = (0..18).map(|v| v - 9).collect();
        let input = Tensor::new(shape, data.clone()).unwrap();
        let mut filter = vec![0i8; 2 * 9];
        filter[4] = 1;
        filter[9 + 4] = 1;
        let mut params = DepthwiseParams::new(3, 3);
        params.h = params.h.with_padding(1, 1);
        params.w = params.w.with_padding(1, 1);
        // multiplier 0.5 with a left shift of one is the identity
        let quant = vec![QuantParams::new(1 << 30, -1); 2];
        let out = depthwise_conv(&input, &filter, None, &quant, &params).unwrap();
        assert_eq!(out.shape(), shape);
        assert_eq!(out.into_data(), data);
    }

    #[test]
    fn insertion_reads_zeros() {
        // 1x1x2x2 input diluted to 3x3 by one inserted row/column
        let input = Tensor::new(TensorShape::new(1, 1, 2, 2), vec![1i8, 2, 3, 4]).unwrap();
        let mut params = DepthwiseParams::new(1, 1);
        params.h = params.h.with_insertion(1, 0);
        params.w = params.w.with_insertion(1, 0);
        let quant = [QuantParams::new(1 << 30, -1)];
        let out = depthwise_conv(&input, &[1], None, &quant, &params).unwrap();
        assert_eq!(out.shape(), TensorShape::new(1, 1, 3, 3));
        assert_eq!(out.into_data(), vec![1, 0, 2, 0, 0, 0, 3, 0, 4]);
    }

    #[test]
    fn dilation_and_stride() {
        let input = Tensor::new(TensorShape::new(1, 1, 1, 7), (1..=7).collect()).unwrap();
        let mut params = DepthwiseParams::new(1, 2);
        params.w = params.w.with_dilation(3).with_stride(2);
        let quant = [QuantParams::new(1 << 30, -1)];
        let out = depthwise_conv(&input, &[1, 1], None, &quant, &params).unwrap();
        // windows at 0,2 with taps +0,+3
        assert_eq!(out.into_data(), vec![1 + 4, 3 + 6]);
    }

    #[test]
    fn accumulators_include_bias() {
        let input = Tensor::new(TensorShape::new(1, 2, 1, 2), vec![3i8, -4, 10, 20]).unwrap();
        let acc = depthwise_accumulate(&input, &[2, -1], Some(&[100, -100]), &DepthwiseParams::new(1, 1)).unwrap();
        assert_eq!(acc.into_data(), vec![106, 92, -110, -120]);
    }

    #[test]
    fn rejects_short_filter() {
        let input = Tensor::new(TensorShape::new(1, 2, 3, 3), vec![0i8; 18]).unwrap();
        let quant = vec![QuantParams::ZERO; 2];
        assert!(depthwise_conv(&input, &[0; 9], None, &quant, &DepthwiseParams::new(3, 3)).is_err());
    }

    #[test]
    fn chl_quan_layout() {
        let quant = golden::quant();
        let packed = pack_chl_quan(Some(&golden::BIAS), &quant).unwrap();
        assert_eq!(packed.len(), 8 * 9);
        assert_eq!(&packed[..4], &812i32.to_le_bytes());
        assert_eq!(&packed[4..8], &1_155_460_505u32.to_le_bytes());
        assert_eq!(packed[8], 7);

        let (bias, back) = unpack_chl_quan(&packed, 8, true).unwrap();
        assert_eq!(bias.as_deref(), Some(&golden::BIAS[..]));
        assert_eq!(back, quant);

        let no_bias = pack_chl_quan(None, &quant).unwrap();
        assert_eq!(no_bias.len(), 8 * 5);
        assert!(unpack_chl_quan(&no_bias, 8, true).is_err());
    }
}
