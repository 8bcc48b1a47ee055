// SPDX-License-Identifier: AGPL-3.0-only

//! Host models the checks hold the device to.
//!
//! Each model is written straight from the operator definition: integer
//! arithmetic in i64/i128, bf16 sums in f64, relayouts as gathers and the
//! codec as a standalone reader of the stream format. Nothing here calls
//! into `npu_ref`'s kernels, so a numeric slip there shows up as a failed
//! check instead of agreeing with itself.

use anyhow::{bail, ensure, Result};
use npu_chip::{TensorShape, TensorStride};
use npu_ref::bf16::bf16;
use npu_ref::vlc::CommandInfo;
use npu_ref::window::Axis;
use npu_ref::{DepthwiseParams, PoolParams, QuantParams};

fn clamp32(v: i128) -> i128 {
    v.clamp(i128::from(i32::MIN), i128::from(i32::MAX))
}

/// `acc * multiplier / 2^31 / 2^shift` as the requantizer rounds it.
///
/// The high multiply rounds half toward positive infinity; the right
/// shift rounds half away from zero; a left shift saturates first.
pub fn requantize(acc: i32, q: QuantParams) -> i64 {
    if q.multiplier == 0 {
        return 0;
    }
    let shift = i32::from(q.shift);
    let x = if shift < 0 { clamp32(i128::from(acc) << (-shift).min(40)) } else { i128::from(acc) };
    let high = clamp32((x * i128::from(q.multiplier) + (1 << 30)).div_euclid(1 << 31));
    let out = if shift > 0 {
        let e = shift.min(64);
        let magnitude = (high.abs() + (1 << (e - 1))) >> e;
        high.signum() * magnitude
    } else {
        high
    };
    // |out| <= 2^31
    #[allow(clippy::cast_possible_truncation)]
    let out = out as i64;
    out
}

fn clamp_i8(v: i64) -> i8 {
    // clamped into range first
    #[allow(clippy::cast_possible_truncation)]
    let r = v.clamp(-128, 127) as i8;
    r
}

/// Quantized elementwise multiply.
pub fn mul_qm(a: &[i8], b: &[i8], q: QuantParams) -> Vec<i8> {
    a.iter().zip(b).map(|(&x, &y)| clamp_i8(requantize(i32::from(x) * i32::from(y), q))).collect()
}

/// Extended axis: every position is an input index or a zero line.
fn extended_axis(axis: &Axis, dim: usize) -> Vec<Option<usize>> {
    let mut line = vec![None; axis.pad_lo];
    for i in 0..dim {
        line.push(Some(i));
        let gap = if i + 1 == dim { axis.ins_last } else { axis.ins };
        line.resize(line.len() + gap, None);
    }
    line.resize(line.len() + axis.pad_hi, None);
    line
}

/// Extended axis plus the number of window positions that fit on it.
fn walk(axis: &Axis, dim: usize) -> Result<(Vec<Option<usize>>, usize)> {
    ensure!(axis.kernel > 0 && axis.stride > 0 && axis.dilation > 0, "degenerate window {axis:?}");
    let line = extended_axis(axis, dim);
    let reach = (axis.kernel - 1) * axis.dilation;
    let mut count = 0;
    while count * axis.stride + reach < line.len() {
        count += 1;
    }
    ensure!(count > 0, "window {axis:?} does not fit {} positions", line.len());
    Ok((line, count))
}

/// Sum `value(iy, ix) * weight(ky, kx)` over the window at `(oy, ox)`.
fn window_sum(
    (h, w): (&Axis, &Axis),
    (rows, cols): (&[Option<usize>], &[Option<usize>]),
    (oy, ox): (usize, usize),
    mut term: impl FnMut(usize, usize, usize, usize) -> i64,
) -> i64 {
    let mut acc = 0i64;
    for ky in 0..h.kernel {
        let Some(iy) = rows[oy * h.stride + ky * h.dilation] else { continue };
        for kx in 0..w.kernel {
            if let Some(ix) = cols[ox * w.stride + kx * w.dilation] {
                acc += term(iy, ix, ky, kx);
            }
        }
    }
    acc
}

/// Depthwise accumulators, bias included, wrapped to 32 bits.
///
/// # Errors
///
/// Returns error if a buffer disagrees with `shape` or the window does
/// not fit.
pub fn depthwise_acc(
    input: &[i8],
    shape: TensorShape,
    filter: &[i8],
    bias: Option<&[i32]>,
    params: &DepthwiseParams,
) -> Result<(TensorShape, Vec<i32>)> {
    let TensorShape { n, c, h, w } = shape;
    let (kh, kw) = (params.h.kernel, params.w.kernel);
    ensure!(input.len() == n * c * h * w, "input holds {} elements, shape {shape}", input.len());
    ensure!(filter.len() == c * kh * kw, "filter holds {} taps for {c} channels", filter.len());
    ensure!(bias.map_or(true, |b| b.len() == c), "bias length differs from {c} channels");
    let (rows, oh) = walk(&params.h, h)?;
    let (cols, ow) = walk(&params.w, w)?;

    let mut out = Vec::new();
    for ni in 0..n {
        for ci in 0..c {
            let plane = &input[(ni * c + ci) * h * w..][..h * w];
            let taps = &filter[ci * kh * kw..][..kh * kw];
            for oy in 0..oh {
                for ox in 0..ow {
                    let sum = window_sum((&params.h, &params.w), (&rows, &cols), (oy, ox), |iy, ix, ky, kx| {
                        i64::from(plane[iy * w + ix]) * i64::from(taps[ky * kw + kx])
                    });
                    let sum = sum + bias.map_or(0, |b| i64::from(b[ci]));
                    // two's-complement wrap, as the accumulator does
                    #[allow(clippy::cast_possible_truncation)]
                    out.push(sum as i32);
                }
            }
        }
    }
    Ok((TensorShape::new(n, c, oh, ow), out))
}

/// Depthwise convolution with per-channel requantization.
///
/// # Errors
///
/// As [`depthwise_acc`], or a quant list that is not one per channel.
pub fn depthwise(
    input: &[i8],
    shape: TensorShape,
    filter: &[i8],
    bias: Option<&[i32]>,
    quant: &[QuantParams],
    params: &DepthwiseParams,
) -> Result<Vec<i8>> {
    ensure!(quant.len() == shape.c, "{} quant entries for {} channels", quant.len(), shape.c);
    let (oshape, acc) = depthwise_acc(input, shape, filter, bias, params)?;
    let plane = oshape.h * oshape.w;
    Ok(acc.iter().enumerate().map(|(i, &a)| clamp_i8(requantize(a, quant[(i / plane) % shape.c]))).collect())
}

/// Average pooling: weighted window sum, then `floor(sum / 2^rshift + 1/2)`.
///
/// # Errors
///
/// Returns error for a dilated window, `rshift >= 32`, or a window that
/// does not fit.
pub fn avg_pool(input: &[u8], shape: TensorShape, signed: bool, params: &PoolParams) -> Result<Vec<u8>> {
    let TensorShape { n, c, h, w } = shape;
    ensure!(params.h.dilation == 1 && params.w.dilation == 1, "pooling is never dilated");
    ensure!(params.rshift < 32, "rshift {} out of range", params.rshift);
    ensure!(input.len() == n * c * h * w, "input holds {} elements, shape {shape}", input.len());
    let (rows, oh) = walk(&params.h, h)?;
    let (cols, ow) = walk(&params.w, w)?;
    let weight = i64::from(params.avg_const);
    let r = u32::from(params.rshift);

    let mut out = Vec::new();
    for p in 0..n * c {
        let plane = &input[p * h * w..][..h * w];
        for oy in 0..oh {
            for ox in 0..ow {
                let sum = window_sum((&params.h, &params.w), (&rows, &cols), (oy, ox), |iy, ix, _, _| {
                    let raw = plane[iy * w + ix];
                    weight * if signed { i64::from(i8::from_ne_bytes([raw])) } else { i64::from(raw) }
                });
                let v = if r == 0 { sum } else { (sum + (1 << (r - 1))).div_euclid(1 << r) };
                out.push(if signed { clamp_i8(v).to_ne_bytes()[0] } else { u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX) });
            }
        }
    }
    Ok(out)
}

fn widen(byte: u8, signed: bool) -> i16 {
    if signed {
        i16::from(i8::from_ne_bytes([byte]))
    } else {
        i16::from(byte)
    }
}

/// `a >= b` per element as 1 or 0.
pub fn ge(a: &[u8], b: &[u8], signed: bool) -> Vec<u8> {
    a.iter().zip(b).map(|(&x, &y)| u8::from(widen(x, signed) >= widen(y, signed))).collect()
}

/// `min(a, b)` per element, as raw bytes.
pub fn min_const(a: &[u8], b: u8, signed: bool) -> Vec<u8> {
    a.iter().map(|&x| if widen(x, signed) <= widen(b, signed) { x } else { b }).collect()
}

/// Whether `got` is `a + b` (ReLU'd when `relu`) to within bf16 rounding.
///
/// The sum is exact in f64; one rounding to an 8-bit significand moves it
/// by at most `|sum| / 256`.
pub fn bf16_add_close(got: bf16, a: bf16, b: bf16, relu: bool) -> bool {
    let exact = f64::from(a.to_f32()) + f64::from(b.to_f32());
    let exact = if relu && exact < 0.0 { 0.0 } else { exact };
    (f64::from(got.to_f32()) - exact).abs() <= exact.abs() / 256.0
}

/// Source element index of every destination element, in destination
/// order.
pub mod gather {
    use super::TensorShape;

    /// `dst[n][w][h][c] = src[n][c][h][w]`.
    pub fn cw_transpose(shape: TensorShape) -> Vec<usize> {
        let TensorShape { n, c, h, w } = shape;
        let mut order = Vec::with_capacity(shape.size());
        for ni in 0..n {
            for wi in 0..w {
                for hi in 0..h {
                    for ci in 0..c {
                        order.push(((ni * c + ci) * h + hi) * w + wi);
                    }
                }
            }
        }
        order
    }

    /// `dst[c][n][hw] = src[n][c][hw]`.
    pub fn nc_transpose(shape: TensorShape) -> Vec<usize> {
        let (n, c, hw) = (shape.n, shape.c, shape.h * shape.w);
        (0..c).flat_map(|ci| (0..n).flat_map(move |ni| (0..hw).map(move |p| (ni * c + ci) * hw + p))).collect()
    }

    /// NCHW destination of an NHWC source.
    pub fn nhwc_to_nchw(shape: TensorShape) -> Vec<usize> {
        let TensorShape { n, c, h, w } = shape;
        let mut order = Vec::with_capacity(shape.size());
        for ni in 0..n {
            for ci in 0..c {
                for hi in 0..h {
                    for wi in 0..w {
                        order.push(((ni * h + hi) * w + wi) * c + ci);
                    }
                }
            }
        }
        order
    }
}

/// Copy `es`-byte elements of `src` in `order`.
pub fn gather_elements(src: &[u8], es: usize, order: &[usize]) -> Vec<u8> {
    order.iter().flat_map(|&i| &src[i * es..(i + 1) * es]).copied().collect()
}

/// Destination of a strided write, read back position by position.
///
/// Positions no element maps to read `0xcf` in their low byte.
pub fn strided(src: &[u8], shape: TensorShape, stride: &TensorStride, es: usize) -> Vec<u8> {
    let TensorShape { n, c, h, w } = shape;
    let mut out = Vec::with_capacity(n * stride.n);
    for off in (0..n * stride.n).step_by(es) {
        let (ni, rest) = (off / stride.n, off % stride.n);
        let (ci, rest) = (rest / stride.c, rest % stride.c);
        let (hi, rest) = (rest / stride.h, rest % stride.h);
        let wi = rest / es;
        if ci < c && hi < h && wi < w {
            let i = ((ni * c + ci) * h + hi) * w + wi;
            out.extend_from_slice(&src[i * es..(i + 1) * es]);
        } else {
            out.push(0xcf);
            out.resize(out.len() + es - 1, 0);
        }
    }
    out
}

/// bf16 word of an 8-bit integer: exact, so the low half of its f32 is zero.
pub fn int8_to_bf16(byte: u8, signed: bool) -> u16 {
    let bits = f32::from(widen(byte, signed)).to_bits();
    // integers below 2^8 need at most 8 significant bits
    #[allow(clippy::cast_possible_truncation)]
    let word = (bits >> 16) as u16;
    word
}

/// Fields of a codec stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlcHeader {
    /// Settings recorded in the flag and bias bytes.
    pub cmd: CommandInfo,
    /// Decoded length in bytes.
    pub original_len: usize,
    /// Payload bytes before padding.
    pub payload_len: usize,
}

impl VlcHeader {
    /// Read the 16-byte header.
    ///
    /// # Errors
    ///
    /// Returns error for a short stream, unknown flags or version.
    pub fn read(stream: &[u8]) -> Result<Self> {
        ensure!(stream.len() >= 16, "{} bytes cannot hold a header", stream.len());
        let flags = stream[0];
        ensure!(flags & !0b111 == 0, "unknown flags {flags:#04x}");
        ensure!(stream[3] == 1, "stream version {}", stream[3]);
        let le = |at: usize| u32::from_le_bytes([stream[at], stream[at + 1], stream[at + 2], stream[at + 3]]);
        Ok(Self {
            cmd: CommandInfo {
                signedness: flags & 1 != 0,
                is_bf16: flags & 2 != 0,
                bias0: stream[1],
                bias1: stream[2],
                zero_guard: flags & 4 != 0,
            },
            original_len: usize::try_from(le(4))?,
            payload_len: usize::try_from(le(8))?,
        })
    }
}

/// Byte of each symbol, symbol-indexed.
fn symbol_bytes(cmd: &CommandInfo) -> Vec<u8> {
    if cmd.signedness && !cmd.is_bf16 {
        return (0u16..256)
            .map(|s| match s {
                0 => 0,
                s if s % 2 == 0 => {
                    let p = (s / 2 - 1 + u16::from(cmd.bias0)) % 127 + 1;
                    u8::try_from(p).unwrap_or(0)
                }
                s => {
                    let m = ((s + 1) / 2 - 1 + u16::from(cmd.bias1)) % 128 + 1;
                    u8::try_from(256 - m).unwrap_or(0)
                }
            })
            .collect();
    }
    let b = i16::from(cmd.bias0);
    let mut order = vec![cmd.bias0];
    for d in 1..=255i16 {
        for v in [b + d, b - d] {
            if let Ok(v) = u8::try_from(v) {
                order.push(v);
            }
        }
    }
    if cmd.zero_guard && cmd.bias0 != 0 {
        order.retain(|&v| v != 0);
        order.insert(0, 0);
    }
    order
}

struct Bits<'a> {
    data: &'a [u8],
    at: usize,
}

impl Bits<'_> {
    fn take(&mut self, n: u32) -> Result<u32> {
        let mut v = 0;
        for i in 0..n {
            let Some(&byte) = self.data.get(self.at / 8) else {
                bail!("payload ends after {} bits", self.at);
            };
            v |= u32::from((byte >> (self.at % 8)) & 1) << i;
            self.at += 1;
        }
        Ok(v)
    }
}

/// Decode a codec stream.
///
/// # Errors
///
/// Returns error when a section runs past the end of `stream` or a block
/// holds something no encoder writes.
pub fn vlc_expand(stream: &[u8]) -> Result<Vec<u8>> {
    let header = VlcHeader::read(stream)?;
    let is_bf16 = header.cmd.is_bf16;
    ensure!(!is_bf16 || header.original_len % 2 == 0, "odd bf16 length {}", header.original_len);
    let count = if is_bf16 { header.original_len / 2 } else { header.original_len };
    let align = |v: usize| v.div_ceil(16) * 16;
    let kmap_at = 16;
    let payload_at = kmap_at + align(count.div_ceil(16).div_ceil(2));
    let tail_at = payload_at + align(header.payload_len);
    let end = tail_at + if is_bf16 { align(count) } else { 0 };
    ensure!(stream.len() >= end, "stream of {} bytes, sections need {end}", stream.len());
    ensure!(count <= header.payload_len * 8, "{count} symbols in a {}-byte payload", header.payload_len);

    let table = symbol_bytes(&header.cmd);
    let mut bits = Bits { data: &stream[payload_at..payload_at + header.payload_len], at: 0 };
    let mut coded = Vec::with_capacity(count);
    for i in 0..count {
        let k = (stream[kmap_at + i / 32] >> (4 * ((i / 16) % 2))) & 0xf;
        let sym = match k {
            0xf => bits.take(8)?,
            0..=5 => {
                let mut q = 0u32;
                while bits.take(1)? == 1 {
                    q += 1;
                    ensure!(q <= 47, "unary run over 47 at symbol {i}");
                }
                (q << k) | bits.take(u32::from(k))?
            }
            other => bail!("block order {other:#x}"),
        };
        let sym = usize::try_from(sym)?;
        ensure!(sym < 256, "symbol {sym} at {i}");
        coded.push(table[sym]);
    }
    if !is_bf16 {
        return Ok(coded);
    }
    let tail = &stream[tail_at..tail_at + count];
    Ok(coded
        .iter()
        .zip(tail)
        .flat_map(|(&e, &sm)| {
            let word = (u16::from(sm & 0x80) << 8) | (u16::from(e) << 7) | u16::from(sm & 0x7f);
            word.to_le_bytes()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use npu_ref::conv::golden;
    use npu_ref::vlc::vlc_compress;

    #[test]
    fn requantize_rounding() {
        // 3 * 2^30 / 2^31 = 1.5 rounds up; -1.5 rounds up to -1
        let half = QuantParams::new(1 << 30, 0);
        assert_eq!(requantize(3, half), 2);
        assert_eq!(requantize(-3, half), -1);
        // right shift rounds half away from zero
        let quarter = QuantParams::new(1 << 30, 1);
        assert_eq!(requantize(3, quarter), 1);
        assert_eq!(requantize(6, quarter), 2);
        assert_eq!(requantize(-6, quarter), -2);
        // a left shift saturates before the multiply
        assert_eq!(requantize(i32::MAX, QuantParams::new(1 << 31, -4)), i64::from(i32::MAX));
        assert_eq!(requantize(-5, QuantParams::ZERO), 0);
    }

    #[test]
    fn recorded_mul_vector() {
        let q = QuantParams::new(1_077_952_640, 6);
        assert_eq!(mul_qm(&[-102, 25, 115, 89], &[77, 51, 115, 102], q), vec![-62, 10, 104, 71]);
    }

    #[test]
    fn recorded_depthwise_case() {
        let out = depthwise(
            &golden::INPUT,
            golden::INPUT_SHAPE,
            &golden::FILTER,
            Some(&golden::BIAS[..]),
            &golden::quant(),
            &DepthwiseParams::new(3, 3),
        )
        .unwrap();
        assert_eq!(out, golden::OUTPUT.to_vec());
    }

    #[test]
    fn pool_mean_with_padding() {
        let mut params = PoolParams::new(1, 3, 1, 0);
        params.w = params.w.with_padding(1, 0).with_insertion(1, 0);
        // extended row: 0, 8, 0, 8
        let out = avg_pool(&[8, 8], TensorShape::new(1, 1, 1, 2), false, &params).unwrap();
        assert_eq!(out, vec![8, 16]);
        // -3 / 2 rounds half up to -1
        let out = avg_pool(&[0xfd, 0], TensorShape::new(1, 1, 1, 2), true, &PoolParams::new(1, 2, 1, 1)).unwrap();
        assert_eq!(out, vec![0xff]);
    }

    #[test]
    fn bf16_add_tolerance() {
        let b = bf16::from_f32;
        assert!(bf16_add_close(b(3.0), b(1.0), b(2.0), false));
        assert!(!bf16_add_close(bf16::from_bits(b(3.0).to_bits() + 1), b(1.0), b(2.0), false));
        assert!(bf16_add_close(bf16::ZERO, b(-5.0), b(2.0), true));
        assert!(!bf16_add_close(b(-3.0), b(-5.0), b(2.0), true));
    }

    #[test]
    fn gathers_small_shapes() {
        let shape = TensorShape::new(1, 2, 1, 3);
        assert_eq!(gather::cw_transpose(shape), vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(gather::nc_transpose(TensorShape::new(2, 2, 1, 1)), vec![0, 2, 1, 3]);
        assert_eq!(gather_elements(&[1, 2, 3, 4], 2, &[1, 0]), vec![3, 4, 1, 2]);
        let stride = TensorStride { n: 8, c: 4, h: 4, w: 1 };
        let out = strided(&[1, 2, 3, 4], TensorShape::new(1, 2, 1, 2), &stride, 1);
        assert_eq!(out, vec![1, 2, 0xcf, 0xcf, 3, 4, 0xcf, 0xcf]);
        assert_eq!(int8_to_bf16(0xff, true), 0xbf80);
        assert_eq!(int8_to_bf16(0xff, false), 0x437f);
    }

    #[test]
    fn expands_encoder_streams() {
        let data: Vec<u8> = (0..700u32).map(|i| (i * 37 % 251) as u8).collect();
        for cmd in [
            CommandInfo::new(true, false).with_bias(3, 9),
            CommandInfo::new(false, false).with_bias(120, 0).with_zero_guard(true),
            CommandInfo::new(false, true).with_bias(127, 0),
        ] {
            let stream = vlc_compress(&data, &cmd).unwrap();
            assert_eq!(VlcHeader::read(&stream).unwrap().cmd, cmd);
            assert_eq!(vlc_expand(&stream).unwrap(), data, "{cmd:?}");
        }
    }

    #[test]
    fn rejects_damaged_streams() {
        let stream = vlc_compress(&[9u8; 64], &CommandInfo::default()).unwrap();
        assert!(vlc_expand(&stream[..stream.len() - 16]).is_err());
        let mut bad = stream.to_vec();
        bad[4..8].copy_from_slice(&100_000u32.to_le_bytes());
        assert!(vlc_expand(&bad).is_err());
    }
}
