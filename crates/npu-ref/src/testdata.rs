//! Random operands and operator parameters.
//!
//! Every generator takes the caller's RNG so a run is reproducible from one
//! seed. Parameter generators only return legal configurations: they retry
//! internally and give up with `None` after [`PARAM_RETRIES`] draws.

use crate::bf16::f32_to_bf16;
use crate::conv::DepthwiseParams;
use crate::policy::choose_from_range;
use crate::pool::PoolParams;
use npu_chip::TensorShape;
use rand::Rng;

/// Draws before a parameter generator gives up.
pub const PARAM_RETRIES: usize = 100;

/// One in this many random elements is pinned to a range extreme.
const SATURATION_ODDS: u32 = 1000;

/// Random i8 data, mostly in `-127..=127` with rare `-128`/`127` extremes.
pub fn fill_random_i8<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i8> {
    (0..len)
        .map(|_| {
            let negative = rng.gen_bool(0.5);
            if rng.gen_range(0..SATURATION_ODDS) == 1 {
                if negative {
                    i8::MIN
                } else {
                    i8::MAX
                }
            } else {
                let v: i8 = rng.gen_range(0..=127);
                if negative {
                    -v
                } else {
                    v
                }
            }
        })
        .collect()
}

/// Random per-channel bias, small values with rare i32 extremes.
pub fn fill_random_bias<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i32> {
    (0..len)
        .map(|_| {
            if rng.gen_range(0..SATURATION_ODDS) == 1 {
                if rng.gen_bool(0.5) {
                    i32::MIN
                } else {
                    i32::MAX
                }
            } else {
                rng.gen_range(-127..=127)
            }
        })
        .collect()
}

/// Uniform random bytes.
pub fn fill_random_u8<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// A random average-pooling case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolCase {
    /// Input shape.
    pub shape: TensorShape,
    /// Whether input bytes are i8.
    pub signed: bool,
    /// Window, weight and shift.
    pub params: PoolParams,
}

/// Draw a legal pooling case for a chip with `npu_num` lanes.
///
/// `stride` fixes both strides (the large 15/16/31 cases); `None` draws
/// them from `1..=kh`. Kernel sizes are `1..=7`; padding and insertion stay
/// below the kernel size.
pub fn random_pool_case<R: Rng + ?Sized>(rng: &mut R, npu_num: usize, stride: Option<usize>) -> Option<PoolCase> {
    let extra = stride.unwrap_or(0);
    for _ in 0..PARAM_RETRIES {
        let shape = TensorShape::new(
            rng.gen_range(1..=5),
            rng.gen_range(1..=3 * npu_num),
            rng.gen_range(3..33) + extra,
            rng.gen_range(6..36) + extra,
        );
        let (kh, kw) = (rng.gen_range(1..=7), rng.gen_range(1..=7));
        let mut params = PoolParams::new(kh, kw, rng.gen(), rng.gen_range(0..32));
        params.h = params
            .h
            .with_stride(stride.unwrap_or_else(|| rng.gen_range(1..=kh)))
            .with_insertion(rng.gen_range(0..kh), rng.gen_range(0..kh))
            .with_padding(rng.gen_range(0..kh), rng.gen_range(0..kh));
        params.w = params
            .w
            .with_stride(stride.unwrap_or_else(|| rng.gen_range(1..=kw)))
            .with_insertion(rng.gen_range(0..kw), rng.gen_range(0..kw))
            .with_padding(rng.gen_range(0..kw), rng.gen_range(0..kw));
        if params.output_shape(shape).is_ok() {
            return Some(PoolCase { shape, signed: rng.gen_bool(0.5), params });
        }
    }
    None
}

/// A random depthwise convolution case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthwiseCase {
    /// Input shape; the output channel count equals `shape.c`.
    pub shape: TensorShape,
    /// Window parameters.
    pub params: DepthwiseParams,
    /// Whether a per-channel bias is present.
    pub has_bias: bool,
}

const BATCH_RANGE: [usize; 3] = [1, 2, 3];
const EDGE_RANGE: [usize; 4] = [1, 3, 11, 24];
const KERNEL_RANGE: [usize; 3] = [1, 3, 6];
const STRIDE_RANGE: [usize; 3] = [1, 3, 5];

fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[usize]) -> usize {
    let i = rng.gen_range(0..table.len());
    choose_from_range(rng, table, i)
}

/// Draw a legal depthwise case with channels in `1..=2 * npu_num`.
pub fn random_depthwise_case<R: Rng + ?Sized>(rng: &mut R, npu_num: usize) -> Option<DepthwiseCase> {
    for _ in 0..PARAM_RETRIES {
        let shape = TensorShape::new(
            pick(rng, &BATCH_RANGE),
            rng.gen_range(1..=2 * npu_num),
            pick(rng, &EDGE_RANGE),
            pick(rng, &EDGE_RANGE),
        );
        let (kh, kw) = (pick(rng, &KERNEL_RANGE), pick(rng, &KERNEL_RANGE));
        let mut params = DepthwiseParams::new(kh, kw);
        params.h = params
            .h
            .with_stride(pick(rng, &STRIDE_RANGE))
            .with_dilation(rng.gen_range(1..=2))
            .with_padding(rng.gen_range(0..kh), rng.gen_range(0..kh))
            .with_insertion(rng.gen_range(0..2), rng.gen_range(0..2));
        params.w = params
            .w
            .with_stride(pick(rng, &STRIDE_RANGE))
            .with_dilation(rng.gen_range(1..=2))
            .with_padding(rng.gen_range(0..kw), rng.gen_range(0..kw))
            .with_insertion(rng.gen_range(0..2), rng.gen_range(0..2));
        if params.output_shape(shape).is_ok() {
            return Some(DepthwiseCase { shape, params, has_bias: rng.gen_bool(0.5) });
        }
    }
    None
}

/// Compressible test data for the VLC codec.
///
/// Values cluster around a small centre with a share of exact zeros, the
/// shape of real activations and weights. bf16 data is returned as
/// little-endian bytes of values in `[-8, 8)`.
pub fn vlc_test_data<R: Rng + ?Sized>(rng: &mut R, len: usize, signed: bool, is_bf16: bool) -> Vec<u8> {
    if is_bf16 {
        let elems = len / 2;
        let mut out = Vec::with_capacity(len);
        for _ in 0..elems {
            let v = if rng.gen_bool(0.2) { 0.0 } else { rng.gen_range(-8.0f32..8.0) };
            out.extend_from_slice(&f32_to_bf16(v).to_le_bytes());
        }
        out.resize(len, 0);
        return out;
    }
    let centre: i32 = if signed { 0 } else { rng.gen_range(0..=200) };
    (0..len)
        .map(|_| {
            let v = if rng.gen_bool(0.25) {
                0
            } else if rng.gen_bool(0.05) {
                rng.gen_range(-128..=255)
            } else {
                centre + rng.gen_range(-12..=12)
            };
            if signed {
                i8::try_from(v.clamp(-128, 127)).map_or(0, |b| b.to_ne_bytes()[0])
            } else {
                u8::try_from(v.clamp(0, 255)).unwrap_or(0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_i8_covers_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = fill_random_i8(&mut rng, 10_000);
        assert!(v.iter().any(|&x| x < -100));
        assert!(v.iter().any(|&x| x > 100));
    }

    #[test]
    fn pool_cases_are_legal() {
        let mut rng = StdRng::seed_from_u64(2);
        for stride in [None, Some(15), Some(16), Some(31)] {
            for _ in 0..20 {
                let case = random_pool_case(&mut rng, 8, stride).unwrap();
                assert!(case.params.output_shape(case.shape).is_ok());
                assert!(case.shape.c <= 24);
                assert!(case.params.rshift < 32);
                assert!(case.params.h.pad_lo < case.params.h.kernel);
                if let Some(s) = stride {
                    assert_eq!(case.params.w.stride, s);
                }
            }
        }
    }

    #[test]
    fn depthwise_cases_are_legal() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let case = random_depthwise_case(&mut rng, 2).unwrap();
            assert!(case.params.output_shape(case.shape).is_ok());
            assert!((1..=4).contains(&case.shape.c));
        }
    }

    #[test]
    fn same_seed_same_data() {
        let a = vlc_test_data(&mut StdRng::seed_from_u64(9), 256, true, false);
        let b = vlc_test_data(&mut StdRng::seed_from_u64(9), 256, true, false);
        assert_eq!(a, b);
        assert!(a.iter().any(|&x| x == 0));
    }

    #[test]
    fn bf16_data_has_even_length_payload() {
        let d = vlc_test_data(&mut StdRng::seed_from_u64(4), 64, false, true);
        assert_eq!(d.len(), 64);
    }
}
