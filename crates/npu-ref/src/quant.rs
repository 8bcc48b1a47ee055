//! Fixed-point requantization primitives.
//!
//! A real scale factor is carried as a Q31 `multiplier` plus a `shift`
//! (positive = right shift, negative = left shift). Applying it is a
//! saturating rounding doubling high-multiply followed by a rounding
//! divide by a power of two, the same sequence the TIU performs on its
//! 32-bit accumulators.

/// Two-part fixed-point scale: `value * multiplier / 2^31 / 2^shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuantParams {
    /// Q31 multiplier.
    pub multiplier: u32,
    /// Right shift when positive, left shift when negative.
    pub shift: i8,
}

impl QuantParams {
    /// Scale that maps every input to zero.
    pub const ZERO: Self = Self { multiplier: 0, shift: 0 };

    /// Create a parameter pair.
    pub const fn new(multiplier: u32, shift: i8) -> Self {
        Self { multiplier, shift }
    }

    /// Apply the scale to one accumulator.
    #[must_use]
    pub fn apply(&self, value: i32) -> i32 {
        multiply_by_quantized_multiplier(value, self.multiplier, self.shift)
    }

    /// The real scale these parameters approximate.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        f64::from(self.multiplier) / f64::from(1u32 << 31) / 2f64.powi(i32::from(self.shift))
    }
}

fn saturate_i64_to_i32(v: i64) -> i32 {
    // clamp guarantees the value fits
    #[allow(clippy::cast_possible_truncation)]
    let r = v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    r
}

/// `round(a * b / 2^31)` with ties toward positive infinity, saturated
/// to i32.
///
/// `b` is a Q31 multiplier; values above `i32::MAX` are accepted and simply
/// saturate more often.
#[must_use]
pub fn saturating_rounding_doubling_high_mul(a: i32, b: u32) -> i32 {
    let ab = i64::from(a) * i64::from(b);
    let nudge = if ab >= 0 { 1i64 << 30 } else { 1 - (1i64 << 30) };
    // i64 division truncates toward zero
    saturate_i64_to_i32((ab + nudge) / (1i64 << 31))
}

/// Divide by `2^exponent`, rounding to nearest with ties away from zero.
#[must_use]
pub fn rounding_divide_by_pot(x: i32, exponent: u32) -> i32 {
    if exponent == 0 {
        return x;
    }
    let exponent = exponent.min(62);
    let x = i64::from(x);
    let mask = (1i64 << exponent) - 1;
    let remainder = x & mask;
    let threshold = (mask >> 1) + i64::from(x < 0);
    saturate_i64_to_i32((x >> exponent) + i64::from(remainder > threshold))
}

/// Scale `value` by `multiplier / 2^31`, then by `2^-shift`.
///
/// * `shift > 0`: high-multiply, then rounding right shift.
/// * `shift < 0`: saturating left shift of `value`, then high-multiply.
/// * `multiplier == 0`: always `0`.
#[must_use]
pub fn multiply_by_quantized_multiplier(value: i32, multiplier: u32, shift: i8) -> i32 {
    if multiplier == 0 {
        return 0;
    }
    let left = u32::from((-i16::from(shift)).max(0).unsigned_abs());
    let right = u32::from(shift.max(0).unsigned_abs());

    let shifted = if left == 0 {
        value
    } else if left >= 32 {
        match value.signum() {
            1 => i32::MAX,
            -1 => i32::MIN,
            _ => 0,
        }
    } else {
        saturate_i64_to_i32(i64::from(value) << left)
    };

    rounding_divide_by_pot(saturating_rounding_doubling_high_mul(shifted, multiplier), right)
}

/// Clamp to the signed 8-bit range.
#[must_use]
pub fn saturate_i8(v: i32) -> i8 {
    #[allow(clippy::cast_possible_truncation)]
    let r = v.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8;
    r
}

/// Clamp to the unsigned 8-bit range.
#[must_use]
pub fn saturate_u8(v: i32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let r = v.clamp(0, i32::from(u8::MAX)) as u8;
    r
}

/// Right shift with round-half-up, as the 8-bit output stage does it.
///
/// `rshift == 0` leaves `x` unchanged.
#[must_use]
pub fn rshift_round_half_up(x: i32, rshift: u8) -> i32 {
    if rshift == 0 {
        return x;
    }
    let r = u32::from(rshift).min(63);
    let half = i64::from(x) >> (r - 1);
    saturate_i64_to_i32((half + 1) >> 1)
}

/// Split `x` into a mantissa in `[0.5, 1)` and a power of two.
///
/// Zero, infinities and NaN are returned unchanged with exponent 0.
#[must_use]
pub fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let biased = i32::try_from((bits >> 52) & 0x7ff).unwrap_or(0);
    if biased == 0 {
        // subnormal: renormalise first
        let (m, e) = frexp(x * 2f64.powi(64));
        return (m, e - 64);
    }
    let mantissa = f64::from_bits((bits & !(0x7ffu64 << 52)) | (1022u64 << 52));
    (mantissa, biased - 1022)
}

/// Decompose a positive real scale into `(multiplier, shift)`.
///
/// Scales below one give a non-negative shift; scales of one or more give a
/// negative (left) shift. Returns `None` for non-positive or non-finite
/// scales and for scales whose shift does not fit in `i8`.
#[must_use]
pub fn quantize_multiplier(scale: f64) -> Option<QuantParams> {
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }
    let (mantissa, mut exp) = frexp(scale);
    #[allow(clippy::cast_possible_truncation)]
    let mut q = (mantissa * f64::from(1u32 << 31)).round() as i64;
    if q == 1i64 << 31 {
        q /= 2;
        exp += 1;
    }
    let shift = i8::try_from(-exp).ok()?;
    let multiplier = u32::try_from(q).ok()?;
    Some(QuantParams { multiplier, shift })
}

/// [`quantize_multiplier`] restricted to `0 < scale < 1`.
#[must_use]
pub fn quantize_multiplier_smaller_than_one(scale: f64) -> Option<QuantParams> {
    if scale < 1.0 {
        quantize_multiplier(scale)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_mul_case() {
        let a = [-102i32, 25, 115, 89];
        let b = [77i32, 51, 115, 102];
        let expected = [-62, 10, 104, 71];
        for i in 0..4 {
            assert_eq!(multiply_by_quantized_multiplier(a[i] * b[i], 1_077_952_640, 6), expected[i]);
        }
    }

    #[test]
    fn zero_multiplier_gives_zero() {
        assert_eq!(multiply_by_quantized_multiplier(i32::MAX, 0, 3), 0);
        assert_eq!(multiply_by_quantized_multiplier(-5, 0, -3), 0);
    }

    #[test]
    fn rounding_divide_ties_away_from_zero() {
        assert_eq!(rounding_divide_by_pot(5, 1), 3);
        assert_eq!(rounding_divide_by_pot(-5, 1), -3);
        assert_eq!(rounding_divide_by_pot(4, 1), 2);
        assert_eq!(rounding_divide_by_pot(-7, 2), -2);
        assert_eq!(rounding_divide_by_pot(6, 2), 2);
    }

    #[test]
    fn high_mul_saturates() {
        assert_eq!(saturating_rounding_doubling_high_mul(i32::MIN, 1 << 31), i32::MIN);
        assert_eq!(saturating_rounding_doubling_high_mul(i32::MAX, u32::MAX), i32::MAX);
        // half of one in Q31
        assert_eq!(saturating_rounding_doubling_high_mul(1000, 1 << 30), 500);
        // ties round up on both signs
        assert_eq!(saturating_rounding_doubling_high_mul(3, 1 << 30), 2);
        assert_eq!(saturating_rounding_doubling_high_mul(-3, 1 << 30), -1);
    }

    #[test]
    fn negative_shift_is_left_shift() {
        let half = 1u32 << 30;
        assert_eq!(multiply_by_quantized_multiplier(100, half, -2), 200);
        assert_eq!(multiply_by_quantized_multiplier(i32::MAX / 2, half, -4), 1 << 30);
        assert_eq!(multiply_by_quantized_multiplier(-3, half, -40), i32::MIN / 2);
    }

    #[test]
    fn saturation_never_wraps() {
        // 127 * 127 * 9 scaled by 0.5 overflows the 8-bit range before clamping
        let acc = 127 * 127 * 9;
        let v = multiply_by_quantized_multiplier(acc, 1 << 30, 0);
        assert_eq!(saturate_i8(v), 127);
        assert_eq!(saturate_i8(-v), -128);
        assert_eq!(saturate_u8(-v), 0);
        assert_eq!(saturate_u8(v), 255);
    }

    #[test]
    fn round_half_up_output_stage() {
        assert_eq!(rshift_round_half_up(7, 0), 7);
        assert_eq!(rshift_round_half_up(6, 2), 2);
        assert_eq!(rshift_round_half_up(5, 1), 3);
        assert_eq!(rshift_round_half_up(-5, 1), -2);
        assert_eq!(rshift_round_half_up(-6, 2), -1);
    }

    #[test]
    fn frexp_normalises() {
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(0.75), (0.75, 0));
        assert_eq!(frexp(0.1).1, -3);
        let (m, e) = frexp(f64::MIN_POSITIVE / 4.0);
        assert!((0.5..1.0).contains(&m));
        assert_eq!(e, -1023);
    }

    #[test]
    fn quantize_round_trips_scale() {
        for scale in [0.5, 0.0123, 0.999_999, 1.0 / 3.0, 3.5] {
            let q = quantize_multiplier(scale).unwrap();
            assert!(q.multiplier >= 1 << 30);
            assert!((q.to_f64() - scale).abs() / scale < 1e-8, "{scale}: {q:?}");
        }
        assert!(quantize_multiplier_smaller_than_one(1.0).is_none());
        assert!(quantize_multiplier(0.0).is_none());
        assert!(quantize_multiplier(-0.5).is_none());
        assert_eq!(quantize_multiplier(2.0).unwrap().shift, -2);
    }

    #[test]
    fn quantized_scale_tracks_float_scale() {
        let q = quantize_multiplier(0.01).unwrap();
        assert_eq!(q.apply(10_000), 100);
        assert_eq!(q.apply(-10_050), -101);
    }
}
