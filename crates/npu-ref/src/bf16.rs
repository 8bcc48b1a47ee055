//! bfloat16 conversions used by the reference layer.
//!
//! Device buffers carry bf16 as raw `u16` words; arithmetic goes through
//! [`half::bf16`], whose operators compute in f32 and round back to bf16
//! with round-to-nearest-even, matching the TIU's bf16 datapath.

pub use half::bf16;

/// Round an f32 to bf16 bits (nearest, ties to even; NaN stays NaN).
#[must_use]
pub fn f32_to_bf16(v: f32) -> u16 {
    bf16::from_f32(v).to_bits()
}

/// Widen bf16 bits to f32 (exact).
#[must_use]
pub fn bf16_to_f32(bits: u16) -> f32 {
    bf16::from_bits(bits).to_f32()
}

/// Convert bf16 bits to i8: round half to even, saturate, NaN becomes 0.
#[must_use]
pub fn convert_bf16_s8(bits: u16) -> i8 {
    let v = bf16_to_f32(bits);
    if v.is_nan() {
        return 0;
    }
    // clamped into i8 range before the cast
    #[allow(clippy::cast_possible_truncation)]
    let r = round_half_even(v).clamp(f32::from(i8::MIN), f32::from(i8::MAX)) as i8;
    r
}

/// Convert one 8-bit element to bf16 bits, reading it as i8 when `signed`.
#[must_use]
pub fn convert_int8_bf16(byte: u8, signed: bool) -> u16 {
    let v = if signed { f32::from(i8::from_ne_bytes([byte])) } else { f32::from(byte) };
    f32_to_bf16(v)
}

fn round_half_even(v: f32) -> f32 {
    let r = v.round();
    if (r - v).abs() == 0.5 && r % 2.0 != 0.0 {
        r - v.signum()
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_to_bf16_is_nearest_even() {
        // 1 + 2^-8 is a tie between 1.0 and 1 + 2^-7: even mantissa wins
        assert_eq!(f32_to_bf16(1.0 + 1.0 / 256.0), 0x3f80);
        // 1 + 3 * 2^-8 ties upward to the even neighbour
        assert_eq!(f32_to_bf16(1.0 + 3.0 / 256.0), 0x3f82);
        assert_eq!(f32_to_bf16(-2.0), 0xc000);
        assert_eq!(bf16_to_f32(0x3f80), 1.0);
    }

    #[test]
    fn bf16_to_s8() {
        assert_eq!(convert_bf16_s8(f32_to_bf16(2.5)), 2);
        assert_eq!(convert_bf16_s8(f32_to_bf16(3.5)), 4);
        assert_eq!(convert_bf16_s8(f32_to_bf16(-1.5)), -2);
        assert_eq!(convert_bf16_s8(f32_to_bf16(300.0)), 127);
        assert_eq!(convert_bf16_s8(f32_to_bf16(-300.0)), -128);
        assert_eq!(convert_bf16_s8(0x7fc0), 0);
    }

    #[test]
    fn int8_to_bf16() {
        assert_eq!(bf16_to_f32(convert_int8_bf16(0xff, true)), -1.0);
        assert_eq!(bf16_to_f32(convert_int8_bf16(0xff, false)), 255.0);
        assert_eq!(bf16_to_f32(convert_int8_bf16(0x80, true)), -128.0);
    }
}
