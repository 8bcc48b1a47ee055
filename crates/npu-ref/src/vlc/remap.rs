//! Byte to symbol remapping.
//!
//! Entropy coding works best when frequent values get small symbols. The
//! remap is a bijection on `0..=255` parameterised by the block biases:
//!
//! * signed bytes: positives rotate so `bias0 + 1` becomes 1, negative
//!   magnitudes rotate so `bias1 + 1` becomes 1, then zigzag
//!   (`0, -1, 1, -2, 2, ...`). Zero is always symbol 0.
//! * unsigned bytes and bf16 exponents: values are ranked by distance from
//!   `bias0`, alternating above and below, and once one side is exhausted
//!   the other continues alone. With the zero guard on, zero is moved to
//!   symbol 0 and the ranks before it shift up by one.

use super::CommandInfo;

const POSITIVES: u32 = 127;
const NEGATIVES: u32 = 128;

/// Forward and inverse symbol tables for one [`CommandInfo`].
#[derive(Debug, Clone)]
pub(crate) struct SymbolMap {
    to_symbol: [u8; 256],
    to_byte: [u8; 256],
}

impl SymbolMap {
    /// Build the map. Biases must already be in range (see
    /// [`CommandInfo::validate`]).
    pub(crate) fn new(cmd: &CommandInfo) -> Self {
        let signed = cmd.signedness && !cmd.is_bf16;
        let mut to_symbol = [0u8; 256];
        let mut to_byte = [0u8; 256];
        for byte in 0..=255u8 {
            let sym = if signed {
                signed_symbol(byte, cmd.bias0, cmd.bias1)
            } else {
                unsigned_symbol(byte, cmd.bias0, cmd.zero_guard)
            };
            to_symbol[usize::from(byte)] = sym;
            to_byte[usize::from(sym)] = byte;
        }
        Self { to_symbol, to_byte }
    }

    pub(crate) fn symbol(&self, byte: u8) -> u8 {
        self.to_symbol[usize::from(byte)]
    }

    pub(crate) fn byte(&self, symbol: u8) -> u8 {
        self.to_byte[usize::from(symbol)]
    }
}

fn narrow(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

fn signed_symbol(byte: u8, bias0: u8, bias1: u8) -> u8 {
    let v = i8::from_ne_bytes([byte]);
    match v.signum() {
        0 => 0,
        1 => {
            let p = u32::from(v.unsigned_abs());
            let rotated = (p - 1 + POSITIVES - u32::from(bias0)) % POSITIVES + 1;
            narrow(rotated * 2)
        }
        _ => {
            let m = u32::from(v.unsigned_abs());
            let rotated = (m - 1 + NEGATIVES - u32::from(bias1)) % NEGATIVES + 1;
            narrow(rotated * 2 - 1)
        }
    }
}

/// Rank of `value` by distance from `bias`, ignoring the zero guard.
fn rank(value: u8, bias: u8) -> u32 {
    let (v, b) = (u32::from(value), u32::from(bias));
    let below = b;
    let above = 255 - b;
    let both = below.min(above);
    let d = v.abs_diff(b);
    if d == 0 {
        0
    } else if d <= both {
        if v > b {
            2 * d - 1
        } else {
            2 * d
        }
    } else {
        2 * both + (d - both)
    }
}

fn unsigned_symbol(byte: u8, bias: u8, zero_guard: bool) -> u8 {
    let r = rank(byte, bias);
    if !zero_guard || bias == 0 {
        return narrow(r);
    }
    if byte == 0 {
        return 0;
    }
    let zero_rank = rank(0, bias);
    narrow(if r < zero_rank { r + 1 } else { r })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(signed: bool, bias0: u8, bias1: u8, zero_guard: bool) -> CommandInfo {
        CommandInfo { signedness: signed, is_bf16: false, bias0, bias1, zero_guard }
    }

    fn assert_bijective(map: &SymbolMap) {
        let mut seen = [false; 256];
        for b in 0..=255u8 {
            let s = map.symbol(b);
            assert!(!seen[usize::from(s)], "symbol {s} used twice");
            seen[usize::from(s)] = true;
            assert_eq!(map.byte(s), b);
        }
    }

    #[test]
    fn signed_zigzag_without_bias() {
        let map = SymbolMap::new(&cmd(true, 0, 0, false));
        let sym = |v: i8| map.symbol(v.to_ne_bytes()[0]);
        assert_eq!([sym(0), sym(-1), sym(1), sym(-2), sym(2)], [0, 1, 2, 3, 4]);
        assert_eq!(sym(127), 254);
        assert_eq!(sym(-128), 255);
        assert_bijective(&map);
    }

    #[test]
    fn signed_bias_rotates_each_side() {
        let map = SymbolMap::new(&cmd(true, 9, 4, false));
        let sym = |v: i8| map.symbol(v.to_ne_bytes()[0]);
        assert_eq!(sym(10), 2);
        assert_eq!(sym(-5), 1);
        assert_eq!(sym(0), 0);
        assert_bijective(&map);
    }

    #[test]
    fn unsigned_ranks_around_bias() {
        let map = SymbolMap::new(&cmd(false, 100, 0, false));
        assert_eq!([map.symbol(100), map.symbol(101), map.symbol(99)], [0, 1, 2]);
        // below side runs out first at 0, above continues alone
        assert_eq!(map.symbol(0), 200);
        assert_eq!(map.symbol(201), 201);
        assert_eq!(map.symbol(255), 255);
        assert_bijective(&map);
    }

    #[test]
    fn zero_guard_pulls_zero_forward() {
        let map = SymbolMap::new(&cmd(false, 127, 0, true));
        assert_eq!(map.symbol(0), 0);
        assert_eq!(map.symbol(127), 1);
        assert_bijective(&map);
    }

    #[test]
    fn every_bias_is_a_bijection() {
        for bias in [0u8, 1, 63, 127, 128, 200, 254, 255] {
            assert_bijective(&SymbolMap::new(&cmd(false, bias, 0, true)));
            assert_bijective(&SymbolMap::new(&cmd(false, bias, 0, false)));
        }
        for bias in [0u8, 1, 50, 126] {
            assert_bijective(&SymbolMap::new(&cmd(true, bias, bias, false)));
        }
        assert_bijective(&SymbolMap::new(&cmd(true, 126, 127, false)));
    }
}
