//! Compiler-side bias estimation.

use super::{split_bf16, CommandInfo};
use tracing::debug;

fn most_frequent(bytes: &[u8]) -> u8 {
    let mut hist = [0usize; 256];
    for &b in bytes {
        hist[usize::from(b)] += 1;
    }
    // ties resolve to the smallest value
    let (best, _) = hist
        .iter()
        .enumerate()
        .fold((0usize, 0usize), |(bi, bc), (i, &c)| if c > bc { (i, c) } else { (bi, bc) });
    u8::try_from(best).unwrap_or(0)
}

/// Pick biases from the data's own distribution.
///
/// * signed: `bias0` is the smallest positive value minus one and `bias1`
///   the smallest negative magnitude minus one, so the closest values on
///   each side get the shortest codes. Zero is already symbol 0, so the
///   zero guard stays off.
/// * unsigned and bf16: `bias0` is the most frequent byte (exponent for
///   bf16); the zero guard is enabled when zeros occur and the bias is not
///   already zero.
#[must_use]
pub fn estimate_command_info(data: &[u8], signed: bool, is_bf16: bool) -> CommandInfo {
    let mut cmd = CommandInfo::new(signed, is_bf16);
    if signed && !is_bf16 {
        let values = data.iter().map(|&b| i8::from_ne_bytes([b]));
        let min_pos = values.clone().filter(|&v| v > 0).min().map_or(0, |v| v.unsigned_abs() - 1);
        let min_neg = values.filter(|&v| v < 0).map(i8::unsigned_abs).min().map_or(0, |m| m - 1);
        cmd.bias0 = min_pos;
        cmd.bias1 = min_neg;
    } else {
        let symbols = if is_bf16 { split_bf16(data).0 } else { data.to_vec() };
        cmd.bias0 = most_frequent(&symbols);
        cmd.zero_guard = cmd.bias0 != 0 && symbols.contains(&0);
    }
    debug!(
        signed,
        is_bf16,
        bias0 = cmd.bias0,
        bias1 = cmd.bias1,
        zero_guard = cmd.zero_guard,
        "estimated vlc biases"
    );
    cmd
}
