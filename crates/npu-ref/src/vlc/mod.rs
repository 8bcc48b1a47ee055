//! Lossless VLC (variable-length coding) tensor codec.
//!
//! Bytes are remapped to symbols around two bias points, cut into blocks
//! of [`BLOCK_SYMBOLS`], and each block is Golomb-Rice coded with its own
//! order `k` in `0..=5` or stored raw when coding would not save space.
//!
//! ## Stream layout
//!
//! | Section | Size | Contents |
//! |---------|------|----------|
//! | header | 16 | flags, `bias0`, `bias1`, version, original length (u32 LE), payload length (u32 LE), reserved |
//! | k-map | `align16(ceil(blocks / 2))` | one nibble per block, low nibble first; `0xF` = raw |
//! | payload | `align16(payload length)` | LSB-first bit stream |
//! | bf16 tail | `align16(elements)` | raw sign/mantissa byte per element (bf16 only) |
//!
//! Every section is padded to 16 bytes so the stream can be read as whole
//! 16-bit words. For bf16 only the 8-bit exponents are entropy coded.

mod bits;
mod estimate;
mod remap;

pub use estimate::estimate_command_info;

use crate::error::{RefError, Result};
use bits::{BitReader, BitWriter};
use bytes::{BufMut, Bytes, BytesMut};
use npu_chip::align_up;
use remap::SymbolMap;
use tracing::debug;

/// Symbols per k-map entry.
pub const BLOCK_SYMBOLS: usize = 16;
/// Header bytes.
pub const HEADER_LEN: usize = 16;
/// Alignment of every section and of the whole stream.
pub const STREAM_ALIGN: usize = 16;
/// Format version written to and required in the header.
pub const VERSION: u8 = 1;

const MAX_ORDER: u32 = 5;
const RAW_BLOCK: u8 = 0xF;
const MAX_QUOTIENT: u32 = 47;

const FLAG_SIGNED: u8 = 1 << 0;
const FLAG_BF16: u8 = 1 << 1;
const FLAG_ZERO_GUARD: u8 = 1 << 2;
const KNOWN_FLAGS: u8 = FLAG_SIGNED | FLAG_BF16 | FLAG_ZERO_GUARD;

/// Per-stream codec settings, carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandInfo {
    /// Bytes are i8 (ignored for bf16).
    pub signedness: bool,
    /// Data is little-endian bf16.
    pub is_bf16: bool,
    /// Positive-side bias (signed, `< 127`) or centre value (unsigned/bf16).
    pub bias0: u8,
    /// Negative-side bias (signed only, `< 128`).
    pub bias1: u8,
    /// Give zero the shortest symbol (unsigned/bf16 only).
    pub zero_guard: bool,
}

impl CommandInfo {
    /// Settings with zero biases and no zero guard.
    #[must_use]
    pub const fn new(signedness: bool, is_bf16: bool) -> Self {
        Self { signedness, is_bf16, bias0: 0, bias1: 0, zero_guard: false }
    }

    /// Set both biases.
    #[must_use]
    pub const fn with_bias(mut self, bias0: u8, bias1: u8) -> Self {
        self.bias0 = bias0;
        self.bias1 = bias1;
        self
    }

    /// Enable or disable the zero guard.
    #[must_use]
    pub const fn with_zero_guard(mut self, on: bool) -> Self {
        self.zero_guard = on;
        self
    }

    /// Check that the biases fit the selected remap.
    ///
    /// # Errors
    ///
    /// Signed streams need `bias0 < 127` and `bias1 < 128`.
    pub fn validate(&self) -> Result<()> {
        if self.signedness && !self.is_bf16 && (self.bias0 >= 127 || self.bias1 >= 128) {
            return Err(RefError::invalid_param(format!(
                "signed biases ({}, {}) out of range",
                self.bias0, self.bias1
            )));
        }
        Ok(())
    }

    fn flags(&self) -> u8 {
        let mut f = 0;
        if self.signedness {
            f |= FLAG_SIGNED;
        }
        if self.is_bf16 {
            f |= FLAG_BF16;
        }
        if self.zero_guard {
            f |= FLAG_ZERO_GUARD;
        }
        f
    }
}

/// Where a stream's biases come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BiasMode {
    /// Use the caller's [`CommandInfo`] as given (zero biases by default).
    #[default]
    Hardware,
    /// Estimate biases from the data with [`estimate_command_info`].
    Compiler,
}

impl BiasMode {
    /// Both modes, hardware first.
    pub const ALL: [Self; 2] = [Self::Hardware, Self::Compiler];

    /// Settings to compress `data` with.
    #[must_use]
    pub fn resolve(self, data: &[u8], base: CommandInfo) -> CommandInfo {
        match self {
            Self::Hardware => base,
            Self::Compiler => estimate_command_info(data, base.signedness, base.is_bf16),
        }
    }
}

impl std::fmt::Display for BiasMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hardware => write!(f, "hardware"),
            Self::Compiler => write!(f, "compiler"),
        }
    }
}

/// Split little-endian bf16 words into exponent and sign/mantissa bytes.
pub(crate) fn split_bf16(data: &[u8]) -> (Vec<u8>, Vec<u8>) {
    data.chunks_exact(2)
        .map(|w| {
            let word = u16::from_le_bytes([w[0], w[1]]);
            let [lo, hi] = word.to_le_bytes();
            let exponent = (hi << 1) | (lo >> 7);
            let sign_mantissa = (hi & 0x80) | (lo & 0x7f);
            (exponent, sign_mantissa)
        })
        .unzip()
}

fn join_bf16(exponents: &[u8], sign_mantissa: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(exponents.len() * 2);
    for (&e, &sm) in exponents.iter().zip(sign_mantissa) {
        out.push(((e & 1) << 7) | (sm & 0x7f));
        out.push((sm & 0x80) | (e >> 1));
    }
    out
}

fn symbol_count(len: usize, is_bf16: bool) -> usize {
    if is_bf16 {
        len / 2
    } else {
        len
    }
}

fn kmap_len(symbols: usize) -> usize {
    align_up(symbols.div_ceil(BLOCK_SYMBOLS).div_ceil(2), STREAM_ALIGN)
}

/// Worst-case stream size for `len` input bytes.
///
/// A block is never coded larger than raw, so the payload is at most one
/// byte per symbol.
#[must_use]
pub fn compressed_upper_bound(len: usize, is_bf16: bool) -> usize {
    let symbols = symbol_count(len, is_bf16);
    let tail = if is_bf16 { align_up(symbols, STREAM_ALIGN) } else { 0 };
    HEADER_LEN + kmap_len(symbols) + align_up(symbols, STREAM_ALIGN) + tail
}

/// Cheapest Golomb-Rice order for `block`, or `None` when raw is no larger.
fn choose_order(block: &[u8]) -> Option<u32> {
    let raw_bits = 8 * block.len();
    (0..=MAX_ORDER)
        .filter(|&k| block.iter().all(|&s| u32::from(s) >> k <= MAX_QUOTIENT))
        .map(|k| {
            let bits: usize = block.iter().map(|&s| (u32::from(s) >> k) as usize + 1 + k as usize).sum();
            (k, bits)
        })
        .min_by_key(|&(_, bits)| bits)
        .filter(|&(_, bits)| bits < raw_bits)
        .map(|(k, _)| k)
}

fn pad_to_align(buf: &mut BytesMut) {
    let target = align_up(buf.len(), STREAM_ALIGN);
    buf.put_bytes(0, target - buf.len());
}

/// Compress `data` with the settings in `cmd`.
///
/// # Errors
///
/// Returns error if the biases are out of range, bf16 data has an odd
/// length, or the input exceeds `u32::MAX` bytes.
pub fn vlc_compress(data: &[u8], cmd: &CommandInfo) -> Result<Bytes> {
    cmd.validate()?;
    if cmd.is_bf16 && data.len() % 2 != 0 {
        return Err(RefError::invalid_param("bf16 data must have an even length"));
    }
    let original_len = u32::try_from(data.len()).map_err(|_| RefError::invalid_param("input longer than u32::MAX"))?;

    let (coded, tail) = if cmd.is_bf16 { split_bf16(data) } else { (data.to_vec(), Vec::new()) };
    let map = SymbolMap::new(cmd);
    let symbols: Vec<u8> = coded.iter().map(|&b| map.symbol(b)).collect();

    let mut kmap = Vec::with_capacity(symbols.len().div_ceil(BLOCK_SYMBOLS));
    let mut writer = BitWriter::with_capacity(symbols.len());
    for block in symbols.chunks(BLOCK_SYMBOLS) {
        match choose_order(block) {
            Some(k) => {
                kmap.push(u8::try_from(k).unwrap_or(RAW_BLOCK));
                for &s in block {
                    let s = u32::from(s);
                    writer.put_unary(s >> k);
                    writer.put(s, k);
                }
            }
            None => {
                kmap.push(RAW_BLOCK);
                for &s in block {
                    writer.put(u32::from(s), 8);
                }
            }
        }
    }
    let payload = writer.finish();
    let payload_len = u32::try_from(payload.len()).map_err(|_| RefError::invalid_param("payload longer than u32::MAX"))?;

    let mut out = BytesMut::with_capacity(compressed_upper_bound(data.len(), cmd.is_bf16));
    out.put_u8(cmd.flags());
    out.put_u8(cmd.bias0);
    out.put_u8(cmd.bias1);
    out.put_u8(VERSION);
    out.put_u32_le(original_len);
    out.put_u32_le(payload_len);
    out.put_u32_le(0);

    for pair in kmap.chunks(2) {
        let hi = pair.get(1).copied().unwrap_or(0);
        out.put_u8((pair[0] & 0xF) | (hi << 4));
    }
    pad_to_align(&mut out);
    out.put_slice(&payload);
    pad_to_align(&mut out);
    if cmd.is_bf16 {
        out.put_slice(&tail);
        pad_to_align(&mut out);
    }

    debug!(
        input = data.len(),
        output = out.len(),
        raw_blocks = kmap.iter().filter(|&&k| k == RAW_BLOCK).count(),
        blocks = kmap.len(),
        "vlc compressed"
    );
    Ok(out.freeze())
}

/// Decoded stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Settings the stream was written with.
    pub cmd: CommandInfo,
    /// Decompressed length in bytes.
    pub original_len: usize,
    /// Payload bytes before padding.
    pub payload_len: usize,
}

impl StreamHeader {
    /// Parse the 16-byte header.
    ///
    /// # Errors
    ///
    /// Returns error for short input, an unknown version or flag bits, or
    /// biases out of range.
    pub fn parse(stream: &[u8]) -> Result<Self> {
        let h = stream.get(..HEADER_LEN).ok_or(RefError::Truncated {
            needed: HEADER_LEN,
            available: stream.len(),
        })?;
        if h[3] != VERSION {
            return Err(RefError::malformed(format!("unknown version {}", h[3])));
        }
        if h[0] & !KNOWN_FLAGS != 0 {
            return Err(RefError::malformed(format!("unknown flags {:#04x}", h[0])));
        }
        let cmd = CommandInfo {
            signedness: h[0] & FLAG_SIGNED != 0,
            is_bf16: h[0] & FLAG_BF16 != 0,
            bias0: h[1],
            bias1: h[2],
            zero_guard: h[0] & FLAG_ZERO_GUARD != 0,
        };
        cmd.validate().map_err(|e| RefError::malformed(e.to_string()))?;
        let word = |at: usize| u32::from_le_bytes([h[at], h[at + 1], h[at + 2], h[at + 3]]) as usize;
        Ok(Self { cmd, original_len: word(4), payload_len: word(8) })
    }
}

/// Decompress a stream produced by [`vlc_compress`].
///
/// # Errors
///
/// Returns [`RefError::Truncated`] when a section extends past the end of
/// `stream` and [`RefError::MalformedStream`] for anything else this codec
/// would not have written.
pub fn vlc_decompress(stream: &[u8]) -> Result<Vec<u8>> {
    let header = StreamHeader::parse(stream)?;
    let cmd = header.cmd;
    if cmd.is_bf16 && header.original_len % 2 != 0 {
        return Err(RefError::malformed("odd bf16 length"));
    }
    let symbols = symbol_count(header.original_len, cmd.is_bf16);
    let kmap_start = HEADER_LEN;
    let payload_start = kmap_start + kmap_len(symbols);
    let tail_start = payload_start + align_up(header.payload_len, STREAM_ALIGN);
    let end = tail_start + if cmd.is_bf16 { align_up(symbols, STREAM_ALIGN) } else { 0 };
    if stream.len() < end {
        return Err(RefError::Truncated { needed: end, available: stream.len() });
    }
    // every coded symbol takes at least one payload bit
    if symbols > header.payload_len.saturating_mul(8) {
        return Err(RefError::malformed(format!(
            "{symbols} symbols cannot fit a {}-byte payload",
            header.payload_len
        )));
    }

    let kmap = &stream[kmap_start..payload_start];
    let mut reader = BitReader::new(&stream[payload_start..payload_start + header.payload_len]);
    let map = SymbolMap::new(&cmd);
    let mut coded = Vec::with_capacity(symbols);
    for block in 0..symbols.div_ceil(BLOCK_SYMBOLS) {
        let nibble = (kmap[block / 2] >> (4 * (block % 2))) & 0xF;
        let count = BLOCK_SYMBOLS.min(symbols - block * BLOCK_SYMBOLS);
        for _ in 0..count {
            let sym = match nibble {
                RAW_BLOCK => reader.get(8)?,
                k if u32::from(k) <= MAX_ORDER => {
                    let k = u32::from(k);
                    let q = reader.get_unary(MAX_QUOTIENT)?;
                    (q << k) | reader.get(k)?
                }
                other => return Err(RefError::malformed(format!("k-map entry {other:#x}"))),
            };
            let sym = u8::try_from(sym).map_err(|_| RefError::malformed(format!("symbol {sym} out of range")))?;
            coded.push(map.byte(sym));
        }
    }

    if cmd.is_bf16 {
        Ok(join_bf16(&coded, &stream[tail_start..tail_start + symbols]))
    } else {
        Ok(coded)
    }
}

/// [`vlc_decompress`], additionally requiring the recorded length to be
/// `expected_len`.
///
/// # Errors
///
/// Returns [`RefError::ShapeMismatch`] if the header disagrees with
/// `expected_len`, or any decode error.
pub fn vlc_decompress_exact(stream: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let header = StreamHeader::parse(stream)?;
    RefError::check_len("vlc stream length", expected_len, header.original_len)?;
    vlc_decompress(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::vlc_test_data;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SHAPES: [(usize, usize, usize, usize); 12] = [
        (1, 1, 17, 13),
        (3, 39, 17, 23),
        (5, 39, 17, 23),
        (20, 35, 2, 2),
        (1, 1, 1, 1),
        (1, 1, 1, 2),
        (1, 1, 7, 2),
        (1, 1, 10, 60),
        (1, 2, 1, 1),
        (2, 17, 1, 4),
        (3, 16, 1, 1),
        (3, 36, 16, 20),
    ];

    fn round_trip(data: &[u8], cmd: &CommandInfo) -> Bytes {
        let stream = vlc_compress(data, cmd).unwrap();
        assert_eq!(stream.len() % STREAM_ALIGN, 0);
        assert!(stream.len() <= compressed_upper_bound(data.len(), cmd.is_bf16));
        assert_eq!(vlc_decompress_exact(&stream, data.len()).unwrap(), data);
        stream
    }

    #[test]
    fn all_shapes_both_modes() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for (n, c, h, w) in SHAPES {
            let len = n * c * h * w;
            for signed in [true, false] {
                let data = vlc_test_data(&mut rng, len, signed, false);
                for mode in BiasMode::ALL {
                    let cmd = mode.resolve(&data, CommandInfo::new(signed, false));
                    round_trip(&data, &cmd);
                }
            }
        }
    }

    #[test]
    fn bf16_with_fixed_bias() {
        let mut rng = StdRng::seed_from_u64(17);
        let data = vlc_test_data(&mut rng, 2 * 7 * 64, false, true);
        let cmd = CommandInfo::new(false, true).with_bias(127, 0);
        round_trip(&data, &cmd);
        let est = BiasMode::Compiler.resolve(&data, CommandInfo::new(false, true));
        round_trip(&data, &est);
    }

    #[test]
    fn all_zero_and_no_zero_inputs() {
        let zeros = vec![0u8; 1000];
        for signed in [true, false] {
            for mode in BiasMode::ALL {
                let cmd = mode.resolve(&zeros, CommandInfo::new(signed, false));
                let stream = round_trip(&zeros, &cmd);
                // zeros compress to one bit each
                assert!(stream.len() < zeros.len() / 4);
            }
        }
        let no_zero: Vec<u8> = (0..1000).map(|i| 1 + (i % 200) as u8).collect();
        let cmd = estimate_command_info(&no_zero, false, false);
        assert!(!cmd.zero_guard);
        round_trip(&no_zero, &cmd);
        round_trip(&no_zero, &cmd.with_zero_guard(true));
    }

    #[test]
    fn empty_input() {
        let stream = round_trip(&[], &CommandInfo::default());
        assert_eq!(stream.len(), HEADER_LEN);
    }

    #[test]
    fn incompressible_data_goes_raw() {
        let data: Vec<u8> = (0..=255).collect();
        let stream = round_trip(&data, &CommandInfo::new(false, false).with_bias(128, 0));
        assert!(stream.len() <= compressed_upper_bound(256, false));
    }

    #[test]
    fn compression_is_deterministic() {
        let data = vlc_test_data(&mut StdRng::seed_from_u64(3), 4096, true, false);
        let cmd = estimate_command_info(&data, true, false);
        assert_eq!(vlc_compress(&data, &cmd).unwrap(), vlc_compress(&data, &cmd).unwrap());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(vlc_compress(&[1, 2, 3], &CommandInfo::new(false, true)).is_err());
        assert!(vlc_compress(&[1], &CommandInfo::new(true, false).with_bias(127, 0)).is_err());

        let stream = vlc_compress(&[5u8; 100], &CommandInfo::default()).unwrap();
        assert!(matches!(vlc_decompress(&stream[..stream.len() - 16]), Err(RefError::Truncated { .. })));
        assert!(matches!(vlc_decompress(&stream[..8]), Err(RefError::Truncated { .. })));

        let mut bad = stream.to_vec();
        bad[3] = 9;
        assert!(matches!(vlc_decompress(&bad), Err(RefError::MalformedStream { .. })));
        assert!(vlc_decompress_exact(&stream, 99).is_err());
    }

    #[test]
    fn oversized_length_rejected_before_decoding() {
        let stream = vlc_compress(&[5u8; 100], &CommandInfo::default()).unwrap();
        let mut bad = stream.to_vec();
        // claim 3000 symbols: every section fits, the 50-byte payload cannot
        bad[4..8].copy_from_slice(&3000u32.to_le_bytes());
        bad.resize(4096, 0);
        assert!(matches!(vlc_decompress(&bad), Err(RefError::MalformedStream { .. })));

        bad[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(vlc_decompress(&bad), Err(RefError::Truncated { .. })));
    }

    #[test]
    fn bf16_split_join() {
        let data = [0x80, 0x3f, 0x49, 0xc0, 0xff, 0x7f];
        let (e, sm) = split_bf16(&data);
        assert_eq!(e, vec![127, 128, 255]);
        assert_eq!(sm, vec![0x00, 0xc9, 0x7f]);
        assert_eq!(join_bf16(&e, &sm), data);
    }

    proptest! {
        #[test]
        fn any_bytes_round_trip(
            data in proptest::collection::vec(any::<u8>(), 0..600),
            signed in any::<bool>(),
            bias0 in 0u8..127,
            bias1 in 0u8..128,
            zero_guard in any::<bool>(),
        ) {
            let cmd = CommandInfo { signedness: signed, is_bf16: false, bias0, bias1, zero_guard };
            let stream = vlc_compress(&data, &cmd).unwrap();
            prop_assert_eq!(vlc_decompress(&stream).unwrap(), data);
        }

        #[test]
        fn any_bf16_round_trip(words in proptest::collection::vec(any::<u16>(), 0..300), bias0 in any::<u8>()) {
            let data: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
            let cmd = CommandInfo::new(false, true).with_bias(bias0, 0).with_zero_guard(true);
            let stream = vlc_compress(&data, &cmd).unwrap();
            prop_assert_eq!(vlc_decompress(&stream).unwrap(), data);
        }
    }
}
