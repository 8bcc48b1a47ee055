//! A recorded depthwise case: 8 channels, 5x6 input, 3x3 kernel, bias.

use crate::quant::QuantParams;
use npu_chip::TensorShape;

/// Input shape.
pub const INPUT_SHAPE: TensorShape = TensorShape::new(1, 8, 5, 6);

/// Input, NCHW.
pub const INPUT: [i8; 240] = [
    103, -104, 119, -4, 106, -119, 65, -85, -117, -47, -31, -3, 65, -87, -41, -63, 117, -63,
    -66, -64, 84, -55, 17, 71, -8, 75, 26, 63, 105, 127, //
    85, 12, 119, 76, 35, -36, 61, -51, -90, 67, -75, -11, 78, 36, 96, 82, 20, 79, -125, 116,
    75, 46, 7, -37, -29, -17, -8, 125, 14, -14, //
    -96, -57, -88, 76, 74, 89, 62, 52, -104, 115, 67, -14, -58, -98, 21, 1, 12, 87, 109, 29,
    21, 65, -109, 111, -125, -49, -61, -13, -89, -108, //
    120, -80, 57, -52, 96, -74, -7, 76, 126, -3, -115, -4, 52, -12, 78, 112, -88, 125, -73,
    71, 24, -28, -25, 119, 58, 92, -41, 56, 0, 90, //
    105, 12, 120, -92, 117, 111, -28, -120, 82, -120, 75, 37, 46, -1, -71, 50, -93, -63, -39,
    -7, 12, 64, -115, -95, -42, 7, 39, -107, 83, -15, //
    -72, 126, 123, -127, 0, 46, -20, -47, 82, 41, -119, 75, -128, 70, -124, -23, 67, -43,
    104, 124, 59, 15, -38, -89, -29, 30, 7, 105, -10, 26, //
    33, 117, 117, -21, 39, 45, 39, -58, 49, -16, -81, 53, 39, 117, 64, 100, -90, 80, -78,
    -38, 106, -31, 7, 17, -87, -86, 48, -70, 9, -101, //
    -50, 127, -100, -100, 76, -26, -84, 95, -96, -96, -24, 107, 53, 18, 82, -20, -70, -52,
    89, -111, 49, -75, 23, -27, 109, -98, 55, 1, 11, -1,
];

/// 3x3 filter per channel.
pub const FILTER: [i8; 72] = [
    103, -104, 119, -4, 106, -119, 65, -85, -117, //
    85, 12, 119, 76, 35, -36, 61, -51, -90, //
    -96, -57, -88, 76, 74, 89, 62, 52, -104, //
    120, -80, 57, -52, 96, -74, -7, 76, 126, //
    105, 12, 120, -92, 117, 111, -28, -120, 82, //
    -72, 126, 123, -127, 0, 46, -20, -47, 82, //
    33, 117, 117, -21, 39, 45, 39, -58, 49, //
    -50, 127, -100, -100, 76, -26, -84, 95, -96,
];

/// Per-channel bias.
pub const BIAS: [i32; 8] = [812, 670, -746, 938, 827, -558, 265, -384];
/// Per-channel multiplier.
pub const MULTIPLIER: [u32; 8] = [
    1_155_460_505, 1_210_948_247, 1_203_328_687, 1_166_122_678,
    1_155_273_687, 1_196_350_022, 1_169_748_238, 1_183_287_581,
];
/// Per-channel right shift.
pub const SHIFT: [i8; 8] = [7, 6, 6, 9, 8, 6, 6, 7];

/// Device output, `(1, 8, 3, 4)`.
pub const OUTPUT: [i8; 96] = [
    127, -101, 60, -128, -46, -11, -94, 24, -62, -2, -30, -128, //
    127, -65, 123, 26, -128, 48, -36, 124, 95, 111, 98, 127, //
    69, 39, 31, -128, -37, -128, 127, -128, 127, 106, -21, 30, //
    34, 13, 17, -21, 1, -3, 19, -1, 24, 4, -1, 32, //
    36, 26, 3, 72, -6, -50, 3, -52, 10, 3, -11, -85, //
    127, 6, -128, 55, 109, 37, -18, -123, -74, -128, -12, -11, //
    127, 127, -58, 127, 98, -20, -40, -54, 127, 127, 58, -35, //
    127, -67, -64, 94, -14, 79, -115, -1, -128, 127, -72, 34,
];

/// [`MULTIPLIER`] and [`SHIFT`] paired up.
pub fn quant() -> Vec<QuantParams> {
    MULTIPLIER
        .iter()
        .zip(SHIFT)
        .map(|(&m, s)| QuantParams::new(m, s))
        .collect()
}
