//! bf16 lookup-table engine: reciprocal and arctangent.
//!
//! Tables are built once on the host with ordinary floating point and laid
//! out as a `(1, lanes, 32, 8)` tensor: 256 entries per lane, every lane an
//! identical copy, so each lane of the vector unit can index its own
//! copy. Evaluation ([`bf16_reciprocal`], [`bf16_atan`]) uses only table
//! reads, bit operations and bf16 arithmetic.
//!
//! [`AtanTestMode`] describes the three ways results are checked against
//! the device.

mod atan;
pub mod golden;
mod reciprocal;

pub use atan::{bf16_atan, bf16_atan_tensor, build_atan_table, AtanTable};
pub use reciprocal::{bf16_reciprocal, build_reciprocal_table, ReciprocalTable};

use crate::bf16::{bf16, convert_bf16_s8};
use crate::error::{RefError, Result};
use crate::tensor::Tensor;
use npu_chip::TensorShape;

/// Entries per lane: one per exponent byte or mantissa code.
pub const TABLE_ENTRIES: usize = 256;

/// Table shape for a chip with `lanes` NPU lanes.
#[must_use]
pub const fn table_shape(lanes: usize) -> TensorShape {
    TensorShape::new(1, lanes, 32, 8)
}

pub(crate) fn check_table_shape(shape: TensorShape) -> Result<()> {
    if shape.n != 1 || shape.c == 0 || shape.hw() != TABLE_ENTRIES {
        return Err(RefError::invalid_param(format!(
            "lookup table shape {shape} must be (1, lanes, h, w) with h * w = {TABLE_ENTRIES}"
        )));
    }
    Ok(())
}

/// All six tables the arctangent kernel loads.
#[derive(Debug, Clone, PartialEq)]
pub struct LutTableSet {
    /// `y0`, `slope`, `invert`, `pos_neg`.
    pub atan: AtanTable,
    /// Exponent and mantissa answers.
    pub reciprocal: ReciprocalTable,
}

impl LutTableSet {
    /// Build every table for `lanes` lanes.
    ///
    /// # Errors
    ///
    /// Returns error if `lanes` is zero.
    pub fn new(lanes: usize) -> Result<Self> {
        let shape = table_shape(lanes);
        Ok(Self { atan: build_atan_table(shape)?, reciprocal: build_reciprocal_table(shape)? })
    }

    /// [`bf16_atan`] on lane `lane`.
    #[must_use]
    pub fn atan(&self, x: bf16, lane: usize) -> bf16 {
        bf16_atan(x, &self.atan, &self.reciprocal, lane)
    }

    /// [`bf16_reciprocal`] on lane `lane`.
    #[must_use]
    pub fn reciprocal(&self, x: bf16, lane: usize) -> bf16 {
        bf16_reciprocal(x, &self.reciprocal, lane)
    }

    /// [`bf16_atan_tensor`] with these tables.
    ///
    /// # Errors
    ///
    /// Never fails for a set built by [`LutTableSet::new`].
    pub fn atan_tensor(&self, input: &Tensor<bf16>) -> Result<Tensor<bf16>> {
        bf16_atan_tensor(input, &self.atan, &self.reciprocal)
    }
}

/// How arctangent output is generated and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtanTestMode {
    /// The 1024 fixed codes, compared with the recorded device output.
    PreDataCompareFix,
    /// Generated inputs, compared with double-precision `atan`.
    #[default]
    DataCompareAccuracy,
    /// As accuracy mode, with both sides converted to i8.
    DataCompareU8,
}

impl AtanTestMode {
    /// All modes.
    pub const ALL: [Self; 3] = [Self::PreDataCompareFix, Self::DataCompareAccuracy, Self::DataCompareU8];

    /// Input tensor shape on a chip with `lanes` lanes.
    ///
    /// Fixed mode spreads the 1024 codes as `(1, lanes, 1024 / (8 * lanes), 8)`;
    /// the generated modes use `(1, lanes, 16, 16)`.
    #[must_use]
    pub const fn shape(self, lanes: usize) -> TensorShape {
        match self {
            Self::PreDataCompareFix => TensorShape::new(1, lanes, golden::FIXED_PATTERN.len() / (8 * lanes), 8),
            Self::DataCompareAccuracy | Self::DataCompareU8 => TensorShape::new(1, lanes, 16, 16),
        }
    }

    /// Input elements for `shape`.
    ///
    /// Generated inputs follow `(i % (hi - 2)) * (±1) + 0.03 + (i % 256) * 0.002`
    /// with the sign alternating, and the first three elements pinned to
    /// `0`, `1` and `-1`. `range` is `(lo, hi)`; only `hi` shapes the ramp.
    ///
    /// # Errors
    ///
    /// Fixed mode requires exactly 1024 elements; generated modes require
    /// `hi > 2`.
    pub fn inputs(self, shape: TensorShape, range: (i32, i32)) -> Result<Vec<bf16>> {
        match self {
            Self::PreDataCompareFix => {
                RefError::check_len("fixed atan pattern", golden::FIXED_PATTERN.len(), shape.size())?;
                Ok(golden::FIXED_PATTERN.iter().map(|&b| bf16::from_bits(b)).collect())
            }
            Self::DataCompareAccuracy | Self::DataCompareU8 => {
                let period = usize::try_from(range.1 - 2)
                    .ok()
                    .filter(|&p| p > 0)
                    .ok_or_else(|| RefError::invalid_param(format!("atan range {range:?} too narrow")))?;
                let mut out: Vec<bf16> = (0..shape.size())
                    .map(|i| {
                        // both operands are small integers
                        #[allow(clippy::cast_precision_loss)]
                        let ramp = (i % period) as f32;
                        #[allow(clippy::cast_precision_loss)]
                        let step = (i % TABLE_ENTRIES) as f32;
                        let signed = if i % 2 == 1 { ramp } else { -ramp };
                        bf16::from_f32(signed + 0.03 + step * 0.002)
                    })
                    .collect();
                for (slot, v) in out.iter_mut().zip([0.0f32, 1.0, -1.0]) {
                    *slot = bf16::from_f32(v);
                }
                Ok(out)
            }
        }
    }

    /// Expected output for `inputs`.
    #[must_use]
    pub fn expected(self, inputs: &[bf16]) -> Vec<bf16> {
        match self {
            Self::PreDataCompareFix => golden::FIXED_GOLDEN.iter().map(|&b| bf16::from_bits(b)).collect(),
            Self::DataCompareAccuracy | Self::DataCompareU8 => {
                inputs.iter().map(|x| bf16::from_f64(f64::from(x.to_f32()).atan())).collect()
            }
        }
    }

    /// Whether `got` is an acceptable result for `expected`.
    ///
    /// Fixed mode requires identical bits and ignores `epsilon`. Accuracy
    /// mode accepts `|got - expected| < epsilon`. U8 mode compares the i8
    /// conversions, and accepts a one-step difference only when the float
    /// values are themselves within `epsilon` (a straddled rounding
    /// boundary).
    #[must_use]
    pub fn accepts(self, got: bf16, expected: bf16, epsilon: f32) -> bool {
        let close = (got.to_f32() - expected.to_f32()).abs() < epsilon;
        match self {
            Self::PreDataCompareFix => got.to_bits() == expected.to_bits(),
            Self::DataCompareAccuracy => close,
            Self::DataCompareU8 => {
                let (g, e) = (convert_bf16_s8(got.to_bits()), convert_bf16_s8(expected.to_bits()));
                g == e || (close && g.abs_diff(e) == 1)
            }
        }
    }
}

impl std::fmt::Display for AtanTestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreDataCompareFix => write!(f, "fixed"),
            Self::DataCompareAccuracy => write!(f, "accuracy"),
            Self::DataCompareU8 => write!(f, "u8"),
        }
    }
}

impl std::str::FromStr for AtanTestMode {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" | "fix" => Ok(Self::PreDataCompareFix),
            "accuracy" => Ok(Self::DataCompareAccuracy),
            "u8" => Ok(Self::DataCompareU8),
            other => Err(RefError::invalid_param(format!("unknown atan mode '{other}'"))),
        }
    }
}
