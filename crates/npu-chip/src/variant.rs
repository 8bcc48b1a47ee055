//! Chip variants and lane geometry.
//!
//! Every variant shares the same instruction semantics; they differ in the
//! number of lanes, which fixes the shape of per-lane lookup tables and the
//! default local-memory stride of a tensor.

use std::fmt;
use std::str::FromStr;

/// Geometry of one chip variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipInfo {
    /// Number of lanes (NPUs). Channel `c` lives on lane `c % npu_num`.
    pub npu_num: usize,
    /// Elements processed per execution-unit cycle; local tensors align to it.
    pub eu_num: usize,
    /// Local memory per lane in bytes.
    pub lmem_size: usize,
    /// Number of local memory banks per lane.
    pub lmem_banks: usize,
}

impl ChipInfo {
    /// Bytes in one local memory bank.
    #[must_use]
    pub const fn lmem_bank_size(&self) -> usize {
        self.lmem_size / self.lmem_banks
    }
}

/// Chip variant targeted by a conformance run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChipVariant {
    /// 180x: two lanes, the smallest edge part.
    Cv180x,
    /// 181x: eight lanes, 64 KB local memory per lane.
    Cv181x,
    /// 182x (1822): eight lanes.
    Cv182x,
    /// 183x: thirty-two lanes.
    Cv183x,
    /// 1880v2: thirty-two lanes, first part with bf16 support.
    #[default]
    Bm1880v2,
}

impl ChipVariant {
    /// All known variants, smallest first.
    pub const ALL: [Self; 5] = [
        Self::Cv180x,
        Self::Cv181x,
        Self::Cv182x,
        Self::Cv183x,
        Self::Bm1880v2,
    ];

    /// Lane / EU / memory geometry for this variant.
    #[must_use]
    pub const fn info(&self) -> ChipInfo {
        match self {
            Self::Cv180x => ChipInfo { npu_num: 2, eu_num: 16, lmem_size: 32 * 1024, lmem_banks: 4 },
            Self::Cv181x => ChipInfo { npu_num: 8, eu_num: 16, lmem_size: 64 * 1024, lmem_banks: 8 },
            Self::Cv182x => ChipInfo { npu_num: 8, eu_num: 16, lmem_size: 32 * 1024, lmem_banks: 8 },
            Self::Cv183x | Self::Bm1880v2 => {
                ChipInfo { npu_num: 32, eu_num: 16, lmem_size: 32 * 1024, lmem_banks: 8 }
            }
        }
    }

    /// Lane count, the "npu_num" every table shape is derived from.
    #[must_use]
    pub const fn npu_num(&self) -> usize {
        self.info().npu_num
    }

    /// Whether the variant executes bf16 instructions.
    #[must_use]
    pub const fn supports_bf16(&self) -> bool {
        !matches!(self, Self::Cv183x)
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cv180x => "180x",
            Self::Cv181x => "181x",
            Self::Cv182x => "1822",
            Self::Cv183x => "183x",
            Self::Bm1880v2 => "1880v2",
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a variant name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chip variant `{}` (expected 180x, 181x, 1822, 183x or 1880v2)", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for ChipVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key
            .strip_prefix("cv")
            .or_else(|| key.strip_prefix("bm"))
            .unwrap_or(&key);
        match key {
            "180x" => Ok(Self::Cv180x),
            "181x" => Ok(Self::Cv181x),
            "182x" | "1822" => Ok(Self::Cv182x),
            "183x" | "1835" => Ok(Self::Cv183x),
            "1880v2" | "1880" => Ok(Self::Bm1880v2),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}
