//! Element formats, tensor shapes and memory strides.
//!
//! Tensors are 4-D `(n, c, h, w)`. In global memory they are packed
//! row-major. In local memory channel `c` is placed on lane
//! `c % npu_num`, and each channel may be padded up to a multiple of the
//! execution-unit width ("EU alignment").

use crate::variant::ChipInfo;
use std::fmt;

/// Element format of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fmt {
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// bfloat16: 1 sign, 8 exponent, 7 mantissa bits.
    Bf16,
}

impl Fmt {
    /// Bytes per element.
    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::Bf16 => 2,
        }
    }

    /// True for the signed integer format.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8)
    }
}

/// Round `x` up to a multiple of `align` (`align > 0`).
#[must_use]
pub const fn align_up(x: usize, align: usize) -> usize {
    x.div_ceil(align) * align
}

/// 4-D tensor shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TensorShape {
    /// Batch.
    pub n: usize,
    /// Channels.
    pub c: usize,
    /// Height.
    pub h: usize,
    /// Width.
    pub w: usize,
}

impl TensorShape {
    /// Create a shape.
    #[must_use]
    pub const fn new(n: usize, c: usize, h: usize, w: usize) -> Self {
        Self { n, c, h, w }
    }

    /// Total element count.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n * self.c * self.h * self.w
    }

    /// Elements per channel plane.
    #[must_use]
    pub const fn hw(&self) -> usize {
        self.h * self.w
    }

    /// Byte size of a packed tensor in `fmt`.
    #[must_use]
    pub const fn byte_size(&self, fmt: Fmt) -> usize {
        self.size() * fmt.byte_size()
    }

    /// Row-major element index of `(n, c, h, w)`.
    #[must_use]
    pub const fn index(&self, n: usize, c: usize, h: usize, w: usize) -> usize {
        ((n * self.c + c) * self.h + h) * self.w + w
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.n, self.c, self.h, self.w)
    }
}

/// Byte strides of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TensorStride {
    /// Bytes between batches.
    pub n: usize,
    /// Bytes between channels.
    pub c: usize,
    /// Bytes between rows.
    pub h: usize,
    /// Bytes between elements.
    pub w: usize,
}

impl TensorStride {
    /// Packed row-major stride, the global-memory default.
    #[must_use]
    pub const fn packed(shape: &TensorShape, fmt: Fmt) -> Self {
        let w = fmt.byte_size();
        let h = shape.w * w;
        let c = shape.h * h;
        Self { n: shape.c * c, c, h, w }
    }

    /// Default local-memory stride on `chip`.
    ///
    /// The channel stride is the plane size, rounded up to a whole EU row when
    /// `eu_align` is set. The batch stride covers the channels one lane holds.
    #[must_use]
    pub const fn local(shape: &TensorShape, fmt: Fmt, eu_align: bool, chip: &ChipInfo) -> Self {
        let w = fmt.byte_size();
        let h = shape.w * w;
        let plane = shape.h * h;
        let c = if eu_align { align_up(plane, chip.eu_num * w) } else { plane };
        let n = shape.c.div_ceil(chip.npu_num) * c;
        Self { n, c, h, w }
    }

    /// Bytes needed to hold `n` batches at this stride.
    #[must_use]
    pub const fn footprint(&self, shape: &TensorShape) -> usize {
        shape.n * self.n
    }
}

/// Global-memory matrix shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixShape {
    /// Rows.
    pub row: usize,
    /// Columns.
    pub col: usize,
}

impl MatrixShape {
    /// Create a shape.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Element count.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.row * self.col
    }
}

/// Local-memory matrix shape: each row is split into `c` channels of `w`
/// columns, the last channel possibly partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalMatrixShape {
    /// Rows.
    pub n: usize,
    /// Channels per row, `ceil(col / w)`.
    pub c: usize,
    /// Columns per channel.
    pub w: usize,
    /// Logical columns.
    pub col: usize,
}

impl LocalMatrixShape {
    /// Split a `row x col` matrix into channels of width `w` (`w > 0`).
    #[must_use]
    pub const fn new(row: usize, col: usize, w: usize) -> Self {
        Self { n: row, c: col.div_ceil(w), w, col }
    }

    /// Logical element count (`n * col`, channel padding excluded).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n * self.col
    }

    /// The equivalent tensor shape `(n, c, 1, w)`.
    #[must_use]
    pub const fn tensor_shape(&self) -> TensorShape {
        TensorShape::new(self.n, self.c, 1, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::ChipVariant;

    #[test]
    fn packed_stride_matches_row_major() {
        let s = TensorShape::new(2, 15, 10, 8);
        let st = TensorStride::packed(&s, Fmt::Bf16);
        assert_eq!(st.w, 2);
        assert_eq!(st.h, 16);
        assert_eq!(st.c, 160);
        assert_eq!(st.n, 15 * 160);
        assert_eq!(st.footprint(&s), s.byte_size(Fmt::Bf16));
    }

    #[test]
    fn local_stride_eu_alignment() {
        let chip = ChipVariant::Bm1880v2.info();
        let s = TensorShape::new(1, 33, 3, 5);
        let unaligned = TensorStride::local(&s, Fmt::I8, false, &chip);
        let aligned = TensorStride::local(&s, Fmt::I8, true, &chip);
        assert_eq!(unaligned.c, 15);
        assert_eq!(aligned.c, 16);
        // 33 channels over 32 lanes -> two channels on lane 0
        assert_eq!(aligned.n, 32);
    }

    #[test]
    fn matrix_split() {
        let m = LocalMatrixShape::new(3, 7, 4);
        assert_eq!(m.c, 2);
        assert_eq!(m.size(), 21);
        assert_eq!(m.tensor_shape(), TensorShape::new(3, 2, 1, 4));
    }

    #[test]
    fn index_is_row_major() {
        let s = TensorShape::new(2, 3, 4, 5);
        assert_eq!(s.index(1, 2, 3, 4), s.size() - 1);
        assert_eq!(s.index(0, 1, 0, 0), 20);
    }
}
