//! Sliding-window geometry shared by convolution and pooling.
//!
//! The input plane is first "diluted": `ins` zero rows are inserted between
//! input rows, `ins_last` after the last one, and the result is padded.
//! Windows then slide over that extended plane.

use crate::error::{RefError, Result};

/// Extent of one axis after insertion and padding.
///
/// `(dim - 1) * (ins + 1) + ins_last + 1 + pad_lo + pad_hi`
#[must_use]
pub const fn dilated_extent(dim: usize, ins: usize, ins_last: usize, pad_lo: usize, pad_hi: usize) -> usize {
    (dim - 1) * (ins + 1) + ins_last + 1 + pad_lo + pad_hi
}

/// Extent covered by a kernel of `k` taps at `dilation`.
#[must_use]
pub const fn kernel_extent(k: usize, dilation: usize) -> usize {
    (k - 1) * dilation + 1
}

/// Output length along one axis, or `None` when the kernel does not fit.
#[must_use]
pub const fn output_extent(extended: usize, kernel: usize, stride: usize) -> Option<usize> {
    if kernel == 0 || stride == 0 || kernel > extended {
        None
    } else {
        Some((extended - kernel) / stride + 1)
    }
}

/// One axis of a window operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axis {
    /// Kernel taps.
    pub kernel: usize,
    /// Stride over the extended plane.
    pub stride: usize,
    /// Distance between kernel taps.
    pub dilation: usize,
    /// Zero lines before the first input line.
    pub pad_lo: usize,
    /// Zero lines after the trailing insertion.
    pub pad_hi: usize,
    /// Zero lines inserted between input lines.
    pub ins: usize,
    /// Zero lines inserted after the last input line.
    pub ins_last: usize,
}

impl Axis {
    /// Plain axis: stride 1, no dilation, padding or insertion.
    #[must_use]
    pub const fn plain(kernel: usize) -> Self {
        Self { kernel, stride: 1, dilation: 1, pad_lo: 0, pad_hi: 0, ins: 0, ins_last: 0 }
    }

    /// Set the stride.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Set the tap dilation.
    #[must_use]
    pub const fn with_dilation(mut self, dilation: usize) -> Self {
        self.dilation = dilation;
        self
    }

    /// Set both paddings.
    #[must_use]
    pub const fn with_padding(mut self, lo: usize, hi: usize) -> Self {
        self.pad_lo = lo;
        self.pad_hi = hi;
        self
    }

    /// Set inner and trailing insertion.
    #[must_use]
    pub const fn with_insertion(mut self, ins: usize, ins_last: usize) -> Self {
        self.ins = ins;
        self.ins_last = ins_last;
        self
    }

    /// Extended length of an input axis of `dim` elements.
    #[must_use]
    pub const fn extended(&self, dim: usize) -> usize {
        dilated_extent(dim, self.ins, self.ins_last, self.pad_lo, self.pad_hi)
    }

    /// Output length for an input axis of `dim` elements.
    ///
    /// # Errors
    ///
    /// Returns error when `dim`, the kernel, stride or dilation is zero, or
    /// the kernel is wider than the extended input.
    pub fn output_len(&self, dim: usize) -> Result<usize> {
        if dim == 0 || self.dilation == 0 {
            return Err(RefError::invalid_param("window axis with zero input or dilation"));
        }
        let k = if self.kernel == 0 { 0 } else { kernel_extent(self.kernel, self.dilation) };
        output_extent(self.extended(dim), k, self.stride).ok_or_else(|| {
            RefError::invalid_param(format!(
                "kernel {} (dilation {}) stride {} does not fit extended input {}",
                self.kernel,
                self.dilation,
                self.stride,
                self.extended(dim)
            ))
        })
    }

    /// Map a position on the extended axis back to an input index.
    ///
    /// `None` means the position is padding or an inserted zero line.
    #[must_use]
    pub const fn source(&self, pos: usize, dim: usize) -> Option<usize> {
        if pos < self.pad_lo {
            return None;
        }
        let p = pos - self.pad_lo;
        let step = self.ins + 1;
        if p % step != 0 {
            return None;
        }
        let i = p / step;
        if i < dim {
            Some(i)
        } else {
            None
        }
    }

    /// Extended-axis position of tap `k` of output `o`.
    #[must_use]
    pub const fn tap(&self, o: usize, k: usize) -> usize {
        o * self.stride + k * self.dilation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dilated_extent_formula() {
        assert_eq!(dilated_extent(5, 0, 0, 0, 0), 5);
        assert_eq!(dilated_extent(3, 1, 0, 0, 0), 5);
        assert_eq!(dilated_extent(3, 1, 2, 1, 1), 9);
        assert_eq!(kernel_extent(3, 2), 5);
    }

    #[test]
    fn output_extent_rejects_oversized_kernel() {
        assert_eq!(output_extent(4, 5, 1), None);
        assert_eq!(output_extent(5, 3, 1), Some(3));
        assert_eq!(output_extent(31, 1, 31), Some(1));
    }

    #[test]
    fn source_skips_inserted_lines() {
        let axis = Axis::plain(3).with_padding(1, 0).with_insertion(1, 1);
        // extended layout: pad, x0, 0, x1, 0, x2, 0
        let dim = 3;
        assert_eq!(axis.extended(dim), 7);
        let mapped: Vec<_> = (0..7).map(|p| axis.source(p, dim)).collect();
        assert_eq!(mapped, vec![None, Some(0), None, Some(1), None, Some(2), None]);
    }

    proptest! {
        #[test]
        fn output_count_matches_window_walk(
            dim in 1usize..20,
            kernel in 1usize..8,
            stride in 1usize..8,
            ins in 0usize..4,
            ins_last in 0usize..4,
            pad_lo in 0usize..4,
            pad_hi in 0usize..4,
        ) {
            let axis = Axis::plain(kernel)
                .with_stride(stride)
                .with_padding(pad_lo, pad_hi)
                .with_insertion(ins, ins_last);
            let ext = axis.extended(dim);
            match axis.output_len(dim) {
                Ok(out) => {
                    // every window fits and one more would not
                    prop_assert!(axis.tap(out - 1, kernel - 1) < ext);
                    prop_assert!(axis.tap(out, kernel - 1) >= ext);
                }
                Err(_) => prop_assert!(kernel > ext),
            }
        }
    }
}
