//! Silicon model for the NPU family (180x, 181x, 182x, 183x, 1880v2).
//!
//! This crate has **no dependencies** and **no hardware access**. It is a
//! pure description of what the reference numerics need to know about a
//! chip: how many lanes (NPUs) it has, how wide an execution unit is, how
//! much local memory each lane owns, and how tensors and matrices are laid
//! out in local and global memory.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`variant`] | Chip variants and their lane / EU / local-memory geometry |
//! | [`shape`] | Element formats, 4-D tensor shapes, strides, matrix shapes |

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod shape;
pub mod variant;

pub use shape::{align_up, Fmt, LocalMatrixShape, MatrixShape, TensorShape, TensorStride};
pub use variant::{ChipInfo, ChipVariant, UnknownVariant};
