//! Owned dense tensors.

use crate::error::{RefError, Result};
use npu_chip::TensorShape;

/// Dense NCHW tensor owning its buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor<T> {
    shape: TensorShape,
    data: Vec<T>,
}

impl<T> Tensor<T> {
    /// Wrap `data` as a tensor of `shape`.
    ///
    /// # Errors
    ///
    /// Returns error if `data.len()` is not `shape.size()`.
    pub fn new(shape: TensorShape, data: Vec<T>) -> Result<Self> {
        RefError::check_len("tensor data", shape.size(), data.len())?;
        Ok(Self { shape, data })
    }

    /// Shape of the tensor.
    pub const fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Row-major elements.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the tensor, returning its buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Element at `(n, c, h, w)`.
    pub fn at(&self, n: usize, c: usize, h: usize, w: usize) -> &T {
        &self.data[self.shape.index(n, c, h, w)]
    }
}

impl<T: Clone> Tensor<T> {
    /// Tensor of `shape` filled with `value`.
    pub fn filled(shape: TensorShape, value: T) -> Self {
        Self {
            shape,
            data: vec![value; shape.size()],
        }
    }
}

impl<T: Clone + Default> Tensor<T> {
    /// Zero-initialised tensor.
    pub fn zeros(shape: TensorShape) -> Self {
        Self::filled(shape, T::default())
    }
}
