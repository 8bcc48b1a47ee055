#![deny(unsafe_code)]

//! Bit-exact reference numerics for NPU conformance testing
//!
//! Every value the device produces for a supported instruction can be
//! recomputed here on the host, bit for bit, and compared. The crate has
//! three engines and the support code around them:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`quant`] | Q31 requantization primitives, saturation, round-half-up shifts |
//! | [`window`] | Extended/dilated window geometry shared by convolution and pooling |
//! | [`conv`] | Per-channel depthwise convolution, channel-quant side buffer |
//! | [`pool`] | Integer average pooling (`avg_const` then right shift) |
//! | [`elementwise`] | Quantized multiply, compare, min-with-constant, bf16 add |
//! | [`tdma`] | Copy, fill, transpose and strided-write transforms |
//! | [`vlc`] | Variable-length tensor codec (Golomb-Rice blocks) |
//! | [`lut`] | bf16 reciprocal and arctangent by table lookup |
//! | [`bf16`] | bf16 conversions |
//! | [`policy`] | Requantization parameter search over random data |
//! | [`testdata`] | Seeded random inputs and legal random shapes |
//!
//! # Example
//!
//! ```
//! use npu_ref::elementwise::tensor_mul_qm;
//! use npu_ref::QuantParams;
//!
//! # fn main() -> Result<(), npu_ref::RefError> {
//! let q = QuantParams::new(1_077_952_640, 6);
//! let out = tensor_mul_qm(&[-102, 25, 115, 89], &[77, 51, 115, 102], q)?;
//! assert_eq!(out, [-62, 10, 104, 71]);
//! # Ok(())
//! # }
//! ```
//!
//! Randomness is always supplied by the caller as an `&mut impl Rng`; no
//! function here seeds its own generator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bf16;
pub mod conv;
pub mod elementwise;
mod error;
pub mod lut;
pub mod policy;
pub mod pool;
pub mod quant;
pub mod tdma;
mod tensor;
pub mod testdata;
pub mod vlc;
pub mod window;

pub use conv::{depthwise_conv, DepthwiseParams};
pub use error::{RefError, Result};
pub use lut::{AtanTestMode, LutTableSet};
pub use policy::QuantSearch;
pub use pool::{avg_pool, PoolParams};
pub use quant::{multiply_by_quantized_multiplier, QuantParams};
pub use tensor::Tensor;
pub use vlc::{vlc_compress, vlc_decompress, BiasMode, CommandInfo};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bf16::bf16;
    pub use crate::{
        AtanTestMode, BiasMode, CommandInfo, DepthwiseParams, LutTableSet, PoolParams, QuantParams,
        RefError, Result, Tensor,
    };
    pub use npu_chip::{Fmt, TensorShape};
}
