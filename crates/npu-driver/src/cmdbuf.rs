//! Command buffers: ordered, typed instruction lists
//!
//! A [`CmdBuf`] is what a test hands to a backend. It is not an encoded
//! byte stream; each [`Descriptor`] carries one [`Instruction`] with its
//! operands plus the two control bits every variant uses: raise an
//! interrupt when done, and end-of-descriptors (EOD). Which descriptors get
//! those bits is variant policy, see [`ChipBackend`](crate::ChipBackend).

use bytes::Bytes;
use npu_chip::{Fmt, LocalMatrixShape, TensorShape, TensorStride};
use npu_ref::bf16::bf16;
use npu_ref::{CommandInfo, DepthwiseParams, PoolParams, QuantParams, Tensor};

/// Hardware unit an instruction runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Tensor instruction unit (arithmetic, lookup tables)
    Tiu,
    /// Tensor DMA (copies, codec)
    Tdma,
}

/// Layout transform performed by a TDMA transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdmaOp {
    /// Packed copy.
    Copy {
        /// Source shape
        shape: TensorShape,
        /// Element format
        fmt: Fmt,
    },
    /// Local matrix copy.
    MatrixCopy {
        /// Local matrix layout
        shape: LocalMatrixShape,
    },
    /// Fill the destination with one byte; the source is ignored.
    Fill {
        /// Destination shape
        shape: TensorShape,
        /// Fill byte
        value: u8,
    },
    /// Swap C and W.
    CwTranspose {
        /// Source shape
        shape: TensorShape,
        /// Element format
        fmt: Fmt,
    },
    /// Swap N and C.
    NcTranspose {
        /// Source shape
        shape: TensorShape,
        /// Element format
        fmt: Fmt,
    },
    /// Swap N and C while widening 8-bit elements to bf16.
    NcTransposeToBf16 {
        /// Source shape
        shape: TensorShape,
        /// Read source bytes as i8
        signed: bool,
    },
    /// Write through a destination stride.
    Strided {
        /// Source shape
        shape: TensorShape,
        /// Destination stride in bytes
        stride: TensorStride,
        /// Element format
        fmt: Fmt,
    },
    /// Reorder NHWC to NCHW.
    NhwcToNchw {
        /// Logical NCHW shape
        shape: TensorShape,
        /// Element format
        fmt: Fmt,
    },
}

impl TdmaOp {
    /// Whether the transfer reads or writes bf16 elements.
    pub const fn uses_bf16(&self) -> bool {
        match self {
            Self::Copy { fmt, .. }
            | Self::CwTranspose { fmt, .. }
            | Self::NcTranspose { fmt, .. }
            | Self::Strided { fmt, .. }
            | Self::NhwcToNchw { fmt, .. } => matches!(fmt, Fmt::Bf16),
            Self::NcTransposeToBf16 { .. } => true,
            Self::MatrixCopy { .. } | Self::Fill { .. } => false,
        }
    }
}

/// One device instruction with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `clamp(q(a * b))` elementwise.
    MulQm {
        /// First operand
        a: Vec<i8>,
        /// Second operand
        b: Vec<i8>,
        /// Requantization
        quant: QuantParams,
    },
    /// Per-channel depthwise convolution.
    Depthwise {
        /// NCHW input
        input: Tensor<i8>,
        /// `[c][kh][kw]` filter
        filter: Vec<i8>,
        /// Packed channel-quant buffer (see `npu_ref::conv::pack_chl_quan`)
        chl_quan: Bytes,
        /// Whether `chl_quan` carries biases
        has_bias: bool,
        /// Window
        params: DepthwiseParams,
    },
    /// Integer average pooling.
    AvgPool {
        /// Raw 8-bit input
        input: Tensor<u8>,
        /// Read bytes as i8
        signed: bool,
        /// Window, weight, shift
        params: PoolParams,
    },
    /// `a >= b` elementwise.
    Ge {
        /// First operand
        a: Vec<u8>,
        /// Second operand
        b: Vec<u8>,
        /// i8 or u8
        fmt: Fmt,
    },
    /// `min(a, b)` with a constant.
    MinConst {
        /// Tensor operand
        a: Vec<u8>,
        /// Constant, same interpretation as `a`
        b: u8,
        /// i8 or u8
        fmt: Fmt,
    },
    /// bf16 add of a constant, optional ReLU.
    Bf16AddConst {
        /// Tensor operand
        a: Vec<bf16>,
        /// Constant
        b: bf16,
        /// Clamp negatives to zero
        relu: bool,
    },
    /// TDMA transfer.
    Tdma {
        /// Packed source bytes
        src: Bytes,
        /// Transform
        op: TdmaOp,
    },
    /// Compress a tensor with the VLC codec.
    VlcCompress {
        /// Raw tensor bytes
        data: Bytes,
        /// Codec settings
        cmd: CommandInfo,
    },
    /// Decompress a VLC stream.
    VlcDecompress {
        /// Stream bytes
        stream: Bytes,
    },
    /// Table-based arctangent.
    Atan {
        /// bf16 input
        input: Tensor<bf16>,
    },
    /// Table-based reciprocal.
    Reciprocal {
        /// bf16 input
        input: Tensor<bf16>,
    },
}

impl Instruction {
    /// Short mnemonic for logs and errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MulQm { .. } => "mul_qm",
            Self::Depthwise { .. } => "depthwise",
            Self::AvgPool { .. } => "avg_pool",
            Self::Ge { .. } => "ge",
            Self::MinConst { .. } => "min_const",
            Self::Bf16AddConst { .. } => "bf16_add_const",
            Self::Tdma { .. } => "tdma",
            Self::VlcCompress { .. } => "vlc_compress",
            Self::VlcDecompress { .. } => "vlc_decompress",
            Self::Atan { .. } => "atan",
            Self::Reciprocal { .. } => "reciprocal",
        }
    }

    /// Unit the instruction is issued to.
    pub const fn engine(&self) -> Engine {
        match self {
            Self::Tdma { .. } | Self::VlcCompress { .. } | Self::VlcDecompress { .. } => Engine::Tdma,
            _ => Engine::Tiu,
        }
    }

    /// Whether the instruction needs the bf16 datapath.
    pub const fn needs_bf16(&self) -> bool {
        match self {
            Self::Bf16AddConst { .. } | Self::Atan { .. } | Self::Reciprocal { .. } => true,
            Self::Tdma { op, .. } => op.uses_bf16(),
            Self::VlcCompress { cmd, .. } => cmd.is_bf16,
            _ => false,
        }
    }
}

/// An instruction and its control bits.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// The instruction
    pub instruction: Instruction,
    /// Raise an interrupt on completion
    pub interrupt: bool,
    /// Last descriptor of its stream
    pub eod: bool,
}

/// Ordered list of descriptors for one submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CmdBuf {
    descriptors: Vec<Descriptor>,
}

impl CmdBuf {
    /// Empty buffer.
    pub const fn new() -> Self {
        Self { descriptors: Vec::new() }
    }

    /// Buffer holding a single instruction.
    pub fn single(instruction: Instruction) -> Self {
        let mut buf = Self::new();
        buf.push(instruction);
        buf
    }

    /// Append an instruction with both control bits clear.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.descriptors.push(Descriptor { instruction, interrupt: false, eod: false });
        self
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// `true` when nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in issue order.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Mutable descriptors, for setting control bits.
    pub fn descriptors_mut(&mut self) -> &mut [Descriptor] {
        &mut self.descriptors
    }

    /// Last descriptor issued to `engine`.
    pub fn last_on_mut(&mut self, engine: Engine) -> Option<&mut Descriptor> {
        self.descriptors.iter_mut().rev().find(|d| d.instruction.engine() == engine)
    }

    /// Consume into descriptors.
    pub fn into_descriptors(self) -> Vec<Descriptor> {
        self.descriptors
    }
}

/// Result of one instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Signed 8-bit elements
    I8(Vec<i8>),
    /// Raw bytes (u8 elements, TDMA destinations, decompressed data)
    U8(Vec<u8>),
    /// bf16 elements
    Bf16(Vec<bf16>),
    /// Compressed stream
    Stream(Bytes),
}

impl Output {
    /// Signed elements, if that is what this is.
    pub fn as_i8(&self) -> Option<&[i8]> {
        match self {
            Self::I8(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes of [`Output::U8`] or [`Output::Stream`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::U8(v) => Some(v),
            Self::Stream(b) => Some(b),
            _ => None,
        }
    }

    /// bf16 elements, if that is what this is.
    pub fn as_bf16(&self) -> Option<&[bf16]> {
        match self {
            Self::Bf16(v) => Some(v),
            _ => None,
        }
    }

    /// Element count.
    pub fn len(&self) -> usize {
        match self {
            Self::I8(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::Bf16(v) => v.len(),
            Self::Stream(b) => b.len(),
        }
    }

    /// `true` for an empty output.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(n: usize) -> Instruction {
        Instruction::Tdma {
            src: Bytes::from(vec![0u8; n]),
            op: TdmaOp::Copy { shape: TensorShape::new(1, 1, 1, n), fmt: Fmt::I8 },
        }
    }

    fn ge() -> Instruction {
        Instruction::Ge { a: vec![1], b: vec![2], fmt: Fmt::U8 }
    }

    #[test]
    fn push_keeps_order_and_clears_bits() {
        let mut buf = CmdBuf::new();
        buf.push(ge()).push(copy(4)).push(ge());
        assert_eq!(buf.len(), 3);
        let engines: Vec<Engine> = buf.descriptors().iter().map(|d| d.instruction.engine()).collect();
        assert_eq!(engines, [Engine::Tiu, Engine::Tdma, Engine::Tiu]);
        assert!(buf.descriptors().iter().all(|d| !d.interrupt && !d.eod));
    }

    #[test]
    fn last_on_engine() {
        let mut buf = CmdBuf::new();
        buf.push(copy(1)).push(ge()).push(copy(2)).push(ge());
        buf.last_on_mut(Engine::Tdma).unwrap().eod = true;
        assert!(buf.descriptors()[2].eod);
        assert!(!buf.descriptors()[0].eod);
        assert!(CmdBuf::single(ge()).last_on_mut(Engine::Tdma).is_none());
    }

    #[test]
    fn bf16_instructions_flagged() {
        assert!(!ge().needs_bf16());
        assert!(Instruction::Bf16AddConst { a: vec![], b: bf16::ONE, relu: false }.needs_bf16());
        let widen = Instruction::Tdma {
            src: Bytes::new(),
            op: TdmaOp::NcTransposeToBf16 { shape: TensorShape::new(1, 1, 1, 1), signed: true },
        };
        assert!(widen.needs_bf16());
        assert!(!copy(3).needs_bf16());
        let stream = Instruction::VlcCompress { data: Bytes::new(), cmd: CommandInfo::new(false, true) };
        assert!(stream.needs_bf16());
    }

    #[test]
    fn output_views() {
        assert_eq!(Output::I8(vec![-1, 2]).as_i8(), Some(&[-1i8, 2][..]));
        assert_eq!(Output::Stream(Bytes::from_static(b"ab")).as_bytes(), Some(&b"ab"[..]));
        assert!(Output::U8(vec![]).is_empty());
        assert!(Output::Bf16(vec![bf16::ONE]).as_i8().is_none());
    }
}
