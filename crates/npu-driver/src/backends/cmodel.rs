// SPDX-License-Identifier: AGPL-3.0-only

//! Software cmodel: executes instructions with the reference numerics
//!
//! Every variant backend delegates execution here. The cmodel has no
//! notion of interrupts or EOD beyond counting them; the variant strategy
//! has already checked the buffer was finished correctly.
//!
//! Lookup tables are built on the first table instruction for the
//! variant's lane count and kept for the life of the device, the way a
//! runtime loads them into local memory once.

use crate::cmdbuf::{Descriptor, Instruction, Output, TdmaOp};
use crate::error::{DriverError, Result};
use bytes::Bytes;
use npu_chip::{ChipVariant, Fmt, TensorShape};
use npu_ref::bf16::bf16;
use npu_ref::conv::unpack_chl_quan;
use npu_ref::elementwise::{bf16_add_const, min_const_i8, min_const_u8, tensor_ge, tensor_mul_qm};
use npu_ref::{avg_pool, depthwise_conv, tdma, vlc_compress, vlc_decompress, LutTableSet, RefError, Tensor};
use tracing::{debug, info};

/// Executor shared by all variant backends.
#[derive(Debug)]
pub struct CModel {
    variant: ChipVariant,
    tables: Option<LutTableSet>,
    executed: u64,
    interrupts: u64,
}

impl CModel {
    /// Fresh executor for `variant`; no tables loaded.
    pub const fn new(variant: ChipVariant) -> Self {
        Self { variant, tables: None, executed: 0, interrupts: 0 }
    }

    /// Variant being modelled.
    pub const fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// Descriptors executed so far.
    pub const fn executed(&self) -> u64 {
        self.executed
    }

    /// Interrupts raised so far.
    pub const fn interrupts(&self) -> u64 {
        self.interrupts
    }

    /// Execute descriptors in order.
    ///
    /// # Errors
    ///
    /// Stops at the first instruction whose operands are rejected.
    pub fn run(&mut self, descriptors: Vec<Descriptor>) -> Result<Vec<Output>> {
        let mut outputs = Vec::with_capacity(descriptors.len());
        for (i, d) in descriptors.into_iter().enumerate() {
            debug!(index = i, op = d.instruction.name(), "cmodel execute");
            outputs.push(self.execute(&d.instruction)?);
            self.executed += 1;
            if d.interrupt {
                self.interrupts += 1;
            }
        }
        Ok(outputs)
    }

    fn tables(&mut self) -> Result<&LutTableSet> {
        if self.tables.is_none() {
            let lanes = self.variant.npu_num();
            info!("CModel {}: loading lookup tables for {lanes} lanes", self.variant);
            self.tables = Some(LutTableSet::new(lanes)?);
        }
        self.tables
            .as_ref()
            .ok_or_else(|| DriverError::invalid_state("lookup tables not loaded"))
    }

    /// Execute one instruction.
    ///
    /// # Errors
    ///
    /// Returns error if the reference operator rejects the operands.
    pub fn execute(&mut self, instruction: &Instruction) -> Result<Output> {
        let out = match instruction {
            Instruction::MulQm { a, b, quant } => Output::I8(tensor_mul_qm(a, b, *quant)?),
            Instruction::Depthwise { input, filter, chl_quan, has_bias, params } => {
                let (bias, quant) = unpack_chl_quan(chl_quan, input.shape().c, *has_bias)?;
                Output::I8(depthwise_conv(input, filter, bias.as_deref(), &quant, params)?.into_data())
            }
            Instruction::AvgPool { input, signed, params } => Output::U8(avg_pool(input, *signed, params)?.into_data()),
            Instruction::Ge { a, b, fmt } => Output::U8(tensor_ge(a, b, *fmt)?),
            Instruction::MinConst { a, b, fmt } => match fmt {
                Fmt::I8 => {
                    let signed: Vec<i8> = a.iter().map(|&x| i8::from_ne_bytes([x])).collect();
                    Output::I8(min_const_i8(&signed, i8::from_ne_bytes([*b])))
                }
                Fmt::U8 => Output::U8(min_const_u8(a, *b)),
                Fmt::Bf16 => return Err(RefError::UnsupportedFormat("bf16 in an 8-bit min").into()),
            },
            Instruction::Bf16AddConst { a, b, relu } => Output::Bf16(bf16_add_const(a, *b, *relu)),
            Instruction::Tdma { src, op } => Output::U8(execute_tdma(src, op)?),
            Instruction::VlcCompress { data, cmd } => Output::Stream(vlc_compress(data, cmd)?),
            Instruction::VlcDecompress { stream } => Output::U8(vlc_decompress(stream)?),
            Instruction::Atan { input } => Output::Bf16(self.tables()?.atan_tensor(input)?.into_data()),
            Instruction::Reciprocal { input } => {
                let tables = self.tables()?;
                Output::Bf16(per_lane(input, |x, lane| tables.reciprocal(x, lane)))
            }
        };
        Ok(out)
    }
}

/// Apply `f` to every element with the lane its channel lives on.
fn per_lane(input: &Tensor<bf16>, f: impl Fn(bf16, usize) -> bf16) -> Vec<bf16> {
    let shape = input.shape();
    let plane = shape.hw().max(1);
    let channels = shape.c.max(1);
    input.data().iter().enumerate().map(|(i, &x)| f(x, (i / plane) % channels)).collect()
}

#[derive(Debug, Clone, Copy)]
enum Relayout {
    Cw,
    Nc,
    Nhwc,
}

impl Relayout {
    fn apply<T: Copy + Default>(self, src: &[T], shape: &TensorShape) -> npu_ref::Result<Vec<T>> {
        match self {
            Self::Cw => tdma::copy_cw_transposed(src, shape),
            Self::Nc => tdma::copy_nc_transposed(src, shape),
            Self::Nhwc => tdma::nhwc_to_nchw(src, shape),
        }
    }

    /// Relayout raw bytes, moving whole elements of `fmt`.
    fn bytes(self, src: &[u8], shape: &TensorShape, fmt: Fmt) -> npu_ref::Result<Vec<u8>> {
        RefError::check_len("tdma source", shape.byte_size(fmt), src.len())?;
        if fmt.byte_size() == 2 {
            let words: Vec<[u8; 2]> = src.chunks_exact(2).map(|w| [w[0], w[1]]).collect();
            Ok(self.apply(&words, shape)?.concat())
        } else {
            self.apply(src, shape)
        }
    }
}

fn execute_tdma(src: &Bytes, op: &TdmaOp) -> Result<Vec<u8>> {
    let out = match *op {
        TdmaOp::Copy { shape, fmt } => tdma::tensor_copy(src, &shape, fmt)?,
        TdmaOp::MatrixCopy { shape } => tdma::matrix_copy(src, &shape)?,
        TdmaOp::Fill { shape, value } => tdma::fill_constant(&shape, value),
        TdmaOp::CwTranspose { shape, fmt } => Relayout::Cw.bytes(src, &shape, fmt)?,
        TdmaOp::NcTranspose { shape, fmt } => Relayout::Nc.bytes(src, &shape, fmt)?,
        TdmaOp::NhwcToNchw { shape, fmt } => Relayout::Nhwc.bytes(src, &shape, fmt)?,
        TdmaOp::NcTransposeToBf16 { shape, signed } => tdma::copy_nc_transposed_to_bf16(src, &shape, signed)?
            .into_iter()
            .flat_map(u16::to_le_bytes)
            .collect(),
        TdmaOp::Strided { shape, stride, fmt } => tdma::copy_to_strided(src, &shape, &stride, fmt)?,
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use npu_ref::QuantParams;

    #[test]
    fn mul_golden() {
        let mut cm = CModel::new(ChipVariant::Cv182x);
        let out = cm
            .execute(&Instruction::MulQm {
                a: vec![-102, 25, 115, 89],
                b: vec![77, 51, 115, 102],
                quant: QuantParams::new(1_077_952_640, 6),
            })
            .unwrap();
        assert_eq!(out, Output::I8(vec![-62, 10, 104, 71]));
    }

    #[test]
    fn counts_executions_and_interrupts() {
        let mut cm = CModel::new(ChipVariant::Cv180x);
        let ge = Instruction::Ge { a: vec![1, 2], b: vec![2, 2], fmt: Fmt::U8 };
        let descriptors = vec![
            Descriptor { instruction: ge.clone(), interrupt: false, eod: false },
            Descriptor { instruction: ge, interrupt: true, eod: true },
        ];
        let out = cm.run(descriptors).unwrap();
        assert_eq!(out, [Output::U8(vec![0, 1]), Output::U8(vec![0, 1])]);
        assert_eq!((cm.executed(), cm.interrupts()), (2, 1));
    }

    #[test]
    fn min_const_reads_signed_bytes() {
        let mut cm = CModel::new(ChipVariant::Cv181x);
        let a = vec![0x80, 0x05, 0x7f];
        let out = cm.execute(&Instruction::MinConst { a: a.clone(), b: 0x03, fmt: Fmt::I8 }).unwrap();
        assert_eq!(out, Output::I8(vec![-128, 3, 3]));
        let out = cm.execute(&Instruction::MinConst { a, b: 0x03, fmt: Fmt::U8 }).unwrap();
        assert_eq!(out, Output::U8(vec![3, 3, 3]));
    }

    #[test]
    fn bf16_transpose_moves_whole_words() {
        let shape = TensorShape::new(1, 2, 1, 2);
        let words: Vec<u16> = vec![0x1111, 0x2222, 0x3333, 0x4444];
        let src: Bytes = words.iter().flat_map(|w| w.to_le_bytes()).collect::<Vec<u8>>().into();
        let out = execute_tdma(&src, &TdmaOp::CwTranspose { shape, fmt: Fmt::Bf16 }).unwrap();
        let back: Vec<u16> = out.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();
        assert_eq!(back, [0x1111, 0x3333, 0x2222, 0x4444]);
        assert!(execute_tdma(&src.slice(..7), &TdmaOp::CwTranspose { shape, fmt: Fmt::Bf16 }).is_err());
    }

    #[test]
    fn reciprocal_uses_channel_lane() {
        let mut cm = CModel::new(ChipVariant::Cv180x);
        let input = Tensor::new(TensorShape::new(1, 3, 1, 1), vec![bf16::from_f32(2.0); 3]).unwrap();
        let out = cm.execute(&Instruction::Reciprocal { input }).unwrap();
        assert_eq!(out.as_bf16().unwrap(), &[bf16::from_f32(0.5); 3][..]);
    }

    #[test]
    fn vlc_stream_round_trips() {
        let mut cm = CModel::new(ChipVariant::Bm1880v2);
        let data: Bytes = (0..200u8).map(|v| v % 7).collect::<Vec<u8>>().into();
        let stream = cm
            .execute(&Instruction::VlcCompress { data: data.clone(), cmd: npu_ref::CommandInfo::new(false, false) })
            .unwrap();
        let Output::Stream(stream) = stream else { panic!("expected a stream") };
        let plain = cm.execute(&Instruction::VlcDecompress { stream }).unwrap();
        assert_eq!(plain.as_bytes().unwrap(), &data[..]);
    }
}
