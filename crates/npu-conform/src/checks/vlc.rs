// SPDX-License-Identifier: AGPL-3.0-only

//! VLC codec checks.
//!
//! The device's stream must carry the requested settings, stay within the
//! size bound, and decode back to the input both with the standalone
//! reader in `oracle` and on the device. Re-encoding the decoded
//! data with the header's own settings must reproduce the stream.

use super::{bf16_unit, expect};
use crate::oracle::{self, VlcHeader};
use crate::suite::{compare, CheckResult, Suite};
use anyhow::{bail, Result};
use bytes::Bytes;
use npu_driver::{run_one, ChipBackend, Instruction, Output, SuiteConfig};
use npu_ref::testdata::vlc_test_data;
use npu_ref::vlc::compressed_upper_bound;
use npu_ref::{BiasMode, CommandInfo};
use rand::rngs::StdRng;
use rand::Rng;

/// `(signed, bf16)` data kinds.
const KINDS: [(bool, bool); 3] = [(true, false), (false, false), (false, true)];

/// Largest random input in bytes.
const MAX_LEN: usize = 16 * 1024;

/// Register the codec checks.
pub fn register(suite: &mut Suite, dev: &mut dyn ChipBackend, cfg: &SuiteConfig, rng: &mut StdRng) {
    for (signed, is_bf16) in KINDS {
        let kind = match (signed, is_bf16) {
            (_, true) => "bf16",
            (true, false) => "i8",
            (false, false) => "u8",
        };
        for mode in BiasMode::ALL {
            suite.run(&format!("vlc: {kind}, {mode} biases"), || round_trip(dev, cfg, rng, mode, signed, is_bf16));
        }
    }
}

fn stream_of(out: Output) -> Result<Bytes> {
    match out {
        Output::Stream(s) => Ok(s),
        other => bail!("compress returned {} non-stream elements", other.len()),
    }
}

fn round_trip(
    dev: &mut dyn ChipBackend,
    cfg: &SuiteConfig,
    rng: &mut StdRng,
    mode: BiasMode,
    signed: bool,
    is_bf16: bool,
) -> Result<CheckResult> {
    if is_bf16 {
        if let Some(skip) = bf16_unit(cfg) {
            return Ok(skip);
        }
    }
    let len = rng.gen_range(1..=MAX_LEN / 2) * 2;
    let data = vlc_test_data(rng, len, signed, is_bf16);
    let cmd = mode.resolve(&data, CommandInfo::new(signed, is_bf16));

    let stream = stream_of(run_one(dev, Instruction::VlcCompress { data: data.clone().into(), cmd })?)?;
    let header = VlcHeader::read(&stream)?;
    if header.cmd != cmd || header.original_len != len {
        return Ok(CheckResult::fail(format!(
            "header records {:?} over {} bytes, expected {cmd:?} over {len}",
            header.cmd, header.original_len
        )));
    }
    if stream.len() % 16 != 0 || stream.len() > compressed_upper_bound(len, is_bf16) {
        return Ok(CheckResult::fail(format!("stream of {} bytes breaks the size bound", stream.len())));
    }
    let r = compare("host decode", &oracle::vlc_expand(&stream)?, &data);
    if !r.passed() {
        return Ok(r);
    }

    let plain = run_one(dev, Instruction::VlcDecompress { stream: stream.clone() })?;
    let r = expect("decompressed", &plain, &Output::U8(data));
    if !r.passed() {
        return Ok(r);
    }

    let again = stream_of(run_one(dev, Instruction::VlcCompress { data: Bytes::from(plain_bytes(plain)), cmd: header.cmd })?)?;
    let r = compare("recompressed", &again[..], &stream[..]);
    if !r.passed() {
        return Ok(r);
    }
    Ok(CheckResult::pass(format!("{len} bytes -> {} byte stream (bias {}, {})", stream.len(), cmd.bias0, cmd.bias1)))
}

fn plain_bytes(out: Output) -> Vec<u8> {
    match out {
        Output::U8(v) => v,
        _ => Vec::new(),
    }
}
