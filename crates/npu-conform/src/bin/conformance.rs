// SPDX-License-Identifier: AGPL-3.0-only

//! Full conformance run against one chip variant.
//!
//! ## Check families
//!
//! | Family | What is compared |
//! |--------|------------------|
//! | mul_qm | recorded vector, then random operands with a searched scale |
//! | depthwise | recorded 8-channel case, then random windows with per-channel scales |
//! | avg_pool | random windows, strides random, 15, 16 and 31 |
//! | ge / min_const / bf16 add | random elementwise operands |
//! | tdma | copies, fills, C/W and N/C transposes, NHWC reorder, strided writes |
//! | vlc | stream bytes, decode, re-encode, in hardware and compiler bias modes |
//! | atan / reciprocal | lookup-table results in each arctangent mode |
//!
//! ## Usage
//!
//!   cargo run --bin npu-conformance                          # 1880v2, seed 0
//!   cargo run --bin npu-conformance -- --variant 181x --seed 7
//!   cargo run --bin npu-conformance -- --atan-mode fixed --verbose

use anyhow::Result;
use clap::Parser;
use npu_conform::{run_suite, RunArgs, Suite};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "npu-conformance", about = "NPU conformance suite", version)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();
    let cfg = cli.run.config();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║  NPU Conformance Suite                                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    let info = cfg.variant.info();
    println!("Variant : {}", cfg.variant);
    println!("Lanes   : {}  (EU {}, local memory {} KiB)", info.npu_num, info.eu_num, info.lmem_size / 1024);
    println!("bf16    : {}", if cfg.variant.supports_bf16() { "yes" } else { "no (bf16 checks skipped)" });
    println!("Seed    : {}", cfg.seed);
    println!();

    let report = run_suite(&cfg, Suite::new(cfg.verbose))?;
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
