// SPDX-License-Identifier: AGPL-3.0-only

//! `npu`: command-line front end for the NPU reference layer.
//!
//! ```text
//! USAGE:
//!   npu variants                         List supported chip variants
//!   npu info <variant>                   Lane, EU and memory geometry
//!   npu compress <in> <out> [flags]      VLC-compress a file
//!   npu decompress <in> <out>            Decompress a VLC stream
//!   npu inspect <stream>                 Print a stream header
//!   npu conform [--variant ...]          Run the conformance suite
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use npu_chip::ChipVariant;
use npu_conform::{run_suite, RunArgs, Suite};
use npu_ref::vlc::StreamHeader;
use npu_ref::{vlc_compress, vlc_decompress, BiasMode, CommandInfo};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "npu", about = "NPU reference numerics CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List every supported chip variant.
    Variants,
    /// Print lane, EU and memory geometry of one variant.
    Info {
        /// Variant name (e.g. 181x, cv1822, bm1880v2).
        variant: ChipVariant,
    },
    /// Compress a file with the VLC codec.
    Compress {
        /// Raw input.
        input: PathBuf,
        /// Stream to write.
        output: PathBuf,
        /// Treat bytes as i8.
        #[arg(long)]
        signed: bool,
        /// Treat input as little-endian bf16.
        #[arg(long, conflicts_with = "signed")]
        bf16: bool,
        /// Estimate biases from the data instead of using zero biases.
        #[arg(long)]
        estimate: bool,
    },
    /// Decompress a VLC stream.
    Decompress {
        /// Stream to read.
        input: PathBuf,
        /// Raw output.
        output: PathBuf,
    },
    /// Print the header of a VLC stream.
    Inspect {
        /// Stream to read.
        input: PathBuf,
    },
    /// Run the conformance suite against the software cmodel.
    Conform(RunArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Variants => cmd_variants(),
        Cmd::Info { variant } => cmd_info(variant),
        Cmd::Compress { input, output, signed, bf16, estimate } => {
            cmd_compress(&input, &output, signed, bf16, estimate)?;
        }
        Cmd::Decompress { input, output } => cmd_decompress(&input, &output)?,
        Cmd::Inspect { input } => cmd_inspect(&input)?,
        Cmd::Conform(args) => cmd_conform(&args)?,
    }

    Ok(())
}

fn cmd_variants() {
    for v in ChipVariant::ALL {
        let i = v.info();
        println!("{:<8} {:>2} lanes  bf16 {}", v.name(), i.npu_num, if v.supports_bf16() { "yes" } else { "no" });
    }
}

fn cmd_info(variant: ChipVariant) {
    let i = variant.info();
    println!("Variant      : {variant}");
    println!("Lanes (NPU)  : {}", i.npu_num);
    println!("EUs per lane : {}", i.eu_num);
    println!("Local memory : {} KiB per lane, {} banks", i.lmem_size / 1024, i.lmem_banks);
    println!("bf16 unit    : {}", if variant.supports_bf16() { "yes" } else { "no" });
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

fn cmd_compress(input: &Path, output: &Path, signed: bool, bf16: bool, estimate: bool) -> Result<()> {
    let data = read(input)?;
    if bf16 && data.len() % 2 != 0 {
        bail!("{}: {} bytes is not a whole number of bf16 elements", input.display(), data.len());
    }
    let mode = if estimate { BiasMode::Compiler } else { BiasMode::Hardware };
    let cmd = mode.resolve(&data, CommandInfo::new(signed, bf16));
    let stream = vlc_compress(&data, &cmd)?;
    write(output, &stream)?;
    info!(bias0 = cmd.bias0, bias1 = cmd.bias1, zero_guard = cmd.zero_guard, "{mode} biases");

    #[allow(clippy::cast_precision_loss)]
    let ratio = if data.is_empty() { 1.0 } else { stream.len() as f64 / data.len() as f64 };
    println!("{} -> {}: {} -> {} bytes ({:.1}%)", input.display(), output.display(), data.len(), stream.len(), ratio * 100.0);
    Ok(())
}

fn cmd_decompress(input: &Path, output: &Path) -> Result<()> {
    let stream = read(input)?;
    let data = vlc_decompress(&stream).with_context(|| format!("decoding {}", input.display()))?;
    write(output, &data)?;
    println!("{} -> {}: {} bytes", input.display(), output.display(), data.len());
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let stream = read(input)?;
    let h = StreamHeader::parse(&stream)?;
    let kind = match (h.cmd.is_bf16, h.cmd.signedness) {
        (true, _) => "bf16",
        (false, true) => "i8",
        (false, false) => "u8",
    };
    println!("Stream       : {} bytes", stream.len());
    println!("Data         : {kind}, {} bytes", h.original_len);
    println!("Biases       : {} / {}", h.cmd.bias0, h.cmd.bias1);
    println!("Zero guard   : {}", if h.cmd.zero_guard { "on" } else { "off" });
    println!("Payload      : {} bytes", h.payload_len);
    Ok(())
}

fn cmd_conform(args: &RunArgs) -> Result<()> {
    let cfg = args.config();
    println!("Conformance: {} seed {}", cfg.variant, cfg.seed);
    println!();
    let report = run_suite(&cfg, Suite::new(cfg.verbose))?;
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["npu", "info", "cv1822"]).unwrap();
        assert!(matches!(cli.command, Cmd::Info { variant: ChipVariant::Cv182x }));
        let cli = Cli::try_parse_from(["npu", "conform", "--variant", "180x", "--seed", "3"]).unwrap();
        assert!(matches!(cli.command, Cmd::Conform(ref a) if a.seed == 3 && a.variant == ChipVariant::Cv180x));
        assert!(Cli::try_parse_from(["npu", "compress", "a", "b", "--signed", "--bf16"]).is_err());
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("npu-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (raw, packed, back) = (dir.join("raw"), dir.join("raw.vlc"), dir.join("raw.out"));
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 11) as u8).collect();
        std::fs::write(&raw, &data).unwrap();

        cmd_compress(&raw, &packed, false, false, true).unwrap();
        cmd_inspect(&packed).unwrap();
        cmd_decompress(&packed, &back).unwrap();
        assert_eq!(std::fs::read(&back).unwrap(), data);

        std::fs::write(&raw, [1u8, 2, 3]).unwrap();
        assert!(cmd_compress(&raw, &packed, false, true, false).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
