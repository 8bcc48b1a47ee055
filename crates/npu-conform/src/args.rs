// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line options of a conformance run, shared by the binaries.

use clap::Args;
use npu_chip::ChipVariant;
use npu_driver::SuiteConfig;
use npu_ref::AtanTestMode;

/// Options selecting the device and data of a run.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Chip variant: 180x, 181x, 1822, 183x or 1880v2.
    #[arg(long, default_value = "1880v2")]
    pub variant: ChipVariant,

    /// Seed for all generated data.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Arctangent mode (fixed, accuracy, u8); all three when omitted.
    #[arg(long)]
    pub atan_mode: Option<AtanTestMode>,

    /// Accepted arctangent error.
    #[arg(long, default_value_t = 0.01)]
    pub atan_epsilon: f32,

    /// Randomized cases per operator family.
    #[arg(long, default_value_t = 4)]
    pub cases: usize,

    /// Data regenerations per parameter search.
    #[arg(long, default_value_t = 5)]
    pub retries: u32,

    /// Show detail for passing and skipped checks.
    #[arg(long, short)]
    pub verbose: bool,
}

impl RunArgs {
    /// The suite settings these options describe.
    pub fn config(&self) -> SuiteConfig {
        let cfg = SuiteConfig::new(self.variant)
            .with_seed(self.seed)
            .with_atan_epsilon(self.atan_epsilon)
            .with_random_cases(self.cases)
            .with_retry_budget(self.retries)
            .with_verbose(self.verbose);
        match self.atan_mode {
            Some(mode) => cfg.with_atan_mode(mode),
            None => cfg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        run: RunArgs,
    }

    #[test]
    fn defaults_match_suite_defaults() {
        let cli = Cli::parse_from(["conformance"]);
        assert_eq!(cli.run.config(), SuiteConfig::default());
    }

    #[test]
    fn options_reach_the_config() {
        let cli =
            Cli::parse_from(["conformance", "--variant", "cv181x", "--seed", "17", "--atan-mode", "u8", "-v"]);
        let cfg = cli.run.config();
        assert_eq!(cfg.variant, ChipVariant::Cv181x);
        assert_eq!(cfg.seed, 17);
        assert_eq!(cfg.atan_modes(), [AtanTestMode::DataCompareU8]);
        assert!(cfg.verbose);
    }

    #[test]
    fn unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["conformance", "--variant", "k230"]).is_err());
    }
}
