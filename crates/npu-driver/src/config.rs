//! Conformance suite configuration

use crate::error::{DriverError, Result};
use npu_chip::ChipVariant;
use npu_ref::AtanTestMode;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Settings shared by every check of a conformance run.
///
/// All randomness in a run comes from [`SuiteConfig::rng`], so a seed
/// reproduces the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteConfig {
    /// Target variant; fixes lane count and bf16 availability
    pub variant: ChipVariant,
    /// Seed for all generated data
    pub seed: u64,
    /// Data regenerations allowed per parameter search
    pub retry_budget: u32,
    /// Arctangent mode to run; `None` runs all three
    pub atan_mode: Option<AtanTestMode>,
    /// Accepted arctangent error
    pub atan_epsilon: f32,
    /// Arctangent input range `(lo, hi)`
    pub atan_range: (i32, i32),
    /// Randomized cases per op family
    pub random_cases: usize,
    /// Print passing checks as well as failures
    pub verbose: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::new(ChipVariant::default())
    }
}

impl SuiteConfig {
    /// Defaults for `variant`.
    pub const fn new(variant: ChipVariant) -> Self {
        Self {
            variant,
            seed: 0,
            retry_budget: 5,
            atan_mode: None,
            atan_epsilon: 0.01,
            atan_range: (-8, 8),
            random_cases: 4,
            verbose: false,
        }
    }

    /// Set the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the parameter-search retry budget.
    #[must_use]
    pub const fn with_retry_budget(mut self, budget: u32) -> Self {
        self.retry_budget = budget;
        self
    }

    /// Restrict arctangent checks to one mode.
    #[must_use]
    pub const fn with_atan_mode(mut self, mode: AtanTestMode) -> Self {
        self.atan_mode = Some(mode);
        self
    }

    /// Set the arctangent tolerance.
    #[must_use]
    pub const fn with_atan_epsilon(mut self, epsilon: f32) -> Self {
        self.atan_epsilon = epsilon;
        self
    }

    /// Set the arctangent input range.
    #[must_use]
    pub const fn with_atan_range(mut self, lo: i32, hi: i32) -> Self {
        self.atan_range = (lo, hi);
        self
    }

    /// Set the number of random cases per family.
    #[must_use]
    pub const fn with_random_cases(mut self, cases: usize) -> Self {
        self.random_cases = cases;
        self
    }

    /// Report passing checks too.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Generator for this run.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Arctangent modes to run.
    pub fn atan_modes(&self) -> Vec<AtanTestMode> {
        self.atan_mode.map_or_else(|| AtanTestMode::ALL.to_vec(), |m| vec![m])
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns error for a zero retry budget, a non-positive epsilon, or an
    /// arctangent range too narrow to generate inputs from.
    pub fn validate(&self) -> Result<()> {
        if self.retry_budget == 0 {
            return Err(DriverError::invalid_state("retry budget must be at least 1"));
        }
        if self.atan_epsilon.is_nan() || self.atan_epsilon <= 0.0 {
            return Err(DriverError::invalid_state(format!("atan epsilon {} must be positive", self.atan_epsilon)));
        }
        let (lo, hi) = self.atan_range;
        if hi <= 2 || lo >= hi {
            return Err(DriverError::invalid_state(format!("atan range ({lo}, {hi}) is empty or too narrow")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults() {
        let cfg = SuiteConfig::default();
        assert_eq!(cfg.variant, ChipVariant::Bm1880v2);
        assert_eq!(cfg.retry_budget, 5);
        assert_eq!(cfg.atan_range, (-8, 8));
        assert_eq!(cfg.atan_modes().len(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builders() {
        let cfg = SuiteConfig::new(ChipVariant::Cv182x)
            .with_seed(9)
            .with_atan_mode(AtanTestMode::DataCompareU8)
            .with_atan_epsilon(0.02)
            .with_verbose(true);
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.atan_modes(), [AtanTestMode::DataCompareU8]);
        assert!(cfg.verbose);
    }

    #[test]
    fn same_seed_same_stream() {
        let cfg = SuiteConfig::default().with_seed(1234);
        let a: Vec<u32> = (0..8).map(|_| cfg.rng().gen()).collect();
        let mut r = cfg.rng();
        let first: u32 = r.gen();
        assert!(a.iter().all(|&v| v == first));
    }

    #[test]
    fn rejects_bad_settings() {
        assert!(SuiteConfig::default().with_retry_budget(0).validate().is_err());
        assert!(SuiteConfig::default().with_atan_epsilon(0.0).validate().is_err());
        assert!(SuiteConfig::default().with_atan_epsilon(f32::NAN).validate().is_err());
        assert!(SuiteConfig::default().with_atan_range(0, 2).validate().is_err());
    }
}
