//! Integration tests: complete conformance runs on the software cmodel

use npu_chip::ChipVariant;
use npu_conform::{run_suite, Suite};
use npu_driver::SuiteConfig;

#[test]
fn small_lane_variant_passes_everything() {
    let cfg = SuiteConfig::new(ChipVariant::Cv180x).with_seed(2024).with_random_cases(2);
    let report = run_suite(&cfg, Suite::quiet()).unwrap();
    assert!(report.is_success(), "{report}");
    assert!(report.passed > 30, "{report}");
}

#[test]
fn no_bf16_unit_means_skips_not_failures() {
    let cfg = SuiteConfig::new(ChipVariant::Cv183x).with_random_cases(1);
    let report = run_suite(&cfg, Suite::quiet()).unwrap();
    assert!(report.is_success(), "{report}");
    // atan x3, reciprocal x2, bf16 add, bf16 tdma x5, widen x2, bf16 vlc x2
    assert!(report.skipped >= 15, "{report}");
}

#[test]
fn same_seed_same_report() {
    let cfg = SuiteConfig::new(ChipVariant::Cv181x).with_seed(9).with_random_cases(1);
    let a = run_suite(&cfg, Suite::quiet()).unwrap();
    let b = run_suite(&cfg, Suite::quiet()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_settings_rejected_before_running() {
    let cfg = SuiteConfig::default().with_retry_budget(0);
    assert!(run_suite(&cfg, Suite::quiet()).is_err());
}
