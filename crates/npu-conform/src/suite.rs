// SPDX-License-Identifier: AGPL-3.0-only

//! Check bookkeeping: pass, fail and skip counts with console output.

use anyhow::Result;
use std::fmt::Display;

/// Verdict of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Device matched the reference.
    Pass,
    /// Device disagreed with the reference.
    Fail,
    /// The check could not run (no usable data, missing unit).
    Skip,
}

/// Verdict plus a one-line explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Verdict.
    pub outcome: Outcome,
    /// Detail shown on failure, or always in verbose mode.
    pub message: String,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(message: impl Into<String>) -> Self {
        Self { outcome: Outcome::Pass, message: message.into() }
    }

    /// A failing result.
    pub fn fail(message: impl Into<String>) -> Self {
        Self { outcome: Outcome::Fail, message: message.into() }
    }

    /// A skipped check.
    pub fn skip(message: impl Into<String>) -> Self {
        Self { outcome: Outcome::Skip, message: message.into() }
    }

    /// `true` for [`Outcome::Pass`].
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// Compare two element slices; the first disagreement fails the check.
pub fn compare<T: PartialEq + Display>(what: &str, got: &[T], expected: &[T]) -> CheckResult {
    if got.len() != expected.len() {
        return CheckResult::fail(format!("{what}: {} elements, expected {}", got.len(), expected.len()));
    }
    match got.iter().zip(expected).position(|(g, e)| g != e) {
        Some(i) => CheckResult::fail(format!("{what}: index {i}: got {}, expected {}", got[i], expected[i])),
        None => CheckResult::pass(format!("{what}: {} elements match", got.len())),
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed or errored.
    pub failed: usize,
    /// Checks that could not run.
    pub skipped: usize,
}

impl Report {
    /// No check failed.
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Checks run, skipped included.
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped  ({}/{})",
            self.passed,
            self.failed,
            self.skipped,
            self.passed,
            self.total()
        )
    }
}

/// Runs named checks and keeps the score.
#[derive(Debug, Default)]
pub struct Suite {
    echo: bool,
    verbose: bool,
    report: Report,
    failures: Vec<String>,
}

impl Suite {
    /// Suite that prints one line per check; `verbose` adds the detail of
    /// passing and skipped checks.
    pub fn new(verbose: bool) -> Self {
        Self { echo: true, verbose, ..Self::default() }
    }

    /// Suite that only counts, for use inside tests.
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Run one check. An `Err` counts as a failure.
    pub fn run<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce() -> Result<CheckResult>,
    {
        if self.echo {
            print!("  {name:<60} ");
        }
        let result = f().unwrap_or_else(|e| CheckResult::fail(format!("error: {e:#}")));
        match result.outcome {
            Outcome::Pass => {
                self.report.passed += 1;
                self.print("✓ PASS", &result.message, self.verbose);
            }
            Outcome::Skip => {
                self.report.skipped += 1;
                self.print("─ SKIP", &result.message, self.verbose);
            }
            Outcome::Fail => {
                self.report.failed += 1;
                tracing::warn!("{name}: {}", result.message);
                self.print("✗ FAIL", &result.message, true);
                self.failures.push(format!("{name}: {}", result.message));
            }
        }
    }

    fn print(&self, verdict: &str, message: &str, detail: bool) {
        if self.echo {
            println!("{verdict}");
            if detail {
                println!("         {message}");
            }
        }
    }

    /// Counts so far.
    pub const fn report(&self) -> Report {
        self.report
    }

    /// `name: message` of every failed check, in run order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Print the summary line and return the totals.
    pub fn finish(self) -> Report {
        if self.echo {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("Result: {}", self.report);
            if self.report.is_success() {
                println!("All checks passed ✓");
            } else {
                println!("CONFORMANCE FAILED: {} check(s) require attention", self.report.failed);
            }
        }
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_outcome() {
        let mut suite = Suite::quiet();
        suite.run("a", || Ok(CheckResult::pass("ok")));
        suite.run("b", || Ok(CheckResult::skip("no data")));
        suite.run("c", || Ok(CheckResult::fail("off by one")));
        suite.run("d", || anyhow::bail!("device gone"));
        let report = suite.report();
        assert_eq!(report, Report { passed: 1, failed: 2, skipped: 1 });
        assert!(!report.is_success());
        assert_eq!(suite.failures().len(), 2);
        assert!(suite.failures()[1].contains("device gone"));
        assert_eq!(suite.finish().total(), 4);
    }

    #[test]
    fn compare_reports_first_mismatch() {
        assert!(compare("x", &[1, 2, 3], &[1, 2, 3]).passed());
        let r = compare("x", &[1, 5, 7], &[1, 2, 3]);
        assert_eq!(r.outcome, Outcome::Fail);
        assert_eq!(r.message, "x: index 1: got 5, expected 2");
        assert_eq!(compare::<u8>("x", &[1], &[]).outcome, Outcome::Fail);
    }

    #[test]
    fn report_display() {
        let r = Report { passed: 3, failed: 0, skipped: 1 };
        assert_eq!(r.to_string(), "3 passed, 0 failed, 1 skipped  (3/4)");
    }
}
