// src/recorder.rs
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

/// Why a check failed. Precondition failures mean the sequence could not
/// proceed; the other three mean the remote API misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, DNS, timeout.
    Transport,
    /// Non-2xx status.
    Protocol,
    /// 2xx that failed a semantic check.
    Contract,
    /// Required state (token, created id) was missing.
    Precondition,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Transport => "transport",
            FailureKind::Protocol => "protocol",
            FailureKind::Contract => "contract",
            FailureKind::Precondition => "precondition",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail(FailureKind),
}

/// One recorded check. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub name: String,
    pub status: Status,
    pub message: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            Status::Pass => None,
            Status::Fail(kind) => Some(kind),
        }
    }
}

/// Append-only log of check outcomes for one run.
#[derive(Debug, Default)]
pub struct ResultRecorder {
    results: Vec<TestResult>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one outcome. Duplicate names are kept; uniqueness is up to the
    /// caller.
    pub fn record(&mut self, name: impl Into<String>, status: Status, message: Option<String>) {
        let result = TestResult {
            name: name.into(),
            status,
            message,
            recorded_at: Utc::now(),
        };

        match result.status {
            Status::Pass => info!("✓ {}", result.name),
            Status::Fail(kind) => warn!(
                "✗ {} [{kind}]: {}",
                result.name,
                result.message.as_deref().unwrap_or("no details")
            ),
        }

        self.results.push(result);
    }

    pub fn pass(&mut self, name: impl Into<String>) {
        self.record(name, Status::Pass, None);
    }

    pub fn fail(&mut self, name: impl Into<String>, kind: FailureKind, message: impl Into<String>) {
        self.record(name, Status::Fail(kind), Some(message.into()));
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[cfg(test)]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn summary(&self) -> Summary {
        let failures: Vec<TestResult> = self
            .results
            .iter()
            .filter(|r| !r.passed())
            .cloned()
            .collect();

        Summary {
            total: self.results.len(),
            passed: self.results.len() - failures.len(),
            failed: failures.len(),
            failures,
        }
    }
}

/// Aggregate view of a run. `passed + failed == total` by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed results in recording order.
    pub failures: Vec<TestResult>,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total as f64
        }
    }

    pub fn precondition_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|r| r.failure_kind() == Some(FailureKind::Precondition))
            .count()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== TEST SUMMARY =====")?;
        writeln!(f, "Tests completed: {}", self.total)?;
        writeln!(
            f,
            "Tests passed:    {} ({:.1}%)",
            self.passed,
            self.success_rate()
        )?;
        writeln!(f, "Tests failed:    {}", self.failed)?;

        let skipped = self.precondition_failures();
        if skipped > 0 {
            writeln!(f, "  of which not run (precondition): {skipped}")?;
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed tests:")?;
            for r in &self.failures {
                let kind = r.failure_kind().map(|k| k.to_string()).unwrap_or_default();
                writeln!(
                    f,
                    "  ✗ {} [{kind}]: {}",
                    r.name,
                    r.message.as_deref().unwrap_or("Unknown error")
                )?;
            }
        } else if self.total > 0 {
            writeln!(f)?;
            writeln!(f, "All tests passed successfully!")?;
        }

        write!(f, "========================")
    }
}
