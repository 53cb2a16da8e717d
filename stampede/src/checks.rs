//! Check recording: the engine capability plus an in-memory implementation.
use std::collections::HashMap;
use std::sync::RwLock;

/// Capability for recording a named pass/fail assertion. Implemented by the
/// load engine; checks feed its aggregated metrics, never abort an
/// iteration.
pub trait CheckSink: Send + Sync {
    fn record_check(&self, name: &str, passed: bool);
}

/// Central recording point. With the `metrics` feature enabled the check
/// also emits pass/fail counters labeled by check name.
pub(crate) fn record(sink: &dyn CheckSink, name: &str, passed: bool) {
    #[cfg(feature = "metrics")]
    {
        if passed {
            metrics::counter!("check_passed", "check" => name.to_owned()).increment(1);
        } else {
            metrics::counter!("check_failed", "check" => name.to_owned()).increment(1);
        }
    }

    sink.record_check(name, passed);
}

/// Pass/fail counters for one named check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckCounts {
    pub passed: u64,
    pub failed: u64,
}

impl CheckCounts {
    pub fn total(&self) -> u64 {
        self.passed + self.failed
    }
}

/// In-memory [`CheckSink`] for tests and development runs.
#[derive(Debug, Default)]
pub struct CheckLog {
    checks: RwLock<HashMap<String, CheckCounts>>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `name`; zero if the check never fired.
    pub fn counts(&self, name: &str) -> CheckCounts {
        self.checks
            .read()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or_default()
    }
}

impl CheckSink for CheckLog {
    fn record_check(&self, name: &str, passed: bool) {
        let mut checks = self.checks.write().unwrap();
        let counts = checks.entry(name.to_string()).or_default();
        if passed {
            counts.passed += 1;
        } else {
            counts.failed += 1;
        }
    }
}
