use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

/// Aggregate request outcome counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RequestTally {
    pub success_count: u64,
    pub error_count: u64,
}

impl RequestTally {
    pub fn record(&mut self, success: bool) {
        if success {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    pub fn merge(&mut self, other: &RequestTally) {
        self.success_count += other.success_count;
        self.error_count += other.error_count;
    }

    pub fn total(&self) -> u64 {
        self.success_count + self.error_count
    }

    pub fn error_rate(&self) -> f64 {
        if self.total() == 0 {
            0.
        } else {
            self.error_count as f64 / self.total() as f64
        }
    }
}

/// Minimal aggregate statistics for a completed run.
///
/// `latency` is the observed value at the latency threshold's quantile, as
/// reported by the engine. More stats will be added over time.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub iterations: u64,
    pub requests: RequestTally,
    #[serde_as(as = "DurationSecondsWithFrac")]
    pub latency: Duration,
}
