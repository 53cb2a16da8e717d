use crate::{RunSummary, FAILURE_RATE_LIMIT, LATENCY_LIMIT, LATENCY_QUANTILE};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

/// One ramp segment: ramp the virtual-user count to `target` over `duration`.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub target: u32,
    #[serde_as(as = "DurationSecondsWithFrac")]
    pub duration: Duration,
}

impl Stage {
    pub fn new(target: u32, duration: Duration) -> Self {
        Self { target, duration }
    }
}

/// Ordered ramp segments handed to the load engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampPlan {
    pub stages: Vec<Stage>,
}

impl RampPlan {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn peak_target(&self) -> u32 {
        self.stages.iter().map(|s| s.target).max().unwrap_or(0)
    }
}

impl Default for RampPlan {
    /// The fixed profile: 0->100 over 30s, 100->1000 over 1m, 1000->0 over 30s.
    fn default() -> Self {
        Self::new(vec![
            Stage::new(100, Duration::from_secs(30)),
            Stage::new(1000, Duration::from_secs(60)),
            Stage::new(0, Duration::from_secs(30)),
        ])
    }
}

/// Pass iff the observed latency at `quantile` stays under `limit`.
#[serde_as]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatencyThreshold {
    pub quantile: f64,
    #[serde_as(as = "DurationSecondsWithFrac")]
    pub limit: Duration,
}

impl LatencyThreshold {
    pub fn accepts(&self, observed: Duration) -> bool {
        observed < self.limit
    }
}

impl Default for LatencyThreshold {
    fn default() -> Self {
        Self {
            quantile: LATENCY_QUANTILE,
            limit: LATENCY_LIMIT,
        }
    }
}

/// Pass iff the observed request failure rate stays under `limit`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FailureRateThreshold {
    pub limit: f64,
}

impl FailureRateThreshold {
    pub fn accepts(&self, observed: f64) -> bool {
        observed < self.limit
    }
}

impl Default for FailureRateThreshold {
    fn default() -> Self {
        Self {
            limit: FAILURE_RATE_LIMIT,
        }
    }
}

/// The run's pass/fail criteria. Enforcement over live metrics is owned by
/// the load engine; these are the declarative criteria plus predicates over
/// an aggregated summary.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Thresholds {
    pub latency: LatencyThreshold,
    pub failure_rate: FailureRateThreshold,
}

impl Thresholds {
    pub fn passes(&self, summary: &RunSummary) -> bool {
        self.latency.accepts(summary.latency) && self.failure_rate.accepts(summary.requests.error_rate())
    }
}
