//! Load-test workload for the coin-shop API.
//!
//! The library owns the designed behavior of the test: the one-time
//! authentication handshake (with a bounded retry), the per-iteration
//! three-request batch with its check, and the per-virtual-user loop.
//! Scheduling many virtual users, ramping, metric aggregation, and threshold
//! enforcement belong to an external load engine, reached through the
//! [`engine::LoadEngine`] capability interface.

pub mod checks;
pub mod client;
pub mod engine;
pub mod retry;
pub mod scenario;

pub use scenario::{iteration, run_virtual_user, setup};

pub mod prelude {
    pub use crate::checks::{CheckLog, CheckSink};
    pub use crate::client::{RequestSpec, Session, ShopClient};
    pub use crate::engine::LoadEngine;
    pub use crate::retry::{retry, RetryError};
    pub use crate::scenario::{iteration, run_virtual_user, setup, INFO_CHECK};
    pub use stampede_core::{
        RampPlan, RetryPolicy, RunSummary, Stage, TargetConfig, Thresholds, WorkloadConfig,
    };
}
