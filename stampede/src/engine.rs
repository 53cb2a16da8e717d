//! Capability interface to the external load-generation engine.
use crate::checks::CheckSink;
use stampede_core::{RampPlan, RunSummary};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;

/// The body of one virtual user. The engine hands each instance a shutdown
/// receiver it flips when the ramp plan ends.
pub type VirtualUserFn = Arc<
    dyn Fn(watch::Receiver<bool>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync,
>;

/// What the workload needs from a load engine: schedule virtual users per
/// the ramp plan and aggregate check results. Ramping, concurrency, metric
/// collection, and threshold enforcement all live behind this seam, which is
/// what lets the workload run under a stub in tests.
pub trait LoadEngine: CheckSink {
    fn run_virtual_users(
        &self,
        plan: RampPlan,
        workload: VirtualUserFn,
    ) -> Pin<Box<dyn Future<Output = RunSummary> + Send + '_>>;
}
