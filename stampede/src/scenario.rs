//! The workload itself: setup handshake, iteration batch, virtual-user loop.
use crate::checks::{self, CheckSink};
use crate::client::{AuthError, BatchResponse, RequestSpec, Session, ShopClient};
use crate::retry::{retry, RetryError};
use reqwest::StatusCode;
use stampede_core::{
    RequestTally, RetryPolicy, WorkloadConfig, BUY_ITEM, TRANSFER_AMOUNT, TRANSFER_RECIPIENT,
};
use tokio::sync::watch;
use tokio::time::sleep;
#[allow(unused_imports)]
use tracing::{debug, info, instrument, warn};

/// Check recorded against the info response on every iteration.
pub const INFO_CHECK: &str = "info status is 200";

/// Fatal: authentication did not succeed within the retry budget, so the
/// virtual user never starts iterating.
#[derive(Debug, thiserror::Error)]
#[error("setup failed: {0}")]
pub struct SetupError(#[from] RetryError<AuthError>);

impl SetupError {
    pub fn attempts(&self) -> u32 {
        self.0.attempts
    }
}

/// Authenticate once against the target, retrying on any failure. Transport
/// errors and non-success statuses both consume attempts.
#[instrument(skip_all)]
pub async fn setup(client: &ShopClient, policy: &RetryPolicy) -> Result<Session, SetupError> {
    let session = retry(policy, || client.authenticate()).await?;
    info!("Session token obtained");
    Ok(session)
}

/// Outcome of one iteration batch, responses in request order.
#[derive(Debug)]
pub struct IterationReport {
    pub responses: Vec<Result<BatchResponse, reqwest::Error>>,
    pub tally: RequestTally,
    pub info_ok: bool,
}

/// One cycle of the workload: the fixed three-request batch, then the info
/// check. The check result is recorded and never aborts the iteration; the
/// other responses are observed in the tally but not asserted.
#[instrument(skip_all)]
pub async fn iteration(
    client: &ShopClient,
    session: &Session,
    sink: &dyn CheckSink,
) -> IterationReport {
    let specs = [
        RequestSpec::info(),
        RequestSpec::buy(BUY_ITEM),
        RequestSpec::send_coin(TRANSFER_RECIPIENT, TRANSFER_AMOUNT),
    ];
    let responses = client.batch(session, &specs).await;

    let mut tally = RequestTally::default();
    for outcome in &responses {
        match outcome {
            Ok(res) if res.status.is_success() => tally.record(true),
            Ok(res) => {
                debug!(status = %res.status, "Request returned a failure status");
                tally.record(false);
            }
            Err(err) => {
                debug!("Request error: {err}");
                tally.record(false);
            }
        }
    }

    let info_ok = matches!(responses.first(), Some(Ok(res)) if res.status == StatusCode::OK);
    checks::record(sink, INFO_CHECK, info_ok);

    IterationReport {
        responses,
        tally,
        info_ok,
    }
}

/// What one virtual user did over its lifetime.
#[derive(Debug, Default)]
pub struct VirtualUserReport {
    pub iterations: u64,
    pub tally: RequestTally,
}

/// Drive one virtual user: authenticate once, then loop the iteration
/// workload with the configured pause until `shutdown` flips to true (or its
/// sender goes away).
#[instrument(skip_all)]
pub async fn run_virtual_user(
    client: &ShopClient,
    config: &WorkloadConfig,
    sink: &dyn CheckSink,
    mut shutdown: watch::Receiver<bool>,
) -> Result<VirtualUserReport, SetupError> {
    let session = setup(client, &config.retry).await?;

    let mut report = VirtualUserReport::default();
    while !*shutdown.borrow() {
        let outcome = iteration(client, &session, sink).await;
        report.iterations += 1;
        report.tally.merge(&outcome.tally);

        tokio::select! {
            _ = sleep(config.pause) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!(iterations = report.iterations, "Virtual user finished");
    Ok(report)
}
