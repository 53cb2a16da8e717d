mod utils;
#[allow(unused)]
use utils::*;

use anyhow::Result;
use stampede::prelude::*;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

#[tokio::test]
async fn loops_until_shutdown() -> Result<()> {
    let (addr, _state) = spawn_shop().await;
    let client = ShopClient::new(&target(addr))?;
    let config = fast_workload();
    let log = CheckLog::new();
    let (tx, rx) = watch::channel(false);

    let user = run_virtual_user(&client, &config, &log, rx);
    let stopper = async {
        sleep(Duration::from_millis(150)).await;
        tx.send(true).unwrap();
    };
    let (report, ()) = tokio::join!(user, stopper);
    let report = report?;

    assert!(report.iterations >= 2);
    // One batch of three per iteration, one check per iteration.
    assert_eq!(report.tally.total(), report.iterations * 3);
    assert_eq!(log.counts(INFO_CHECK).total(), report.iterations);
    Ok(())
}

#[tokio::test]
async fn setup_failure_aborts_before_any_iteration() -> Result<()> {
    let (addr, state) = spawn_shop().await;
    state.fail_next_auth(u64::MAX);
    let client = ShopClient::new(&target(addr))?;
    let config = fast_workload();
    let log = CheckLog::new();
    let (_tx, rx) = watch::channel(false);

    let err = run_virtual_user(&client, &config, &log, rx)
        .await
        .unwrap_err();

    assert_eq!(err.attempts(), config.retry.max_attempts);
    assert!(state.requests().is_empty());
    assert_eq!(log.counts(INFO_CHECK).total(), 0);
    Ok(())
}

#[tokio::test]
async fn failed_check_does_not_stop_the_loop() -> Result<()> {
    let (addr, state) = spawn_shop().await;
    let client = ShopClient::new(&target(addr))?;
    let config = fast_workload();
    let log = CheckLog::new();
    let (tx, rx) = watch::channel(false);

    state.fail_next_info(1);
    let user = run_virtual_user(&client, &config, &log, rx);
    let stopper = async {
        sleep(Duration::from_millis(150)).await;
        tx.send(true).unwrap();
    };
    let (report, ()) = tokio::join!(user, stopper);
    let report = report?;

    assert!(report.iterations >= 2);
    let counts = log.counts(INFO_CHECK);
    assert_eq!(counts.failed, 1);
    assert!(counts.passed >= 1);
    Ok(())
}

#[tokio::test]
async fn dropped_engine_stops_the_loop() -> Result<()> {
    let (addr, _state) = spawn_shop().await;
    let client = ShopClient::new(&target(addr))?;
    let config = fast_workload();
    let log = CheckLog::new();
    let (tx, rx) = watch::channel(false);

    let user = run_virtual_user(&client, &config, &log, rx);
    let dropper = async {
        sleep(Duration::from_millis(60)).await;
        drop(tx);
    };
    let (report, ()) = tokio::join!(user, dropper);

    assert!(report?.iterations >= 1);
    Ok(())
}
