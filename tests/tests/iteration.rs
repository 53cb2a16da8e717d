mod utils;
#[allow(unused)]
use utils::*;

use anyhow::Result;
use stampede::prelude::*;

#[tokio::test]
async fn batch_issues_three_requests_in_order() -> Result<()> {
    let (addr, state) = spawn_shop().await;
    let client = ShopClient::new(&target(addr))?;
    let session = setup(&client, &RetryPolicy::default()).await?;
    let log = CheckLog::new();

    let report = iteration(&client, &session, &log).await;

    assert_eq!(report.responses.len(), 3);
    assert!(report.info_ok);
    assert_eq!(log.counts(INFO_CHECK).passed, 1);

    // Responses map back to input order: info first, then buy, then the
    // transfer, regardless of completion order.
    let bodies: Vec<String> = report
        .responses
        .iter()
        .map(|r| r.as_ref().unwrap().body.clone())
        .collect();
    let info: serde_json::Value = serde_json::from_str(&bodies[0])?;
    assert!(info.get("coins").is_some());
    assert_eq!(serde_json::from_str::<serde_json::Value>(&bodies[1])?["status"], "success");
    assert_eq!(serde_json::from_str::<serde_json::Value>(&bodies[2])?["status"], "success");

    // The mock saw all three requests, each with the session's token.
    let seen = state.requests();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|r| r.token == session.token()));
    let mut paths: Vec<&str> = seen.iter().map(|r| r.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(paths, ["/api/buy/test-item", "/api/info", "/api/sendCoin"]);
    Ok(())
}

#[tokio::test]
async fn failed_info_check_is_recorded_not_fatal() -> Result<()> {
    let (addr, state) = spawn_shop().await;
    let client = ShopClient::new(&target(addr))?;
    let session = setup(&client, &RetryPolicy::default()).await?;
    let log = CheckLog::new();

    state.fail_next_info(1);
    let report = iteration(&client, &session, &log).await;
    assert!(!report.info_ok);
    assert_eq!(report.tally.error_count, 1);
    assert_eq!(report.tally.success_count, 2);

    // The next cycle is unaffected.
    let report = iteration(&client, &session, &log).await;
    assert!(report.info_ok);

    let counts = log.counts(INFO_CHECK);
    assert_eq!(counts.failed, 1);
    assert_eq!(counts.passed, 1);
    Ok(())
}

#[tokio::test]
async fn shop_rejects_requests_without_a_token() -> Result<()> {
    let (addr, _state) = spawn_shop().await;

    let res = reqwest::Client::new()
        .get(format!("http://{addr}/api/info"))
        .send()
        .await?;

    assert_eq!(res.status(), 401);
    Ok(())
}
