use std::num::NonZeroU32;
use std::time::Duration;

/// Base URL of the target shop service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Credentials every virtual user authenticates with.
pub const DEFAULT_USERNAME: &str = "loadtest";
pub const DEFAULT_PASSWORD: &str = "testpass";

/// Item bought on every iteration.
pub const BUY_ITEM: &str = "test-item";

/// Recipient and amount for the per-iteration coin transfer.
pub const TRANSFER_RECIPIENT: &str = "recipient";
pub const TRANSFER_AMOUNT: NonZeroU32 = unsafe { NonZeroU32::new_unchecked(100) };

/// Attempt budget for the setup handshake.
pub const SETUP_ATTEMPTS: u32 = 5;

/// Delay between failed setup attempts.
pub const SETUP_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Pause after each iteration batch.
pub const ITERATION_PAUSE: Duration = Duration::from_secs(1);

/// The default latency threshold: p99.99 under 50ms.
pub const LATENCY_QUANTILE: f64 = 0.9999;
pub const LATENCY_LIMIT: Duration = Duration::from_millis(50);

/// The default failure-rate threshold: under 0.01% of requests failed.
pub const FAILURE_RATE_LIMIT: f64 = 0.0001;
