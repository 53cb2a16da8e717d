use crate::{
    DEFAULT_BASE_URL, DEFAULT_PASSWORD, DEFAULT_USERNAME, ITERATION_PAUSE, SETUP_ATTEMPTS,
    SETUP_RETRY_DELAY,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

/// Username/password pair used for the one-time authentication handshake.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Where the workload points and how it authenticates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    #[serde(default)]
    pub credentials: Credentials,
}

impl TargetConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::default(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Bounded attempts with a uniform delay between failures.
#[serde_as]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    #[serde_as(as = "DurationSecondsWithFrac")]
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: SETUP_ATTEMPTS,
            delay: SETUP_RETRY_DELAY,
        }
    }
}

/// Per-virtual-user knobs: the setup retry budget and the pause between
/// iteration batches.
#[serde_as]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorkloadConfig {
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde_as(as = "DurationSecondsWithFrac")]
    pub pause: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pause: ITERATION_PAUSE,
        }
    }
}
