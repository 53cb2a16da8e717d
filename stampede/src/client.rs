//! HTTP client for the shop API and the iteration request descriptors.
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use stampede_core::TargetConfig;
use std::num::NonZeroU32;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Session credentials obtained by setup, shared read-only across iterations.
#[derive(Clone, Debug)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication returned status {0}")]
    Status(StatusCode),
    #[error("authentication returned an empty token")]
    EmptyToken,
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
}

/// One request within an iteration batch.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn info() -> Self {
        Self::get("/api/info")
    }

    pub fn buy(item: &str) -> Self {
        Self::get(format!("/api/buy/{item}"))
    }

    pub fn send_coin(to_user: &str, amount: NonZeroU32) -> Self {
        Self {
            method: Method::POST,
            path: "/api/sendCoin".to_string(),
            body: Some(serde_json::json!({
                "toUser": to_user,
                "amount": amount.get(),
            })),
        }
    }
}

/// A completed request from a batch. Individual failures surface as the
/// `Err` side of the batch result instead.
#[derive(Clone, Debug)]
pub struct BatchResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Thin wrapper over [`reqwest::Client`] pinned to one target service.
///
/// No per-request timeout is configured; the client defaults apply.
#[derive(Clone, Debug)]
pub struct ShopClient {
    http: reqwest::Client,
    config: TargetConfig,
}

impl ShopClient {
    pub fn new(config: &TargetConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            config: TargetConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                credentials: config.credentials.clone(),
            },
        })
    }

    /// POST `/api/auth` with the configured credentials. Non-success
    /// statuses come back as [`AuthError::Status`] so the caller's retry
    /// treats them the same as transport errors.
    pub async fn authenticate(&self) -> Result<Session, AuthError> {
        let res = self
            .http
            .post(self.url("/api/auth"))
            .json(&AuthRequest {
                username: &self.config.credentials.username,
                password: &self.config.credentials.password,
            })
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(AuthError::Status(status));
        }

        let body: AuthResponse = res.json().await?;
        if body.token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        debug!("Authenticated against {}", self.config.base_url);
        Ok(Session { token: body.token })
    }

    /// Submit all requests concurrently; responses come back in input order.
    pub async fn batch(
        &self,
        session: &Session,
        specs: &[RequestSpec],
    ) -> Vec<Result<BatchResponse, reqwest::Error>> {
        futures::future::join_all(specs.iter().map(|spec| self.dispatch(session, spec))).await
    }

    async fn dispatch(
        &self,
        session: &Session,
        spec: &RequestSpec,
    ) -> Result<BatchResponse, reqwest::Error> {
        let mut req = self
            .http
            .request(spec.method.clone(), self.url(&spec.path))
            .bearer_auth(session.token());
        if let Some(body) = &spec.body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;
        trace!(%status, path = %spec.path, "Batch request completed");
        Ok(BatchResponse { status, body })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}
