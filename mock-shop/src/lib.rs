//! Mock of the coin-shop API for exercising the load workload.
//!
//! Mirrors the target's wire shapes: `/api/auth` mints bearer tokens,
//! `/api/info`, `/api/buy/{item}` and `/api/sendCoin` sit behind a bearer
//! guard, errors come back as `{"errors": ..}` and writes as
//! `{"status": "success"}`. Tests flip the fault knobs on [`ShopState`]
//! directly and read back the request log.
use axum::{
    debug_handler,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, RwLock,
};
use tracing::debug;

/// Shared server state, including the fault-injection knobs.
#[derive(Debug, Default)]
pub struct ShopState {
    tokens: RwLock<HashSet<String>>,
    token_seq: AtomicU64,
    auth_calls: AtomicU64,
    auth_failures: AtomicU64,
    info_failures: AtomicU64,
    log: RwLock<Vec<SeenRequest>>,
}

/// One authenticated request the mock observed.
#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub path: String,
    pub token: String,
}

impl ShopState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the next `n` calls to `/api/auth` with a 503.
    pub fn fail_next_auth(&self, n: u64) {
        self.auth_failures.store(n, Ordering::Relaxed);
    }

    /// Fail the next `n` calls to `/api/info` with a 500.
    pub fn fail_next_info(&self, n: u64) {
        self.info_failures.store(n, Ordering::Relaxed);
    }

    /// How many times `/api/auth` was called, failures included.
    pub fn auth_calls(&self) -> u64 {
        self.auth_calls.load(Ordering::Relaxed)
    }

    /// Authenticated requests in arrival order.
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.log.read().unwrap().clone()
    }

    fn mint_token(&self, username: &str) -> String {
        let seq = self.token_seq.fetch_add(1, Ordering::Relaxed);
        format!("{username}-token-{seq}")
    }

    fn take_failure(counter: &AtomicU64) -> bool {
        counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub fn app(state: Arc<ShopState>) -> Router {
    Router::new()
        .route("/api/auth", post(auth))
        .route("/api/info", get(info))
        .route("/api/buy/:item", get(buy))
        .route("/api/sendCoin", post(send_coin))
        .with_state(state)
}

pub async fn serve(listener: tokio::net::TcpListener, state: Arc<ShopState>) {
    axum::serve(listener, app(state)).await.unwrap();
}

pub async fn run(addr: SocketAddr, state: Arc<ShopState>) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    serve(listener, state).await;
}

/** Wire shapes **/

#[derive(Deserialize)]
struct AuthRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct AuthResponse {
    token: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    errors: String,
}

#[derive(Serialize)]
struct SuccessResponse {
    status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoResponse {
    coins: i64,
    inventory: Vec<InventoryItem>,
    coin_history: CoinHistory,
}

#[derive(Serialize)]
struct InventoryItem {
    r#type: String,
    quantity: i64,
}

#[derive(Serialize)]
struct CoinHistory {
    received: Vec<serde_json::Value>,
    sent: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferRequest {
    to_user: String,
    amount: i64,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(ErrorResponse {
            errors: message.to_string(),
        }),
    )
}

/** Handlers **/

#[debug_handler]
async fn auth(
    State(state): State<Arc<ShopState>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, Rejection> {
    state.auth_calls.fetch_add(1, Ordering::Relaxed);

    if ShopState::take_failure(&state.auth_failures) {
        debug!("Injected auth failure");
        return Err(error(StatusCode::SERVICE_UNAVAILABLE, "service warming up"));
    }

    if req.username.is_empty() || req.password.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid request body"));
    }

    let token = state.mint_token(&req.username);
    state.tokens.write().unwrap().insert(token.clone());
    Ok(Json(AuthResponse { token }))
}

#[debug_handler]
async fn info(
    State(state): State<Arc<ShopState>>,
    headers: HeaderMap,
) -> Result<Json<InfoResponse>, Rejection> {
    authorize(&state, &headers, "/api/info")?;

    if ShopState::take_failure(&state.info_failures) {
        debug!("Injected info failure");
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get user info"));
    }

    Ok(Json(InfoResponse {
        coins: 1000,
        inventory: vec![InventoryItem {
            r#type: "t-shirt".to_string(),
            quantity: 1,
        }],
        coin_history: CoinHistory {
            received: vec![],
            sent: vec![],
        },
    }))
}

#[debug_handler]
async fn buy(
    State(state): State<Arc<ShopState>>,
    Path(item): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, Rejection> {
    authorize(&state, &headers, &format!("/api/buy/{item}"))?;

    if item.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Item name is required"));
    }

    Ok(Json(SuccessResponse { status: "success" }))
}

#[debug_handler]
async fn send_coin(
    State(state): State<Arc<ShopState>>,
    headers: HeaderMap,
    Json(req): Json<TransferRequest>,
) -> Result<Json<SuccessResponse>, Rejection> {
    authorize(&state, &headers, "/api/sendCoin")?;

    if req.to_user.is_empty() || req.amount < 1 {
        return Err(error(StatusCode::BAD_REQUEST, "Failed to transfer coins"));
    }

    Ok(Json(SuccessResponse { status: "success" }))
}

/// Bearer guard for the three authenticated routes. Logs the request on
/// success so tests can assert what the workload sent.
fn authorize(state: &ShopState, headers: &HeaderMap, path: &str) -> Result<(), Rejection> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized"))?;

    if !state.tokens.read().unwrap().contains(token) {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid token"));
    }

    state.log.write().unwrap().push(SeenRequest {
        path: path.to_string(),
        token: token.to_string(),
    });
    Ok(())
}
