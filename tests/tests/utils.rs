use mock_shop::ShopState;
use stampede_core::{RetryPolicy, TargetConfig, WorkloadConfig};
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_env_filter("stampede=trace,mock_shop=debug")
            .try_init();
    });
}

/// Boot a fresh mock shop on an ephemeral port. Each test gets its own
/// state so fault knobs can't race across tests.
#[allow(unused)]
pub async fn spawn_shop() -> (SocketAddr, Arc<ShopState>) {
    init();

    let state = ShopState::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    {
        let state = state.clone();
        tokio::spawn(async move { mock_shop::serve(listener, state).await });
    }
    (addr, state)
}

#[allow(unused)]
pub fn target(addr: SocketAddr) -> TargetConfig {
    TargetConfig::new(format!("http://{addr}"))
}

/// The production shape with millisecond-scale delays.
#[allow(unused)]
pub fn fast_workload() -> WorkloadConfig {
    WorkloadConfig {
        retry: RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_millis(20),
        },
        pause: Duration::from_millis(20),
    }
}
