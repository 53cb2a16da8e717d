use mock_shop::ShopState;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter("mock_shop=debug")
        .init();

    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    info!("Mock shop listening on {addr}");
    mock_shop::run(addr, ShopState::new()).await;
}
