//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use items_api::config::AppConfig;
use items_api::http::{AppState, HttpServer};
use items_api::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A running server bound to an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub state: AppState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the full server on `127.0.0.1:0` with the given config.
pub async fn spawn_app(config: AppConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let state = server.state();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestApp {
        addr,
        shutdown,
        state,
    }
}

/// Start the server with default config.
#[allow(dead_code)]
pub async fn spawn_default_app() -> TestApp {
    spawn_app(AppConfig::default()).await
}
