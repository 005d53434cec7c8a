//! Fixture server - serving the sample app to the browser
//!
//! The server binds `127.0.0.1:0`, so the OS picks the port, and runs on a
//! single background thread with its own runtime. Dropping the handle stops
//! the server and joins that thread.

use std::future::IntoFuture;
use std::net::{Ipv4Addr, SocketAddr, TcpListener as StdTcpListener};
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use axum::Router;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::error::{E2eError, E2eResult};

/// Lifecycle of a fixture server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    NotStarted,
    Listening,
    ShuttingDown,
    Stopped,
}

impl std::fmt::Display for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerState::NotStarted => write!(f, "not started"),
            ServerState::Listening => write!(f, "listening"),
            ServerState::ShuttingDown => write!(f, "shutting down"),
            ServerState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Handle to a running fixture server
pub struct FixtureServer {
    config: FixtureConfig,
    state: ServerState,
    addr: Option<SocketAddr>,
    entry_url: Option<String>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl FixtureServer {
    /// Create a server that has not been started yet
    pub fn new(config: FixtureConfig) -> Self {
        Self {
            config,
            state: ServerState::NotStarted,
            addr: None,
            entry_url: None,
            cancel: CancellationToken::new(),
            worker: None,
        }
    }

    /// Create and start a server in one go
    pub fn spawn(config: FixtureConfig) -> E2eResult<Self> {
        let mut server = Self::new(config);
        server.start()?;
        Ok(server)
    }

    /// Bind an ephemeral port and start serving in the background
    pub fn start(&mut self) -> E2eResult<()> {
        if self.state != ServerState::NotStarted {
            return Err(E2eError::ServerStartup(format!(
                "server is already {}",
                self.state
            )));
        }

        if !self.config.root_dir.is_dir() {
            return Err(E2eError::InvalidConfig(format!(
                "fixture root is not a directory: {}",
                self.config.root_dir.display()
            )));
        }

        let listener = bind_listener(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))?;
        let addr = listener.local_addr().map_err(E2eError::Bind)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| E2eError::ServerStartup(format!("Failed to build runtime: {}", e)))?;

        // Registering with the reactor needs the runtime context
        let listener = {
            let _guard = runtime.enter();
            tokio::net::TcpListener::from_std(listener).map_err(E2eError::Bind)?
        };

        let router = Router::new()
            .fallback_service(ServeDir::new(&self.config.root_dir))
            .layer(TraceLayer::new_for_http());

        let cancel = self.cancel.clone();
        let grace = self.config.shutdown_grace();

        let worker = std::thread::Builder::new()
            .name("fixture-server".to_string())
            .spawn(move || runtime.block_on(serve(listener, router, cancel, grace)))
            .map_err(|e| E2eError::ServerStartup(format!("Failed to spawn worker: {}", e)))?;

        let entry_url = format!("http://{}/{}", addr, self.config.entry_file);
        info!(
            "Fixture server serving {} at {}",
            self.config.root_dir.display(),
            entry_url
        );

        self.addr = Some(addr);
        self.entry_url = Some(entry_url);
        self.worker = Some(worker);
        self.state = ServerState::Listening;
        Ok(())
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Port chosen by the OS, once started
    pub fn port(&self) -> Option<u16> {
        self.addr.map(|addr| addr.port())
    }

    /// `http://127.0.0.1:<port>`, once started
    pub fn base_url(&self) -> Option<String> {
        self.addr.map(|addr| format!("http://{}", addr))
    }

    /// URL of the configured entry file, once started
    pub fn entry_url(&self) -> Option<&str> {
        self.entry_url.as_deref()
    }

    /// Stop serving and wait for the worker thread to exit
    pub fn shutdown(&mut self) -> E2eResult<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        self.state = ServerState::ShuttingDown;
        info!("Stopping fixture server on port {:?}", self.port());

        self.cancel.cancel();
        let joined = worker.join();
        self.state = ServerState::Stopped;
        debug!("Fixture server stopped");

        joined.map_err(|_| E2eError::ServerShutdown("worker thread panicked".to_string()))
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Bind a non-blocking listener ready to hand to tokio
fn bind_listener(addr: SocketAddr) -> E2eResult<StdTcpListener> {
    let listener = StdTcpListener::bind(addr).map_err(E2eError::Bind)?;
    listener.set_nonblocking(true).map_err(E2eError::Bind)?;
    Ok(listener)
}

async fn serve(
    listener: tokio::net::TcpListener,
    router: Router,
    cancel: CancellationToken,
    grace: Duration,
) {
    let signal = cancel.clone();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { signal.cancelled().await })
        .into_future();

    let deadline = async {
        cancel.cancelled().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Fixture server error: {}", e);
            }
        }
        _ = deadline => {
            warn!("Fixture server did not drain within {:?}, dropping connections", grace);
        }
    }
}

/// Configuration for the fixture server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Directory whose files are served
    pub root_dir: PathBuf,

    /// File the entry URL points at
    pub entry_file: String,

    /// How long shutdown waits for in-flight requests
    pub shutdown_grace_ms: u64,
}

impl FixtureConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("app"),
            entry_file: "sample_app.html".to_string(),
            shutdown_grace_ms: 5000,
        }
    }
}
