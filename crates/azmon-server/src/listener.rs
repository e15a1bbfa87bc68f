//! Background listener lifecycle.
//!
//! [`WebServer::start`] binds the port on the calling thread, then serves the
//! router from a detached thread that owns its own tokio runtime, so the host
//! program keeps running and can call `start` from synchronous code. The
//! thread is never joined and does not hold up process exit.
//!
//! Stopping is not supported: [`WebServer::stop`] reports
//! [`ListenerError::StopUnsupported`]. Once started, the listener serves until
//! the process exits, whether or not the [`WebServer`] handle is kept.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Mutex, PoisonError};
use std::thread::JoinHandle;

use axum::Router;

use crate::config::ServerConfig;
use crate::error::ListenerError;
use crate::router::build_router;
use crate::state::AppState;

pub struct WebServer {
    port: u16,
    state: AppState,
    task: Mutex<Option<ListenerTask>>,
}

/// The detached serving thread.
struct ListenerTask {
    addr: SocketAddr,
    thread: JoinHandle<()>,
}

impl WebServer {
    pub fn new(port: u16, state: AppState) -> Self {
        WebServer {
            port,
            state,
            task: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ServerConfig, state: AppState) -> Self {
        Self::new(config.port, state)
    }

    /// The configured port; `0` asks the OS for a free one.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Binds `0.0.0.0:{port}` and starts serving in the background.
    ///
    /// Returns the bound address. A second call while the listener is up
    /// fails with [`ListenerError::AlreadyRunning`].
    pub fn start(&self) -> Result<SocketAddr, ListenerError> {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = task.as_ref() {
            return Err(ListenerError::AlreadyRunning(existing.addr));
        }

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port));
        let bind_err = |source: std::io::Error| ListenerError::Bind { addr, source };
        let listener = std::net::TcpListener::bind(addr).map_err(bind_err)?;
        listener.set_nonblocking(true).map_err(bind_err)?;
        let bound = listener.local_addr().map_err(bind_err)?;

        tracing::info!("Starting webserver - listening on port {}/tcp", bound.port());

        let app = build_router(self.state.clone());
        let thread = std::thread::Builder::new()
            .name("azmon-web".to_string())
            .spawn(move || serve(listener, app))
            .map_err(ListenerError::Spawn)?;

        *task = Some(ListenerTask {
            addr: bound,
            thread,
        });
        Ok(bound)
    }

    /// Not supported. Logs the limitation and leaves the listener running.
    pub fn stop(&self) -> Result<(), ListenerError> {
        tracing::warn!("Stopping the webserver is not supported");
        Err(ListenerError::StopUnsupported)
    }

    /// True once `start` has succeeded and the serving thread is alive.
    pub fn is_running(&self) -> bool {
        let task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        task.as_ref().is_some_and(|t| !t.thread.is_finished())
    }

    /// The bound address, if started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        let task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        task.as_ref().map(|t| t.addr)
    }
}

/// Body of the serving thread.
fn serve(listener: std::net::TcpListener, app: Router) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("azmon-web-worker")
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to build webserver runtime: {}", e);
            return;
        }
    };

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("failed to register webserver socket: {}", e);
                return;
            }
        };

        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("webserver exited: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use azmon_core::InMemoryMonitor;

    use super::*;

    fn server() -> WebServer {
        let state = AppState::new(&ServerConfig::default(), Arc::new(InMemoryMonitor::new()))
            .unwrap();
        WebServer::new(0, state)
    }

    #[test]
    fn not_running_before_start() {
        let server = server();
        assert!(!server.is_running());
        assert_eq!(server.local_addr(), None);
        assert_eq!(server.port(), 0);
    }

    #[test]
    fn start_then_running_and_stop_is_reported() {
        let server = server();
        let addr = server.start().unwrap();
        assert_ne!(addr.port(), 0);
        assert!(server.is_running());
        assert_eq!(server.local_addr(), Some(addr));

        assert!(matches!(server.stop(), Err(ListenerError::StopUnsupported)));
        assert!(server.is_running());
    }

    #[test]
    fn second_start_is_rejected() {
        let server = server();
        let addr = server.start().unwrap();
        assert!(matches!(
            server.start(),
            Err(ListenerError::AlreadyRunning(a)) if a == addr
        ));
        assert!(server.is_running());
    }

    #[test]
    fn stop_before_start_does_not_panic() {
        let server = server();
        assert!(server.stop().is_err());
        assert!(!server.is_running());
    }

    #[test]
    fn bind_conflict_is_an_error() {
        let first = server();
        let addr = first.start().unwrap();

        let state = AppState::new(&ServerConfig::default(), Arc::new(InMemoryMonitor::new()))
            .unwrap();
        let second = WebServer::new(addr.port(), state);
        assert!(matches!(second.start(), Err(ListenerError::Bind { .. })));
        assert!(!second.is_running());
    }
}
