//! Listener lifecycle: bind, serve, graceful shutdown.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::{Result, ServiceError};

/// Handle to a running listener.
///
/// The handle governs the listener's lifetime: [`Server::shutdown`] stops
/// accepting new connections while in-flight requests drain to completion.
#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

/// Bind `addr` and serve `app` on a background task.
///
/// Fails with [`ServiceError::Bind`] when the port is already in use or
/// the process lacks permission.
pub async fn start(addr: SocketAddr, app: Router) -> Result<Server> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServiceError::Bind { addr, source })?;
    let local_addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    info!("listening on {local_addr}");

    Ok(Server {
        local_addr,
        shutdown_tx,
        handle,
    })
}

impl Server {
    /// Address the listener is bound to. Resolves the actual port when the
    /// service was started with port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting new connections and wait for in-flight requests to
    /// drain. After this returns, connection attempts are refused.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        self.handle.await??;
        Ok(())
    }
}
