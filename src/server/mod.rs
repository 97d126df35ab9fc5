// Server module entry
// Listener construction and the connection accept loop

pub mod connection;
pub mod listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::create_reusable_listener;

/// Accept connections until the process is stopped.
///
/// Each accepted connection is served on its own task; the loop itself owns
/// no per-request state beyond the active-connection counter.
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, &state, &active_connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
