use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::GeneralConfig;

/// Binds the HTTP listener. `main` calls this before opening the database pool.
pub async fn bind_listener(cfg: &GeneralConfig) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .bind_address()
        .parse()
        .context("general.host/general.port do not form a socket address")?;
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}
