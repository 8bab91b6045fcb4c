use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.listen_addr()).await?;
    info!(
        addr = %cfg.listen_addr(),
        root = %cfg.root.display(),
        "Listening"
    );

    let catalog = Arc::new(Catalog::from_config(cfg));
    let read_timeout = cfg.settings.read_timeout();

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let catalog = catalog.clone();
        tokio::spawn(
            serve_connection(socket, catalog, read_timeout)
                .instrument(info_span!("connection", %peer)),
        );
    }
}

/// Serves every request on one connection, then closes it.
///
/// Holds no state beyond its own buffers, so any number may run at once.
pub async fn serve_connection<S>(stream: S, catalog: Arc<Catalog>, read_timeout: Option<Duration>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut conn = Connection::new(stream, catalog).with_read_timeout(read_timeout);
    conn.run().await;
    tracing::debug!("Connection closed");
}
