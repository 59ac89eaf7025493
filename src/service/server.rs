//! TCP listener and per-connection handling.
//!
//! The listener accepts forever and hands every connection to its own
//! tokio task; a slow or stalled client occupies only its own task. Each
//! handler loops over exactly one request per iteration: decode, dispatch,
//! respond. Any transport or decode error closes that connection and ends
//! its task without touching the store or any other connection.
//!
//! There is no shutdown path besides process termination.

use crate::config::ServerConfig;
use crate::core::store::ValueStore;
use crate::error::{ProtocolError, Result};
use crate::protocol::dispatcher::dispatch;
use crate::protocol::request::Request;
use crate::utils::metrics::global_metrics;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument};

/// A bound listener plus the store every connection shares.
pub struct Server {
    listener: TcpListener,
    store: Arc<ValueStore>,
}

impl Server {
    /// Bind the listener and create the (empty) shared store.
    pub async fn bind(address: &str) -> Result<Self> {
        let listener = TcpListener::bind(address).await?;
        info!(address = %listener.local_addr()?, "Listening");
        Ok(Self {
            listener,
            store: Arc::new(ValueStore::new()),
        })
    }

    /// Address the listener actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process dies.
    ///
    /// Accept errors are logged and the loop keeps going; a failure on one
    /// connection never reaches the accept path.
    pub async fn serve(self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    global_metrics().connection_established();
                    let store = self.store.clone();
                    tokio::spawn(async move {
                        handle_connection(stream, peer, store).await;
                        global_metrics().connection_closed();
                    });
                }
                Err(e) => {
                    error!(error = %e, "Error accepting connection");
                }
            }
        }
    }
}

/// Bind and serve with the configured address.
pub async fn run(config: &ServerConfig) -> Result<()> {
    Server::bind(&config.address).await?.serve().await
}

/// Serve one connection start to finish.
///
/// State machine per iteration: decode one request, dispatch it, write the
/// response. The handler carries no cross-request state; everything shared
/// lives in the store behind its own lock.
#[instrument(name = "connection", skip(stream, peer, store), fields(peer = %peer))]
async fn handle_connection(stream: TcpStream, peer: SocketAddr, store: Arc<ValueStore>) {
    info!("processing client requests");

    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    loop {
        let request = match Request::decode(&mut reader).await {
            Ok(request) => request,
            Err(ProtocolError::ConnectionClosed) => {
                debug!("peer disconnected");
                break;
            }
            Err(e) => {
                global_metrics().decode_error();
                error!(error = %e, "request decode failed, closing connection");
                break;
            }
        };

        let response = match dispatch(&store, request) {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "dispatch failed, closing connection");
                break;
            }
        };

        if let Err(e) = response.write_to(&mut writer).await {
            error!(error = %e, "response write failed, closing connection");
            break;
        }
    }
}
