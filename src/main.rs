//! Server binary.
//!
//! Usage: `batch-store <port>` — binds the port on all interfaces and
//! serves until killed. Exits with status 1 on startup failure.

use batch_store::config::NetworkConfig;
use batch_store::service::server;
use batch_store::utils::logging;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    logging::init(&NetworkConfig::default().logging);

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| String::from("batch-store"));
    let Some(port_arg) = args.next() else {
        error!("usage: {program} <port>");
        process::exit(1);
    };
    let port: u16 = match port_arg.parse() {
        Ok(port) => port,
        Err(_) => {
            error!(argument = %port_arg, "invalid port number");
            process::exit(1);
        }
    };

    let config = NetworkConfig::default_with_overrides(|c| {
        c.server = c.server.clone().with_port(port);
    });
    if let Err(e) = config.validate_strict() {
        error!(error = %e, "invalid configuration");
        process::exit(1);
    }

    if let Err(e) = server::run(&config.server).await {
        error!(error = %e, "server failed");
        process::exit(1);
    }
}
