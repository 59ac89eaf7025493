//! # Batch Store
//!
//! A concurrent TCP service maintaining one shared, bounded sequence of
//! 64-bit values, mutated exclusively through a small binary request
//! protocol: append a checksum-verified batch, read a verified-offset
//! slice, or truncate from the tail.
//!
//! ## Components
//! - **Store**: fixed-capacity value sequence guarded by a single lock
//! - **Protocol**: request decoding, dispatch, and response framing
//! - **Service**: TCP listener, per-connection tasks, and a typed client
//!
//! ## Concurrency Model
//! One tokio task per accepted connection. The store is the only shared
//! mutable resource; every operation runs its full check-then-act sequence
//! under the store's lock, while network I/O stays outside it.
//!
//! ## Example
//! ```no_run
//! use batch_store::config::NetworkConfig;
//! use batch_store::service::server;
//!
//! #[tokio::main]
//! async fn main() -> batch_store::Result<()> {
//!     let config = NetworkConfig::default();
//!     server::run(&config.server).await
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod utils;

pub use crate::core::store::{AppendOutcome, ValueStore};
pub use crate::error::{ProtocolError, Result};
pub use crate::service::client::StoreClient;
pub use crate::service::server::Server;
