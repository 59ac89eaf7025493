//! # Error Types
//!
//! Error handling for the store service.
//!
//! This module defines the error variants that can occur while serving
//! connections, from low-level I/O failures to startup misconfiguration.
//!
//! ## Error Categories
//! - **Transport errors**: stream closed mid-field, write failures — fatal
//!   to the connection that hit them, invisible to every other connection
//! - **Startup errors**: bad configuration, bind failure — fatal to the
//!   process
//!
//! Store-level rejections (capacity exceeded, checksum mismatch, read out
//! of bounds) are deliberately *not* errors; they are ordinary outcomes
//! reported through response content. See [`crate::core::store`].

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Store lock errors
    pub const ERR_STORE_LOCK_POISONED: &str = "Store lock poisoned";

    /// Connection errors
    pub const ERR_CONNECTION_CLOSED: &str = "Connection closed";
}

/// Primary error type for all service operations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Response too large: {0} bytes")]
    ResponseTooLarge(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
