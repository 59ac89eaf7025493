//! # Core Store Components
//!
//! The shared value store and its integrity checking.
//!
//! This module provides the foundation of the service: one bounded,
//! lock-guarded sequence of 64-bit values that every connection mutates
//! through three atomic operations.
//!
//! ## Components
//! - **Store**: fixed-capacity sequence with a live-prefix length
//! - **Checksum**: wrapping 64-bit sum used to vet append batches
//!
//! ## Invariants
//! - Only indices `[0, length)` hold live values
//! - Capacity is a hard constant; a batch that would overflow is rejected
//!   before a single value is copied

pub mod store;
