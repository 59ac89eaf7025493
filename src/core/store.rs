//! The shared value store.
//!
//! One process-wide, fixed-capacity sequence of `u64` values guarded by a
//! single mutex. All three operations run their full check-then-act
//! sequence under the lock, so concurrent appends can never both pass the
//! capacity check against a stale length and overflow the array.
//!
//! Rejections (capacity, checksum, read bounds) are ordinary outcomes, not
//! errors: the caller gets the unchanged length (or an empty read) and the
//! connection keeps serving requests.

use crate::config::MAX_VALUES;
use crate::error::{ProtocolError, Result};
use std::sync::Mutex;

/// Wrapping 64-bit sum of a batch, the integrity check for appends.
pub fn batch_checksum(values: &[u64]) -> u64 {
    values
        .iter()
        .fold(0u64, |sum, value| sum.wrapping_add(*value))
}

/// Result of an append attempt. Every variant carries the store length
/// after the attempt; for the rejection variants it is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Batch stored; length grew by the batch size.
    Appended { len: u32 },
    /// The batch would overflow the fixed capacity. Nothing was copied.
    CapacityExceeded { len: u32 },
    /// The supplied checksum did not match the batch. Nothing was stored.
    ChecksumMismatch { len: u32 },
}

impl AppendOutcome {
    /// Store length after the attempt, whatever the outcome.
    pub fn len(&self) -> u32 {
        match *self {
            AppendOutcome::Appended { len }
            | AppendOutcome::CapacityExceeded { len }
            | AppendOutcome::ChecksumMismatch { len } => len,
        }
    }
}

struct StoreInner {
    values: [u64; MAX_VALUES],
    len: usize,
}

/// Bounded, lock-guarded sequence of 64-bit values shared by every
/// connection. Callers never see the backing array; the three operations
/// below are the entire mutation surface.
pub struct ValueStore {
    inner: Mutex<StoreInner>,
}

impl ValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                values: [0; MAX_VALUES],
                len: 0,
            }),
        }
    }

    /// Current number of live values.
    pub fn len(&self) -> Result<u32> {
        let inner = self.inner.lock().map_err(|_| ProtocolError::LockPoisoned)?;
        Ok(inner.len as u32)
    }

    /// Whether the store currently holds no values.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a batch after the capacity and integrity checks pass.
    ///
    /// The capacity guard runs first and wins over the checksum: a batch
    /// that cannot fit is rejected no matter what checksum it carries.
    /// Either check failing leaves the store untouched.
    pub fn append(&self, batch: &[u64], checksum: u64) -> Result<AppendOutcome> {
        let mut inner = self.inner.lock().map_err(|_| ProtocolError::LockPoisoned)?;

        let len = inner.len;
        if len + batch.len() > MAX_VALUES {
            return Ok(AppendOutcome::CapacityExceeded { len: len as u32 });
        }

        if batch_checksum(batch) != checksum {
            return Ok(AppendOutcome::ChecksumMismatch { len: len as u32 });
        }

        inner.values[len..len + batch.len()].copy_from_slice(batch);
        inner.len = len + batch.len();
        Ok(AppendOutcome::Appended {
            len: inner.len as u32,
        })
    }

    /// Read `count` values starting at `offset`.
    ///
    /// Valid only when `offset + count < length`; the strict bound also
    /// rejects a slice ending exactly on the current length, which makes
    /// the final value unreadable. That is the documented contract of the
    /// wire protocol and is kept as-is. The comparison is done in 64-bit
    /// arithmetic so it cannot wrap.
    pub fn read(&self, offset: u32, count: u32) -> Result<Option<Vec<u64>>> {
        let inner = self.inner.lock().map_err(|_| ProtocolError::LockPoisoned)?;

        if u64::from(offset) + u64::from(count) >= inner.len as u64 {
            return Ok(None);
        }

        let start = offset as usize;
        Ok(Some(inner.values[start..start + count as usize].to_vec()))
    }

    /// Drop `count` values from the tail, clamped to the current length.
    ///
    /// Returns the new length. Truncated slots are not wiped; they are
    /// simply outside the live prefix until overwritten.
    pub fn truncate(&self, count: u32) -> Result<u32> {
        let mut inner = self.inner.lock().map_err(|_| ProtocolError::LockPoisoned)?;

        let dropped = (count as usize).min(inner.len);
        inner.len -= dropped;
        Ok(inner.len as u32)
    }
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new()
    }
}
