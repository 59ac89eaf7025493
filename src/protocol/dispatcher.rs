//! Request dispatch.
//!
//! Maps one decoded request onto the corresponding store operation and
//! renders the textual response. Store rejections surface here as response
//! content (unchanged length, empty read), never as errors; the connection
//! keeps serving.

use crate::core::store::{AppendOutcome, ValueStore};
use crate::error::Result;
use crate::protocol::request::{Batch, Request};
use crate::protocol::response::Response;
use crate::utils::metrics::global_metrics;
use tracing::{debug, info, warn};

/// Execute `request` against `store` and produce its response.
pub fn dispatch(store: &ValueStore, request: Request) -> Result<Response> {
    let metrics = global_metrics();
    metrics.request_received();

    match request {
        Request::Append { checksum, batch } => {
            let len = match batch {
                Batch::Values(values) => {
                    info!(count = values.len(), "adding values");
                    let outcome = store.append(&values, checksum)?;
                    match outcome {
                        AppendOutcome::Appended { .. } => metrics.append_accepted(),
                        AppendOutcome::CapacityExceeded { .. } => {
                            debug!("batch exceeds capacity, store unchanged");
                            metrics.append_rejected_capacity();
                        }
                        AppendOutcome::ChecksumMismatch { .. } => {
                            debug!("checksum mismatch, store unchanged");
                            metrics.append_rejected_checksum();
                        }
                    }
                    outcome.len()
                }
                Batch::Discarded(count) => {
                    // Could never fit; the payload was already drained.
                    info!(count, "adding values");
                    debug!("batch exceeds capacity, store unchanged");
                    metrics.append_rejected_capacity();
                    store.len()?
                }
            };
            info!(len, "store length");
            Ok(Response::new(len.to_string()))
        }
        Request::Read { offset, count } => {
            info!(offset, count, "getting values");
            match store.read(offset, count)? {
                Some(values) => Ok(Response::from_values(&values)),
                None => {
                    debug!("read out of bounds, empty response");
                    metrics.read_rejected();
                    Ok(Response::empty())
                }
            }
        }
        Request::Truncate { count } => {
            info!(count, "deleting values");
            let len = store.truncate(count)?;
            info!(len, "store length");
            Ok(Response::new(len.to_string()))
        }
        Request::Unknown(tag) => {
            warn!(tag, "unknown request type");
            Ok(Response::empty())
        }
    }
}
