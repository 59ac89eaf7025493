//! # Wire Protocol
//!
//! Request decoding, dispatch, and response framing.
//!
//! ## Wire Format
//! ```text
//! request:  [op(1)] [fields...]           native byte order throughout
//!   op 1 (append):   [count(4)] [checksum(8)] [count x value(8)]
//!   op 2 (read):     [offset(4)] [count(4)]
//!   op 3 (truncate): [count(4)]
//! response: [length(2)] [length bytes of ASCII text]
//! ```
//!
//! This is a closed two-endpoint protocol; both ends agree on byte order
//! out of band. There is no version negotiation.

pub mod dispatcher;
pub mod request;
pub mod response;


pub use dispatcher::dispatch;
pub use request::{Batch, Request};
pub use response::Response;
