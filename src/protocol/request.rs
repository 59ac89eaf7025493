//! Request decoding.
//!
//! One request is a single-byte operation tag followed by that operation's
//! fixed-width fields, all in the host's native byte order. The stream may
//! deliver bytes in arbitrary fragments; every field is read with
//! `read_exact`, which suspends until the field is complete or the peer
//! goes away.

use crate::config::MAX_VALUES;
use crate::error::{ProtocolError, Result};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Append a checksum-verified batch of values.
pub const OP_APPEND: u8 = 1;
/// Read a slice of the live prefix.
pub const OP_READ: u8 = 2;
/// Drop values from the tail.
pub const OP_TRUNCATE: u8 = 3;

/// Payload of an append request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// Fully buffered batch, at most [`MAX_VALUES`] entries.
    Values(Vec<u64>),
    /// The declared count can never fit the store. The payload bytes were
    /// consumed and thrown away to keep the stream aligned for the next
    /// request; only the count survives for reporting.
    Discarded(u32),
}

/// One decoded protocol request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Append { checksum: u64, batch: Batch },
    Read { offset: u32, count: u32 },
    Truncate { count: u32 },
    Unknown(u8),
}

impl Request {
    /// Decode one request from the stream.
    ///
    /// A stream that closes before the operation tag arrives is a clean
    /// disconnect ([`ProtocolError::ConnectionClosed`]); closing anywhere
    /// inside a request is a fatal I/O error for the connection. Unknown
    /// tags decode successfully and carry no further fields.
    pub async fn decode<R>(reader: &mut R) -> Result<Request>
    where
        R: AsyncRead + Unpin,
    {
        let op = match reader.read_u8().await {
            Ok(op) => op,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(ProtocolError::ConnectionClosed)
            }
            Err(e) => return Err(e.into()),
        };

        match op {
            OP_APPEND => {
                let count = read_u32_ne(reader).await?;
                let checksum = read_u64_ne(reader).await?;
                let batch = if count as usize > MAX_VALUES {
                    drain(reader, u64::from(count) * 8).await?;
                    Batch::Discarded(count)
                } else {
                    let mut values = Vec::with_capacity(count as usize);
                    for _ in 0..count {
                        values.push(read_u64_ne(reader).await?);
                    }
                    Batch::Values(values)
                };
                Ok(Request::Append { checksum, batch })
            }
            OP_READ => {
                let offset = read_u32_ne(reader).await?;
                let count = read_u32_ne(reader).await?;
                Ok(Request::Read { offset, count })
            }
            OP_TRUNCATE => {
                let count = read_u32_ne(reader).await?;
                Ok(Request::Truncate { count })
            }
            tag => Ok(Request::Unknown(tag)),
        }
    }
}

async fn read_u32_ne<R>(reader: &mut R) -> Result<u32>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).await?;
    Ok(u32::from_ne_bytes(buf))
}

async fn read_u64_ne<R>(reader: &mut R) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).await?;
    Ok(u64::from_ne_bytes(buf))
}

/// Consume and discard `count` bytes through a fixed scratch buffer, so an
/// absurd declared batch size never turns into an allocation.
async fn drain<R>(reader: &mut R, mut count: u64) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut scratch = [0u8; 4096];
    while count > 0 {
        let chunk = count.min(scratch.len() as u64) as usize;
        reader.read_exact(&mut scratch[..chunk]).await?;
        count -= chunk as u64;
    }
    Ok(())
}
