//! Typed client for the store protocol.
//!
//! Owns one TCP stream and speaks the wire format on behalf of the
//! caller: native-order request frames out, length-prefixed ASCII
//! responses back. One request is in flight at a time, matching the
//! server's request-per-iteration handling.

use crate::core::store::batch_checksum;
use crate::error::Result;
use crate::protocol::request::{OP_APPEND, OP_READ, OP_TRUNCATE};
use bytes::{BufMut, BytesMut};
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

pub struct StoreClient {
    stream: TcpStream,
}

impl StoreClient {
    /// Connect to a store server.
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self { stream })
    }

    /// Append a batch with its correct checksum. Returns the store length
    /// the server reports back.
    pub async fn append(&mut self, values: &[u64]) -> Result<u32> {
        self.append_with_checksum(values, batch_checksum(values))
            .await
    }

    /// Append a batch with an explicit (possibly wrong) checksum.
    pub async fn append_with_checksum(&mut self, values: &[u64], checksum: u64) -> Result<u32> {
        let mut frame = BytesMut::with_capacity(13 + values.len() * 8);
        frame.put_u8(OP_APPEND);
        frame.put_u32_ne(values.len() as u32);
        frame.put_u64_ne(checksum);
        for value in values {
            frame.put_u64_ne(*value);
        }
        self.stream.write_all(&frame).await?;
        self.recv_length().await
    }

    /// Read `count` values at `offset`; returns the raw response text,
    /// one `value,` segment per value (empty when rejected or zero-count).
    pub async fn read_raw(&mut self, offset: u32, count: u32) -> Result<String> {
        let mut frame = BytesMut::with_capacity(9);
        frame.put_u8(OP_READ);
        frame.put_u32_ne(offset);
        frame.put_u32_ne(count);
        self.stream.write_all(&frame).await?;
        self.recv_response().await
    }

    /// Read `count` values at `offset`, parsed. An out-of-bounds read
    /// comes back as an empty vec; the wire does not distinguish it from
    /// a zero-count read.
    pub async fn read(&mut self, offset: u32, count: u32) -> Result<Vec<u64>> {
        let text = self.read_raw(offset, count).await?;
        text.split_terminator(',')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|e| invalid_data(format!("bad value in read response: {e}")))
            })
            .collect()
    }

    /// Drop `count` values from the tail. Returns the new store length.
    pub async fn truncate(&mut self, count: u32) -> Result<u32> {
        let mut frame = BytesMut::with_capacity(5);
        frame.put_u8(OP_TRUNCATE);
        frame.put_u32_ne(count);
        self.stream.write_all(&frame).await?;
        self.recv_length().await
    }

    /// Send a bare operation tag with no fields; the server answers
    /// unknown tags with an empty response.
    pub async fn send_op(&mut self, op: u8) -> Result<String> {
        self.stream.write_all(&[op]).await?;
        self.recv_response().await
    }

    async fn recv_response(&mut self) -> Result<String> {
        let mut len_buf = [0u8; 2];
        self.stream.read_exact(&mut len_buf).await?;
        let len = u16::from_ne_bytes(len_buf) as usize;

        let mut text = vec![0u8; len];
        self.stream.read_exact(&mut text).await?;
        String::from_utf8(text)
            .map_err(|_| invalid_data("non-ASCII response payload".to_string()))
    }

    async fn recv_length(&mut self) -> Result<u32> {
        let text = self.recv_response().await?;
        text.parse()
            .map_err(|e| invalid_data(format!("bad length response '{text}': {e}")))
    }
}

fn invalid_data(message: String) -> crate::error::ProtocolError {
    io::Error::new(io::ErrorKind::InvalidData, message).into()
}
