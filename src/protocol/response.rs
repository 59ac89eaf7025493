//! Response framing.
//!
//! Every response is ASCII text preceded by its byte length as a
//! native-order `u16`. Append and truncate answer with the resulting store
//! length in decimal; read answers with zero or more `value,` segments;
//! unknown operations answer with nothing.

use crate::error::{ProtocolError, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Textual payload of one protocol response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    text: String,
}

impl Response {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The empty response, sent for unknown operations.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Comma-terminated decimal rendering of a read result, one `value,`
    /// segment per value.
    pub fn from_values(values: &[u64]) -> Self {
        let mut text = String::new();
        for value in values {
            text.push_str(&value.to_string());
            text.push(',');
        }
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Write the length prefix and payload, then flush so the client sees
    /// the full response before the next request is decoded.
    pub async fn write_to<W>(&self, writer: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let len = u16::try_from(self.text.len())
            .map_err(|_| ProtocolError::ResponseTooLarge(self.text.len()))?;
        writer.write_all(&len.to_ne_bytes()).await?;
        writer.write_all(self.text.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}
