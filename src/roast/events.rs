//! Line decoder for the streaming response contract
//!
//! The service writes one event per line, optionally prefixed with `data:`,
//! each carrying a JSON object such as `{"content": "..."}`. Network chunks
//! do not respect line boundaries, so partial lines are buffered until the
//! terminating newline arrives.

use super::error::RoastResult;
use crate::types::StreamEvent;

const DATA_PREFIX: &str = "data:";

#[derive(Debug, Default)]
pub struct EventDecoder {
    buf: Vec<u8>,
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the `content` fragments of every completed line.
    pub fn push(&mut self, chunk: &[u8]) -> RoastResult<Vec<String>> {
        self.buf.extend_from_slice(chunk);
        let mut fragments = Vec::new();

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            // Split only on '\n' so multi-byte characters stay intact
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(content) = decode_line(&line)? {
                fragments.push(content);
            }
        }

        Ok(fragments)
    }

    /// Decode whatever is left once the body has ended.
    pub fn finish(&mut self) -> RoastResult<Option<String>> {
        if self.buf.is_empty() {
            return Ok(None);
        }
        let rest = std::mem::take(&mut self.buf);
        decode_line(&String::from_utf8_lossy(&rest))
    }
}

/// Decode a single event line. Blank lines and `:` comments yield `None`.
pub fn decode_line(line: &str) -> RoastResult<Option<String>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return Ok(None);
    }

    let payload = trimmed
        .strip_prefix(DATA_PREFIX)
        .map(str::trim_start)
        .unwrap_or(trimmed);
    if payload.is_empty() {
        return Ok(None);
    }

    let event: StreamEvent = serde_json::from_str(payload)?;
    Ok(event.content)
}
