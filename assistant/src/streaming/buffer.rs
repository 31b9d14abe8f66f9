//! Line buffer for newline-delimited streamed responses
//!
//! Network chunks can split a record anywhere, including inside a
//! multi-byte UTF-8 character, so bytes are held until a full line is
//! available and only then decoded.

/// Buffer for reassembling newline-delimited records from byte chunks
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// Bytes received but not yet terminated by a newline
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of bytes from the network
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Take the next complete line, without its terminator
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.pending.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=newline_pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Take whatever is left once the stream has closed
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
