//! Fixed-capacity read buffer shared by the parser phases of one connection.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// Capacity of the per-connection read buffer.
pub const BUFFER_CAPACITY: usize = 4096;

/// Read buffer that keeps unconsumed bytes between parser phases and between
/// pipelined requests.
///
/// The buffer never grows. A phase reads bytes one at a time through
/// [`peek`](StreamCursor::peek) and [`advance`](StreamCursor::advance); once it
/// finishes, [`compact`](StreamCursor::compact) moves the unread suffix to the
/// front so the next phase starts at offset 0.
pub struct StreamCursor {
    buffer: Box<[u8; BUFFER_CAPACITY]>,
    position: usize,
    remaining: usize,
    read_timeout: Option<Duration>,
}

impl StreamCursor {
    pub fn new() -> Self {
        Self {
            buffer: Box::new([0; BUFFER_CAPACITY]),
            position: 0,
            remaining: 0,
            read_timeout: None,
        }
    }

    /// Bounds every socket read by `deadline`. Expiry surfaces as
    /// `io::ErrorKind::TimedOut`.
    pub fn with_read_timeout(mut self, deadline: Option<Duration>) -> Self {
        self.read_timeout = deadline;
        self
    }

    /// Bytes received but not yet consumed by a parser phase.
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.position..self.position + self.remaining]
    }

    /// Performs a single read when no unread bytes remain.
    ///
    /// Returns the number of bytes read; `0` means the peer closed its side.
    /// When unread bytes are still buffered nothing is read and their count is
    /// returned instead.
    pub async fn fill<R>(&mut self, io: &mut R) -> io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        if self.remaining > 0 {
            return Ok(self.remaining);
        }

        self.position = 0;
        let read = io.read(&mut self.buffer[..]);
        let n = match self.read_timeout {
            Some(deadline) => timeout(deadline, read)
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read deadline elapsed"))??,
            None => read.await?,
        };

        self.remaining = n;
        Ok(n)
    }

    /// Returns the next unread byte without consuming it, reading from `io`
    /// when the buffer is exhausted. `None` means the peer closed.
    pub async fn peek<R>(&mut self, io: &mut R) -> io::Result<Option<u8>>
    where
        R: AsyncRead + Unpin,
    {
        if self.remaining == 0 && self.fill(io).await? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buffer[self.position]))
    }

    /// Consumes the byte returned by the last [`peek`](StreamCursor::peek).
    pub fn advance(&mut self) {
        debug_assert!(self.remaining > 0, "advance past buffered data");
        if self.remaining > 0 {
            self.position += 1;
            self.remaining -= 1;
        }
    }

    /// Consumes and returns the next byte.
    pub async fn next_byte<R>(&mut self, io: &mut R) -> io::Result<Option<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let byte = self.peek(io).await?;
        if byte.is_some() {
            self.advance();
        }
        Ok(byte)
    }

    /// Moves the unread suffix to the start of the buffer.
    pub fn compact(&mut self) {
        if self.position > 0 {
            let end = self.position + self.remaining;
            self.buffer.copy_within(self.position..end, 0);
            self.position = 0;
        }
    }
}

impl Default for StreamCursor {
    fn default() -> Self {
        Self::new()
    }
}
