//! Streaming parser for the request head.
//!
//! The head is parsed in three phases, each an explicit byte-driven state
//! machine:
//!
//! ```text
//!   request line ──► header block ──► head terminator
//!   METHOD SP target SP HTTP/1.1 CRLF   (name: value CRLF)*   CRLF
//! ```
//!
//! Phases pull bytes from a [`StreamCursor`] and record what they see on the
//! connection's [`RequestState`]. A phase that hits a grammar violation fails
//! the request with [`Error::BadRequest`] and stops consuming immediately; the
//! remaining phases are then skipped. After each phase the cursor is compacted
//! so leftover bytes of a pipelined request survive at the front of the buffer.

pub mod headers;
pub mod request_line;
pub mod terminator;

use tokio::io::AsyncRead;
use tracing::debug;

use crate::error::{Error, ParseError};
use crate::http::cursor::StreamCursor;
use crate::http::request::RequestState;

pub use headers::HeaderBlockParser;
pub use request_line::RequestLineParser;
pub use terminator::HeadTerminatorParser;

/// What a phase did with the byte it was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte consumed, keep going.
    Advance,
    /// Byte left in place for the next state to examine.
    Reexamine,
    /// Byte consumed and the phase is finished.
    Complete,
    /// Phase finished; the byte belongs to the next phase.
    Handoff,
}

/// One byte-driven parsing phase.
pub trait Phase {
    fn step(&mut self, byte: u8, request: &mut RequestState) -> Result<Step, ParseError>;

    /// Returns the phase to its initial state for the next message.
    fn reset(&mut self);
}

/// Runs `phase` over bytes from `cursor` until it finishes, fails, or the
/// peer goes away.
///
/// Does nothing if the request is already closed. A zero-byte read, a read
/// error or an elapsed read deadline marks the request closed without an error.
pub async fn drive<P, R>(
    phase: &mut P,
    cursor: &mut StreamCursor,
    io: &mut R,
    request: &mut RequestState,
) where
    P: Phase,
    R: AsyncRead + Unpin,
{
    if !request.is_open() {
        return;
    }

    loop {
        let byte = match cursor.peek(io).await {
            Ok(Some(byte)) => byte,
            Ok(None) => {
                debug!("Peer closed connection mid-request");
                request.mark_closed();
                return;
            }
            Err(e) => {
                debug!(error = %e, "Read failed, closing connection");
                request.mark_closed();
                return;
            }
        };

        match phase.step(byte, request) {
            Ok(Step::Advance) => cursor.advance(),
            Ok(Step::Reexamine) => {}
            Ok(Step::Complete) => {
                cursor.advance();
                break;
            }
            Ok(Step::Handoff) => break,
            Err(e) => {
                request.fail(Error::BadRequest(e));
                return;
            }
        }
    }

    cursor.compact();
}

/// The three head phases of one connection, reused across pipelined requests.
#[derive(Debug, Default)]
pub struct RequestParser {
    request_line: RequestLineParser,
    headers: HeaderBlockParser,
    terminator: HeadTerminatorParser,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one complete request head into `request`.
    ///
    /// On return either the head was accepted, `request` carries an error, or
    /// `request` is closed because the peer went away.
    pub async fn read_head<R>(
        &mut self,
        cursor: &mut StreamCursor,
        io: &mut R,
        request: &mut RequestState,
    ) where
        R: AsyncRead + Unpin,
    {
        self.request_line.reset();
        self.headers.reset();
        self.terminator.reset();

        drive(&mut self.request_line, cursor, io, request).await;
        drive(&mut self.headers, cursor, io, request).await;
        drive(&mut self.terminator, cursor, io, request).await;
    }
}
