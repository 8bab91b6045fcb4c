use crate::error::ParseError;
use crate::http::parser::{Phase, Step};
use crate::http::request::RequestState;

const CRLF: &[u8] = b"\r\n";

/// The blank line ending the head: exactly one CRLF.
///
/// No body is ever read, so any byte after it starts the next pipelined
/// request.
#[derive(Debug, Default)]
pub struct HeadTerminatorParser {
    offset: usize,
}

impl Phase for HeadTerminatorParser {
    fn step(&mut self, byte: u8, _request: &mut RequestState) -> Result<Step, ParseError> {
        if byte != CRLF[self.offset] {
            return Err(ParseError::InvalidTerminator);
        }
        self.offset += 1;
        if self.offset == CRLF.len() {
            Ok(Step::Complete)
        } else {
            Ok(Step::Advance)
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}
