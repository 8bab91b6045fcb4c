use crate::error::ParseError;
use crate::http::parser::{Phase, Step};
use crate::http::request::RequestState;

const CRLF: &[u8] = b"\r\n";

/// Bytes of a header name or value kept for comparison. Longer fields are
/// truncated; every token compared against is shorter than this.
const FIELD_CAP: usize = 20;

/// Headers that influence request handling. Everything else is parsed and
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownHeader {
    Connection,
    ContentLength,
}

impl KnownHeader {
    const COUNT: usize = 2;
    const ALL: [KnownHeader; Self::COUNT] =
        [KnownHeader::Connection, KnownHeader::ContentLength];

    fn name(self) -> &'static str {
        match self {
            KnownHeader::Connection => "Connection",
            KnownHeader::ContentLength => "Content-Length",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn recognize(name: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|h| h.name().as_bytes().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Name,
    Colon,
    LeadingSpace,
    Value,
    TrailingSpace,
    Crlf(usize),
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'-' || byte == b'_'
}

/// `(name ":" OWS value OWS CRLF)*` up to, but not including, the blank line.
///
/// Finishes by handing the first byte of the blank line to the head
/// terminator.
#[derive(Debug)]
pub struct HeaderBlockParser {
    state: State,
    name: [u8; FIELD_CAP],
    name_len: usize,
    value: [u8; FIELD_CAP],
    value_len: usize,
    current: Option<KnownHeader>,
    seen: [bool; KnownHeader::COUNT],
}

impl Default for HeaderBlockParser {
    fn default() -> Self {
        Self {
            state: State::Name,
            name: [0; FIELD_CAP],
            name_len: 0,
            value: [0; FIELD_CAP],
            value_len: 0,
            current: None,
            seen: [false; KnownHeader::COUNT],
        }
    }
}

impl HeaderBlockParser {
    fn end_name(&mut self) -> Result<(), ParseError> {
        let Some(header) = KnownHeader::recognize(&self.name[..self.name_len]) else {
            return Ok(());
        };

        if self.seen[header.index()] {
            return Err(ParseError::DuplicateHeader(header.name()));
        }
        self.seen[header.index()] = true;

        if header == KnownHeader::ContentLength {
            return Err(ParseError::ContentLengthNotAllowed);
        }

        self.current = Some(header);
        Ok(())
    }

    fn end_value(&mut self, request: &mut RequestState) {
        let value = &self.value[..self.value_len];
        if self.current == Some(KnownHeader::Connection) && value == b"close" {
            request.request_close();
        }
    }

    fn next_line(&mut self) {
        self.state = State::Name;
        self.name_len = 0;
        self.value_len = 0;
        self.current = None;
    }
}

impl Phase for HeaderBlockParser {
    fn step(&mut self, byte: u8, request: &mut RequestState) -> Result<Step, ParseError> {
        match self.state {
            State::Name => match byte {
                b'\r' | b'\n' if self.name_len == 0 => Ok(Step::Handoff),
                b'\r' | b'\n' => Err(ParseError::InvalidHeaderName),
                b':' if self.name_len == 0 => Err(ParseError::EmptyHeaderName),
                b':' => {
                    self.end_name()?;
                    self.state = State::Colon;
                    Ok(Step::Reexamine)
                }
                b if is_name_byte(b) => {
                    if self.name_len < FIELD_CAP {
                        self.name[self.name_len] = b;
                        self.name_len += 1;
                    }
                    Ok(Step::Advance)
                }
                _ => Err(ParseError::InvalidHeaderName),
            },

            State::Colon => {
                if byte != b':' {
                    return Err(ParseError::InvalidHeaderName);
                }
                self.state = State::LeadingSpace;
                Ok(Step::Advance)
            }

            State::LeadingSpace => {
                if byte == b' ' {
                    return Ok(Step::Advance);
                }
                self.state = State::Value;
                Ok(Step::Reexamine)
            }

            State::Value => {
                if byte == b' ' || byte == b'\r' {
                    self.end_value(request);
                    self.state = State::TrailingSpace;
                    return Ok(Step::Reexamine);
                }
                if self.value_len < FIELD_CAP {
                    self.value[self.value_len] = byte;
                    self.value_len += 1;
                }
                Ok(Step::Advance)
            }

            State::TrailingSpace => match byte {
                b' ' => Ok(Step::Advance),
                b'\r' => {
                    self.state = State::Crlf(0);
                    Ok(Step::Reexamine)
                }
                _ => Err(ParseError::InvalidHeaderValue),
            },

            State::Crlf(i) => {
                if byte != CRLF[i] {
                    return Err(ParseError::ExpectedCrlf);
                }
                if i + 1 == CRLF.len() {
                    self.next_line();
                } else {
                    self.state = State::Crlf(i + 1);
                }
                Ok(Step::Advance)
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
