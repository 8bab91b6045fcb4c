use crate::error::ParseError;
use crate::http::parser::{Phase, Step};
use crate::http::request::{Method, RequestState};

const HTTP_VERSION: &[u8] = b"HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

/// Method bytes kept for comparison; longer tokens are truncated.
const METHOD_CAP: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Method,
    FirstSpace,
    Target,
    SecondSpace,
    Version(usize),
    Crlf(usize),
}

/// `METHOD SP target SP HTTP/1.1 CRLF`
#[derive(Debug)]
pub struct RequestLineParser {
    state: State,
    method: [u8; METHOD_CAP],
    method_len: usize,
}

impl Default for RequestLineParser {
    fn default() -> Self {
        Self {
            state: State::Method,
            method: [0; METHOD_CAP],
            method_len: 0,
        }
    }
}

impl RequestLineParser {
    fn method_token(&self) -> &[u8] {
        &self.method[..self.method_len]
    }
}

impl Phase for RequestLineParser {
    fn step(&mut self, byte: u8, request: &mut RequestState) -> Result<Step, ParseError> {
        match self.state {
            State::Method => match byte {
                b' ' if self.method_len == 0 => Err(ParseError::EmptyMethod),
                b' ' => {
                    request.set_method(Method::from_token(self.method_token()));
                    self.state = State::FirstSpace;
                    Ok(Step::Reexamine)
                }
                b if b.is_ascii_alphabetic() => {
                    if self.method_len < METHOD_CAP {
                        self.method[self.method_len] = b;
                        self.method_len += 1;
                    }
                    Ok(Step::Advance)
                }
                _ => Err(ParseError::InvalidMethod),
            },

            State::FirstSpace => {
                if byte != b' ' {
                    return Err(ParseError::ExpectedSpace);
                }
                self.state = State::Target;
                Ok(Step::Advance)
            }

            State::Target => {
                if byte != b' ' {
                    request.push_target(byte)?;
                    return Ok(Step::Advance);
                }
                if request.target().first() != Some(&b'/') {
                    return Err(ParseError::InvalidTarget);
                }
                self.state = State::SecondSpace;
                Ok(Step::Reexamine)
            }

            State::SecondSpace => {
                if byte != b' ' {
                    return Err(ParseError::ExpectedSpace);
                }
                self.state = State::Version(0);
                Ok(Step::Advance)
            }

            State::Version(i) => {
                if byte != HTTP_VERSION[i] {
                    return Err(ParseError::InvalidVersion);
                }
                self.state = if i + 1 == HTTP_VERSION.len() {
                    State::Crlf(0)
                } else {
                    State::Version(i + 1)
                };
                Ok(Step::Advance)
            }

            State::Crlf(i) => {
                if byte != CRLF[i] {
                    return Err(ParseError::ExpectedCrlf);
                }
                if i + 1 == CRLF.len() {
                    return Ok(Step::Complete);
                }
                self.state = State::Crlf(i + 1);
                Ok(Step::Advance)
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &[u8]) -> (RequestState, Result<usize, ParseError>) {
        let mut parser = RequestLineParser::default();
        let mut request = RequestState::new();
        for (i, &b) in line.iter().enumerate() {
            let mut step = parser.step(b, &mut request);
            while step == Ok(Step::Reexamine) {
                step = parser.step(b, &mut request);
            }
            match step {
                Ok(Step::Complete) => return (request, Ok(i + 1)),
                Ok(_) => {}
                Err(e) => return (request, Err(e)),
            }
        }
        (request, Ok(line.len()))
    }

    #[test]
    fn long_method_is_truncated_to_unknown() {
        let (request, result) = run(b"GETTTTTTTTTT / HTTP/1.1\r\n");
        assert!(result.is_ok());
        assert_eq!(request.method(), Some(Method::UNKNOWN));
    }

    #[test]
    fn second_space_must_be_single() {
        let (_, result) = run(b"GET /  HTTP/1.1\r\n");
        assert_eq!(result, Err(ParseError::InvalidVersion));
    }
}
