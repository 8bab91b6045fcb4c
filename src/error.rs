//! Error types for request parsing and dispatch.

use std::io;

use thiserror::Error;

use crate::http::response::StatusCode;

/// Grammar violations found while parsing a request head.
///
/// Every variant is answered with `400 Bad Request` and closes the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty method token")]
    EmptyMethod,

    #[error("non-alphabetic byte in method token")]
    InvalidMethod,

    #[error("expected a single space")]
    ExpectedSpace,

    #[error("request target exceeds {limit} bytes")]
    TargetTooLong { limit: usize },

    #[error("request target is empty or does not start with '/'")]
    InvalidTarget,

    #[error("unsupported HTTP version")]
    InvalidVersion,

    #[error("expected CRLF")]
    ExpectedCrlf,

    #[error("invalid byte in header name")]
    InvalidHeaderName,

    #[error("empty header name")]
    EmptyHeaderName,

    #[error("duplicate {0} header")]
    DuplicateHeader(&'static str),

    #[error("request bodies are not accepted")]
    ContentLengthNotAllowed,

    #[error("unexpected byte after header value")]
    InvalidHeaderValue,

    #[error("malformed head terminator")]
    InvalidTerminator,
}

/// Outcome of handling one request that did not end in a successful response.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request line, headers or terminator
    #[error("bad request: {0}")]
    BadRequest(#[from] ParseError),

    /// Syntactically valid method other than GET or HEAD
    #[error("method not implemented")]
    UnknownMethod,

    /// Nothing to serve for the target, locally or through the redirect table
    #[error("resource not found")]
    NotFound,

    /// Filesystem or redirect table failure
    #[error("internal error: {0}")]
    Internal(#[source] io::Error),

    /// The peer went away or the body could not be completed; nothing more is written
    #[error("response aborted: {0}")]
    Aborted(#[source] io::Error),
}

impl Error {
    /// Status code answered for this error, if any response is written at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::BadRequest(_) => Some(StatusCode::BadRequest),
            Error::UnknownMethod => Some(StatusCode::NotImplemented),
            Error::NotFound => Some(StatusCode::NotFound),
            Error::Internal(_) => Some(StatusCode::InternalServerError),
            Error::Aborted(_) => None,
        }
    }

    /// Whether the connection must be closed once this error has been answered.
    pub fn closes_connection(&self) -> bool {
        matches!(
            self,
            Error::BadRequest(_) | Error::Internal(_) | Error::Aborted(_)
        )
    }
}
