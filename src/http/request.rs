use crate::error::{Error, ParseError};

/// Longest accepted request target, in bytes.
pub const MAX_TARGET_LEN: usize = 1 << 13;

/// HTTP request methods.
///
/// Only GET and HEAD are served. Any other alphabetic token is recognized
/// syntactically as `UNKNOWN` and answered with 501 at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// Any other method token
    UNKNOWN,
}

impl Method {
    /// Matches a method token case-sensitively.
    ///
    /// # Example
    ///
    /// ```
    /// # use catalog_server::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Method::GET);
    /// assert_eq!(Method::from_token(b"get"), Method::UNKNOWN);
    /// ```
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::GET,
            b"HEAD" => Method::HEAD,
            _ => Method::UNKNOWN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::UNKNOWN => "UNKNOWN",
        }
    }
}

/// Mutable per-connection record filled in by the parser phases.
///
/// Created once per connection and [`reset`](RequestState::reset) between
/// pipelined requests; the target buffer keeps its allocation across resets.
#[derive(Debug)]
pub struct RequestState {
    target: Vec<u8>,
    method: Option<Method>,
    close_requested: bool,
    connection_open: bool,
    error: Option<Error>,
}

impl RequestState {
    pub fn new() -> Self {
        Self {
            target: Vec::with_capacity(MAX_TARGET_LEN + 1),
            method: None,
            close_requested: false,
            connection_open: true,
            error: None,
        }
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Target as printable text, for logging.
    pub fn target_lossy(&self) -> String {
        String::from_utf8_lossy(&self.target).into_owned()
    }

    /// Appends one byte to the target, failing once the target outgrows
    /// [`MAX_TARGET_LEN`].
    pub fn push_target(&mut self, byte: u8) -> Result<(), ParseError> {
        self.target.push(byte);
        if self.target.len() > MAX_TARGET_LEN {
            return Err(ParseError::TargetTooLong {
                limit: MAX_TARGET_LEN,
            });
        }
        Ok(())
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    /// Whether the client sent `Connection: close` on this message.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn is_open(&self) -> bool {
        self.connection_open
    }

    /// Peer half-closed, timed out or the socket failed; nothing more is parsed.
    pub fn mark_closed(&mut self) {
        self.connection_open = false;
    }

    /// Records an error. The connection is considered closed from here on and
    /// no further parsing happens for this message.
    pub fn fail(&mut self, error: Error) {
        self.error = Some(error);
        self.connection_open = false;
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Clears per-message fields for the next pipelined request.
    pub fn reset(&mut self) {
        self.target.clear();
        self.method = None;
        self.close_requested = false;
        self.error = None;
    }
}

impl Default for RequestState {
    fn default() -> Self {
        Self::new()
    }
}
