use bytes::{BufMut, Bytes, BytesMut};

const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes the server answers with.
///
/// - `Ok` (200): File found and served
/// - `Found` (302): Resource lives on another server, see `Location`
/// - `BadRequest` (400): Malformed request head
/// - `NotFound` (404): Nothing to serve for the target
/// - `InternalServerError` (500): Filesystem or redirect table failure
/// - `NotImplemented` (501): Method other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use catalog_server::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// A response head: status line plus headers in the order they are written.
///
/// Bodies are never buffered here; file contents are streamed separately by
/// [`crate::http::writer`].
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
}

/// Builder for response heads.
///
/// ```ignore
/// let head = ResponseBuilder::new(StatusCode::Found)
///     .header("Server", "catalog-server")
///     .header("Location", "http://mirror.example:8080/a.txt")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    /// Appends a header. Headers are written in insertion order.
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Appends `Connection: close` when `close` is set.
    pub fn close_if(self, close: bool) -> Self {
        if close {
            self.header("Connection", "close")
        } else {
            self
        }
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
        }
    }
}

impl Response {
    /// Serializes the head, ending with the blank line.
    pub fn encode(&self) -> Bytes {
        let reason = self.status.reason_phrase();
        let capacity = self.headers.iter().fold(
            HTTP_VERSION.len() + reason.len() + 10,
            |acc, (k, v)| acc.saturating_add(k.len() + v.len() + 4),
        );
        let mut buf = BytesMut::with_capacity(capacity.saturating_add(2));

        buf.put_slice(HTTP_VERSION.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.status.as_u16().to_string().as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(reason.as_bytes());
        buf.put_slice(b"\r\n");

        for (k, v) in &self.headers {
            buf.put_slice(k.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(v.as_bytes());
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"\r\n");
        buf.freeze()
    }
}

/// Response heads precomputed once per server.
///
/// Only the `Server` identifier is configurable; each status has a keep-alive
/// and a `Connection: close` variant where the wire format allows both.
#[derive(Debug, Clone)]
pub struct CannedResponses {
    server_name: String,
    bad_request: Bytes,
    internal_error: Bytes,
    not_implemented: Bytes,
    not_found: Bytes,
    not_found_close: Bytes,
}

impl CannedResponses {
    pub fn new(server_name: impl Into<String>) -> Self {
        let server_name = server_name.into();

        let bad_request = ResponseBuilder::new(StatusCode::BadRequest)
            .header("Connection", "close")
            .header("Server", server_name.as_str())
            .build()
            .encode();
        let internal_error = ResponseBuilder::new(StatusCode::InternalServerError)
            .header("Connection", "close")
            .header("Server", server_name.as_str())
            .build()
            .encode();
        let not_implemented = ResponseBuilder::new(StatusCode::NotImplemented)
            .header("Server", server_name.as_str())
            .build()
            .encode();
        let not_found = Self::not_found_head(&server_name, false);
        let not_found_close = Self::not_found_head(&server_name, true);

        Self {
            server_name,
            bad_request,
            internal_error,
            not_implemented,
            not_found,
            not_found_close,
        }
    }

    fn not_found_head(server_name: &str, close: bool) -> Bytes {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Server", server_name)
            .close_if(close)
            .build()
            .encode()
    }

    /// Canned head for an empty-bodied status. `close` only changes the 404
    /// variant; 400 and 500 always close, 501 never forces it.
    pub fn status(&self, status: StatusCode, close: bool) -> Option<Bytes> {
        match status {
            StatusCode::BadRequest => Some(self.bad_request.clone()),
            StatusCode::InternalServerError => Some(self.internal_error.clone()),
            StatusCode::NotImplemented => Some(self.not_implemented.clone()),
            StatusCode::NotFound if close => Some(self.not_found_close.clone()),
            StatusCode::NotFound => Some(self.not_found.clone()),
            StatusCode::Ok | StatusCode::Found => None,
        }
    }

    /// `200 OK` head announcing `len` bytes of octet-stream body.
    pub fn file(&self, len: u64, close: bool) -> Bytes {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Server", self.server_name.as_str())
            .close_if(close)
            .header("Content-Type", "application/octet-stream")
            .header("Content-Length", len.to_string())
            .build()
            .encode()
    }

    /// `302 Found` head pointing at `location`.
    pub fn redirect(&self, location: &str) -> Bytes {
        ResponseBuilder::new(StatusCode::Found)
            .header("Server", self.server_name.as_str())
            .header("Location", location)
            .build()
            .encode()
    }
}
