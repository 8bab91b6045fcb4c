use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Resolution};
use crate::error::Error;
use crate::http::cursor::StreamCursor;
use crate::http::parser::RequestParser;
use crate::http::request::{Method, RequestState};
use crate::http::response::StatusCode;
use crate::http::writer::{FILE_CHUNK_SIZE, send_file, send_head};

/// One client connection and everything it owns.
///
/// The read buffer, file buffer and request record belong to the connection
/// alone; only the [`Catalog`] is shared, read-only.
pub struct Connection<S> {
    stream: S,
    cursor: StreamCursor,
    parser: RequestParser,
    request: RequestState,
    catalog: Arc<Catalog>,
    chunk: Box<[u8]>,
    state: ConnectionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Reading,
    Processing,
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, catalog: Arc<Catalog>) -> Self {
        Self {
            stream,
            cursor: StreamCursor::new(),
            parser: RequestParser::new(),
            request: RequestState::new(),
            catalog,
            chunk: vec![0; FILE_CHUNK_SIZE].into_boxed_slice(),
            state: ConnectionState::Reading,
        }
    }

    pub fn with_read_timeout(mut self, deadline: Option<Duration>) -> Self {
        self.cursor = StreamCursor::new().with_read_timeout(deadline);
        self
    }

    /// Serves requests until the peer closes, asks to close, or an error
    /// forces the connection shut.
    pub async fn run(&mut self) {
        loop {
            match self.state {
                ConnectionState::Reading => {
                    self.parser
                        .read_head(&mut self.cursor, &mut self.stream, &mut self.request)
                        .await;

                    // Closed without an error: the peer went away, nothing to answer
                    self.state = if !self.request.is_open() && self.request.error().is_none() {
                        ConnectionState::Closed
                    } else {
                        ConnectionState::Processing
                    };
                }

                ConnectionState::Processing => {
                    let keep_alive = self.respond().await;
                    self.request.reset();

                    self.state = if keep_alive {
                        ConnectionState::Reading
                    } else {
                        ConnectionState::Closed
                    };
                }

                ConnectionState::Closed => break,
            }
        }

        let discarded = self.cursor.unread().len();
        if discarded > 0 {
            debug!(bytes = discarded, "Discarding unread pipelined input");
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown failed");
        }
    }

    /// Answers the parsed request. Returns whether the connection stays open.
    async fn respond(&mut self) -> bool {
        let close_requested = self.request.close_requested();
        let outcome = match self.request.take_error() {
            Some(err) => Err(err),
            None => self.dispatch(close_requested).await,
        };

        match outcome {
            Ok(status) => {
                info!(
                    method = self.method_name(),
                    target = %self.request.target_lossy(),
                    status = status.as_u16(),
                    "Request served"
                );
                !close_requested
            }
            Err(err) => self.answer_error(err, close_requested).await,
        }
    }

    async fn dispatch(&mut self, close: bool) -> Result<StatusCode, Error> {
        let method = match self.request.method() {
            Some(Method::GET) => Method::GET,
            Some(Method::HEAD) => Method::HEAD,
            Some(Method::UNKNOWN) | None => return Err(Error::UnknownMethod),
        };

        match self.catalog.sandbox.resolve(self.request.target()).await? {
            Resolution::File(path) => {
                send_file(
                    &mut self.stream,
                    &self.catalog.responses,
                    &path,
                    method == Method::HEAD,
                    close,
                    &mut self.chunk[..],
                )
                .await?;
                Ok(StatusCode::Ok)
            }

            Resolution::Rejected => Err(Error::NotFound),

            Resolution::Unresolved => {
                let Some(location) = self.catalog.redirects.lookup(self.request.target()).await?
                else {
                    return Err(Error::NotFound);
                };

                debug!(location = %location, "Redirect table match");
                send_head(&mut self.stream, self.catalog.responses.redirect(&location)).await?;
                Ok(StatusCode::Found)
            }
        }
    }

    async fn answer_error(&mut self, err: Error, close_requested: bool) -> bool {
        let Some(status) = err.status() else {
            debug!(error = %err, "Response aborted");
            return false;
        };

        if let Error::Internal(_) = err {
            warn!(
                method = self.method_name(),
                target = %self.request.target_lossy(),
                error = %err,
                "Internal error while serving request"
            );
        } else {
            info!(
                method = self.method_name(),
                target = %self.request.target_lossy(),
                status = status.as_u16(),
                error = %err,
                "Request rejected"
            );
        }

        if let Some(head) = self.catalog.responses.status(status, close_requested) {
            if let Err(e) = send_head(&mut self.stream, head).await {
                debug!(error = %e, "Failed to write error response");
                return false;
            }
        }

        !(err.closes_connection() || close_requested)
    }

    fn method_name(&self) -> &'static str {
        self.request.method().map_or("-", |m| m.as_str())
    }
}
