use std::path::Path;

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Error;
use crate::http::response::CannedResponses;

/// Chunk size used when streaming file bodies.
pub const FILE_CHUNK_SIZE: usize = 4096;

/// Writes one serialized response head, tracking partial writes.
pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(head: Bytes) -> Self {
        Self {
            buffer: head,
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(std::io::ErrorKind::WriteZero.into());
            }

            self.written += n;
        }

        stream.flush().await
    }
}

/// Sends a head-only response. A failed write aborts the connection.
pub async fn send_head<W>(stream: &mut W, head: Bytes) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    ResponseWriter::new(head)
        .write_to_stream(stream)
        .await
        .map_err(Error::Aborted)
}

/// Serves `path` as `200 OK`, with the body unless `head_only` is set.
///
/// Stat and open failures happen before anything is written and are internal
/// errors. Once the head is out, any failure aborts the connection.
pub async fn send_file<W>(
    stream: &mut W,
    responses: &CannedResponses,
    path: &Path,
    head_only: bool,
    close: bool,
    chunk: &mut [u8],
) -> Result<u64, Error>
where
    W: AsyncWrite + Unpin,
{
    let meta = tokio::fs::metadata(path).await.map_err(Error::Internal)?;
    if meta.is_dir() {
        return Err(Error::NotFound);
    }
    let len = meta.len();
    let file = File::open(path).await.map_err(Error::Internal)?;

    send_head(stream, responses.file(len, close)).await?;
    if head_only {
        return Ok(0);
    }
    send_body(stream, file, len, chunk).await
}

/// Streams exactly `len` bytes of `body` through `chunk`.
///
/// The body is capped at `len` and a source that ends early aborts, so the
/// announced `Content-Length` is never wrong.
pub async fn send_body<W, R>(
    stream: &mut W,
    body: R,
    len: u64,
    chunk: &mut [u8],
) -> Result<u64, Error>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    let mut body = body.take(len);
    let mut sent: u64 = 0;
    loop {
        let n = body.read(chunk).await.map_err(Error::Aborted)?;
        if n == 0 {
            break;
        }
        stream.write_all(&chunk[..n]).await.map_err(Error::Aborted)?;
        sent += n as u64;
    }
    stream.flush().await.map_err(Error::Aborted)?;

    if sent < len {
        return Err(Error::Aborted(std::io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(sent)
}
