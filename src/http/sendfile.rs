//! Memory-efficient body transfer.
//!
//! Streams a body to the connection in small chunks instead of loading it
//! into memory at once. Called after the response header block has been
//! sent, never before.

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Chunk size; sized for constrained targets.
const BUFFER_SIZE: usize = 512;

/// Copies `reader` to `writer` in [`BUFFER_SIZE`] chunks.
///
/// Returns the number of bytes transferred.
pub async fn send_body<W, R>(writer: &mut W, reader: &mut R) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; BUFFER_SIZE];
    let mut sent = 0u64;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await?;
        sent += n as u64;
    }

    writer.flush().await?;
    Ok(sent)
}

/// Streams a file to the connection as a response body.
pub async fn send_file<W>(writer: &mut W, path: impl AsRef<Path>) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut file = File::open(path).await?;
    send_body(writer, &mut file).await
}
