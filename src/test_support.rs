//! Helpers shared by the unit tests.

use std::io::{self, Cursor};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

// In-memory stand-in for a TcpStream
pub(crate) struct MockTcpStream {
    read_data: Cursor<Vec<u8>>,
    write_data: Vec<u8>,
    fail_writes: bool,
}

impl MockTcpStream {
    pub(crate) fn new(read_data: &[u8]) -> Self {
        Self {
            read_data: Cursor::new(read_data.to_vec()),
            write_data: Vec::new(),
            fail_writes: false,
        }
    }

    /// A stream whose writes fail as if the client hung up.
    pub(crate) fn broken_pipe(read_data: &[u8]) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(read_data)
        }
    }

    pub(crate) fn written(&self) -> String {
        String::from_utf8_lossy(&self.write_data).into_owned()
    }
}

impl AsyncRead for MockTcpStream {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let n = std::io::Read::read(&mut this.read_data, buf.initialize_unfilled())?;
        buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockTcpStream {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.fail_writes {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away")));
        }
        this.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
