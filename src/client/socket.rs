//! Unix socket client for communicating with the daemon.

use crate::config::Endpoint;
use crate::error::ChannelError;
use crate::protocol::{framing, Command};
use anyhow::Result;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tracing::{debug, trace};

const READ_CHUNK: usize = 4096;

/// One-shot request/response client for reminderd.
///
/// Every call opens its own connection, so a single client can be shared
/// between concurrent tasks.
#[derive(Debug, Clone)]
pub struct ControlClient {
    endpoint: Endpoint,
}

impl ControlClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Encode `command` and send it to the daemon.
    pub async fn request(&self, command: &Command) -> Result<String> {
        let line = command.encode()?;
        Ok(self.send(&line).await?)
    }

    /// Send one request line and return the daemon's reply.
    ///
    /// `command` must not end with a newline; exactly one terminator is
    /// appended. The reply is everything received until the daemon closes
    /// the connection, decoded lossily and trimmed.
    pub async fn send(&self, command: &str) -> Result<String, ChannelError> {
        let path = self.endpoint.path();
        let mut stream = UnixStream::connect(path)
            .await
            .map_err(|e| ChannelError::from_connect(path, e))?;
        debug!("Connected to {}", self.endpoint);

        let request = framing::frame_request(command);
        match write_request(&mut stream, &request).await {
            Ok(()) => debug!("Sent {} byte request", request.len()),
            Err(e) if is_hangup(&e) => debug!("Daemon closed before reading request: {}", e),
            Err(e) => return Err(ChannelError::Io(e)),
        }

        let response = read_until_close(&mut stream).await?;
        debug!("Received {} byte response", response.len());

        Ok(framing::decode_response(&response))
    }
}

async fn write_request(stream: &mut UnixStream, request: &[u8]) -> io::Result<()> {
    stream.write_all(request).await?;
    stream.flush().await
}

/// Read until end-of-stream. The daemon closing its end is the only
/// response delimiter.
async fn read_until_close(stream: &mut UnixStream) -> Result<Vec<u8>, ChannelError> {
    let mut response = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                trace!("Read {} bytes", n);
                response.extend_from_slice(&chunk[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // A local peer that closes with our request still unread shows up
            // as a reset; whatever it wrote first has already been delivered.
            Err(e) if is_hangup(&e) => {
                debug!("Daemon hung up: {}", e);
                break;
            }
            Err(e) => return Err(ChannelError::Io(e)),
        }
    }
    Ok(response)
}

/// The daemon closed its end of the connection.
///
/// Only valid for local stream sockets, where a reset is raised after every
/// byte the peer wrote has been delivered. Over a network transport a reset
/// can drop data in flight and must be reported as a failure.
fn is_hangup(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset
    )
}
