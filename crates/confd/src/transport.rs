//! Socket ownership and round trips.

use std::io::{self, BufReader};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::options::DEFAULT_PORT;
use crate::request::Request;
use crate::response::Response;
use crate::wire;

/// Transports move framed messages to and from the daemon.
///
/// Concurrent use is undefined; the connection core guarantees serial
/// access through its worker.
pub trait Transport: Send {
    fn connect(&mut self, url: &Url) -> Result<()>;
    fn is_connected(&self) -> bool;
    /// Execute one request/response round trip. Any I/O failure invalidates
    /// the socket so the next call finds the transport disconnected.
    fn round_trip(&mut self, request: &Request) -> Result<Response>;
    fn close(&mut self) -> Result<()>;
    fn set_timeout(&mut self, timeout: Duration);
}

/// The reference transport: plain TCP to `host:port`.
pub struct TcpTransport {
    timeout: Duration,
    host: String,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(timeout: Duration) -> TcpTransport {
        TcpTransport {
            timeout,
            host: String::new(),
            stream: None,
        }
    }

    fn exchange(&mut self, request: &Request) -> io::Result<Vec<u8>> {
        let stream = self.stream.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "transport is not connected")
        })?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;
        wire::write_request(stream, &self.host, request)?;
        let mut reader = BufReader::new(&mut *stream);
        wire::read_response(&mut reader)
    }
}

impl Default for TcpTransport {
    fn default() -> TcpTransport {
        TcpTransport::new(crate::options::DEFAULT_TIMEOUT)
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self, url: &Url) -> Result<()> {
        let host = url.host_str().ok_or_else(|| {
            Error::Transport(io::Error::new(
                io::ErrorKind::InvalidInput,
                "url carries no host",
            ))
        })?;
        let authority = format!("{host}:{}", url.port().unwrap_or(DEFAULT_PORT));
        let stream = TcpStream::connect(&authority)?;
        self.host = authority;
        self.stream = Some(stream);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn round_trip(&mut self, request: &Request) -> Result<Response> {
        let body = match self.exchange(request) {
            Ok(body) => body,
            Err(err) => {
                self.stream = None;
                return Err(Error::Transport(err));
            }
        };
        // Malformed JSON is a decode failure and leaves the socket alone.
        Ok(serde_json::from_slice(&body)?)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}
