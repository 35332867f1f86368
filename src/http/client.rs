//! HTTP client transport
//!
//! This module drives a single request/response exchange over a connected
//! session. The response is sized before it is read: the header section is
//! peeked without consuming it, parsed for its length and `Content-Length`,
//! and then header and body are read into one buffer of exactly that size.

use super::{
    parse_response_header, ClientConfig, Error, ReadPolicy, RequestHeader, Response,
    ResponseHeader, Result, SessionOps, TcpSession, Url,
};
use bytes::Bytes;
use std::fmt;

/// Transport progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Connecting,
    Sending,
    AwaitingHeader,
    ReadingBody,
    Complete,
    Error,
}

impl TransportState {
    /// Whether no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransportState::Complete | TransportState::Error)
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportState::Connecting => "connecting",
            TransportState::Sending => "sending",
            TransportState::AwaitingHeader => "awaiting header",
            TransportState::ReadingBody => "reading body",
            TransportState::Complete => "complete",
            TransportState::Error => "error",
        };
        f.write_str(name)
    }
}

/// HTTP client
///
/// Owns a connected session and runs one exchange on it. A client only
/// exists once its session is connected, so it starts in `Sending`; see
/// [`HttpClient::connect`] for the `Connecting` step.
pub struct HttpClient<S: SessionOps> {
    session: S,
    config: ClientConfig,
    state: TransportState,
}

impl HttpClient<TcpSession> {
    /// Connect to the target of `url` and wrap the connection in a client
    pub fn connect(url: &Url, config: ClientConfig) -> Result<Self> {
        match TcpSession::connect(url.host(), url.port()) {
            Ok(session) => {
                log::trace!(
                    "transport: {} -> {}",
                    TransportState::Connecting,
                    TransportState::Sending
                );
                Ok(HttpClient::new(session, config))
            }
            Err(e) => {
                log::error!("fetch failed while {}: {}", TransportState::Connecting, e);
                log::trace!(
                    "transport: {} -> {}",
                    TransportState::Connecting,
                    TransportState::Error
                );
                Err(e)
            }
        }
    }
}

impl<S: SessionOps> HttpClient<S> {
    /// Create a new HTTP client with a connected session
    pub fn new(session: S, config: ClientConfig) -> Self {
        HttpClient {
            session,
            config,
            state: TransportState::Sending,
        }
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.state
    }

    fn transition(&mut self, next: TransportState) {
        log::trace!("transport: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Send a closed request header and read the full response
    ///
    /// The session is closed afterwards whether or not the exchange worked.
    pub fn exchange(&mut self, header: &RequestHeader) -> Result<Response> {
        let result = self
            .send_request(header)
            .and_then(|()| self.receive_response());

        match &result {
            Ok(_) => self.transition(TransportState::Complete),
            Err(e) => {
                log::error!("fetch failed while {}: {}", self.state, e);
                self.transition(TransportState::Error);
            }
        }

        if let Err(e) = self.close() {
            log::warn!("failed to close connection: {}", e);
        }

        result
    }

    /// Send the request header
    pub fn send_request(&mut self, header: &RequestHeader) -> Result<()> {
        if !header.is_closed() {
            return Err(Error::Send("request header is not closed".to_string()));
        }

        let wire = header.as_bytes();
        let mut written = 0;

        while written < wire.len() {
            let n = self
                .session
                .write(&wire[written..])
                .map_err(|e| Error::Send(e.to_string()))?;
            if n == 0 {
                return Err(Error::Send("connection accepted no bytes".to_string()));
            }
            written += n;
        }

        log::debug!("sent {} byte request header", written);
        Ok(())
    }

    /// Peek the response header without consuming it
    pub fn receive_header(&mut self) -> Result<ResponseHeader> {
        self.transition(TransportState::AwaitingHeader);

        let mut window = vec![0u8; self.config.max_header_size];
        let n = self
            .session
            .peek(&mut window)
            .map_err(|e| Error::Receive(format!("peek failed: {}", e)))?;
        if n == 0 {
            return Err(Error::Receive(
                "connection closed before a response arrived".to_string(),
            ));
        }

        let header = parse_response_header(&window[..n])?;
        log::debug!(
            "response {} {}, header {} bytes, content length {:?}",
            header.http_version(),
            header.status(),
            header.header_byte_length(),
            header.declared_content_length()
        );
        Ok(header)
    }

    /// Receive the whole response: header and body in one buffer
    pub fn receive_response(&mut self) -> Result<Response> {
        let header = self.receive_header()?;

        let content_length = header
            .declared_content_length()
            .ok_or(Error::MissingContentLength)?;
        let total = header
            .header_byte_length()
            .checked_add(content_length)
            .ok_or_else(|| {
                Error::HeaderParse(format!("Content-Length too large: {}", content_length))
            })?;

        self.transition(TransportState::ReadingBody);

        let mut buf = Vec::new();
        buf.try_reserve_exact(total)?;
        buf.resize(total, 0);

        let filled = match self.config.read_policy {
            ReadPolicy::Exact => self.read_exact(&mut buf, header.header_byte_length())?,
            ReadPolicy::SingleRead => self.read_once(&mut buf)?,
        };
        buf.truncate(filled);

        Ok(Response::new(Bytes::from(buf), header))
    }

    fn read_exact(&mut self, buf: &mut [u8], header_len: usize) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self
                .session
                .read(&mut buf[filled..])
                .map_err(|e| Error::Receive(format!("read failed: {}", e)))?;
            if n == 0 {
                return Err(Error::IncompleteBody {
                    expected: buf.len() - header_len,
                    received: filled.saturating_sub(header_len),
                });
            }
            filled += n;
        }
        Ok(filled)
    }

    fn read_once(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self
            .session
            .read(buf)
            .map_err(|e| Error::Receive(format!("read failed: {}", e)))?;
        if n == 0 {
            return Err(Error::Receive(
                "connection closed before the response was read".to_string(),
            ));
        }
        if n < buf.len() {
            log::warn!("short read: got {} of {} response bytes", n, buf.len());
        }
        Ok(n)
    }

    /// Close the connection
    pub fn close(&mut self) -> Result<()> {
        self.session.close()
    }

    /// Get a reference to the underlying session
    pub fn session(&self) -> &S {
        &self.session
    }
}
