//! Session operations abstraction
//!
//! The transport only needs four primitives from a connection: a
//! non-consuming peek, a consuming read, a write and a close. `SessionOps`
//! names them so the transport can run over anything that provides them;
//! `TcpSession` is the plain TCP implementation.

use super::{Error, Result};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

/// Session operations trait
pub trait SessionOps {
    /// Copy pending bytes into `buf` without removing them from the stream
    fn peek(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Read data from the session
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write data to the session
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Close the session
    fn close(&mut self) -> Result<()>;
}

/// Plain TCP session operations
#[derive(Debug)]
pub struct TcpSession {
    stream: TcpStream,
}

impl TcpSession {
    /// Create a new session from a connected TCP stream
    pub fn new(stream: TcpStream) -> Self {
        TcpSession { stream }
    }

    /// Resolve `host:port` and connect to the first candidate that accepts
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let connect_error = |source: io::Error| Error::Connect {
            host: host.to_string(),
            port,
            source,
        };

        let addrs = (host, port).to_socket_addrs().map_err(connect_error)?;

        let mut last_error = None;
        for addr in addrs {
            log::debug!("connecting to {} ({}:{})", addr, host, port);
            match connect_addr(addr) {
                Ok(stream) => return Ok(TcpSession::new(stream)),
                Err(e) => {
                    log::warn!("connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(connect_error(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
        })))
    }
}

fn connect_addr(addr: SocketAddr) -> io::Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.connect(&SockAddr::from(addr))?;
    Ok(socket.into())
}

impl SessionOps for TcpSession {
    fn peek(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream.peek(buf).map_err(Error::from)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.stream.read(buf).map_err(Error::from)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.stream.write(buf).map_err(Error::from)
    }

    fn close(&mut self) -> Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            // Peer already hung up.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result.map_err(Error::from),
        }
    }
}
