//! HTTP/1.1 fetch implementation
//!
//! This module provides a blocking, one-shot HTTP/1.1 client: each call opens
//! its own connection, sends one request and reads one response.
//!
//! # Architecture
//!
//! The exchange is split into small pieces that own their data per call:
//!
//! - `Url` splits the target into host, port and path
//! - `RequestHeader` accumulates the wire request in a `ByteBuffer`
//! - `HttpClient` drives the transport over any `SessionOps` implementation
//! - `parse_response_header` sizes the header section from peeked bytes
//!
//! # Examples
//!
//! ```no_run
//! use httpfetch::http::{fetch, fetch_ex, Method, RequestHeader};
//!
//! let response = fetch("127.0.0.1:8080/", Method::Get).unwrap();
//! assert_eq!(response.header().status(), 200);
//!
//! let mut header = RequestHeader::new(Method::Post, "127.0.0.1:8080/upload").unwrap();
//! header.add_field("Content-Type", "application/json").unwrap();
//! let response = fetch_ex("127.0.0.1:8080/upload", Method::Post, header).unwrap();
//! println!("{}", String::from_utf8_lossy(response.body()));
//! ```

pub mod buffer;
pub mod client;
pub mod config;
pub mod fetch;
pub mod message;
pub mod parser;
pub mod session;
pub mod url;

pub use buffer::ByteBuffer;
pub use client::{HttpClient, TransportState};
pub use config::{ClientConfig, ClientConfigBuilder, ReadPolicy};
pub use fetch::{fetch, fetch_ex, free_response, header_add, new_header, Fetcher};
pub use message::{print_header, KnownField, Method, RequestHeader, Response, ResponseHeader};
pub use parser::{parse_response_header, parse_status_line};
pub use session::{SessionOps, TcpSession};
pub use url::Url;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Receive failed: {0}")]
    Receive(String),

    #[error("Header parse error: {0}")]
    HeaderParse(String),

    #[error("Response has no Content-Length")]
    MissingContentLength,

    #[error("Incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },

    #[error("Request header is already closed")]
    HeaderClosed,

    #[error("Buffer allocation failed: {0}")]
    Alloc(#[from] std::collections::TryReserveError),
}

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Upper bound on the response header section, used as the peek window
pub const MAX_HEADER_SIZE: usize = 8 * 1024;

/// Initial capacity of a request header buffer
pub const REQUEST_HEADER_CAPACITY: usize = 1024;

/// Line terminator used for outgoing requests
pub const LF: &str = "\n";
