//! URL decomposition
//!
//! Accepted shapes are `host/path`, `host:port/path`, `http://host/path` and
//! IPv4 literals with or without port and path. There is no percent-decoding,
//! no query handling and no IPv6 bracket syntax.

use super::{Error, Result, DEFAULT_HTTP_PORT};
use std::fmt;

const PLAIN_SCHEME: &str = "http://";
const TLS_SCHEME: &str = "https://";

/// Components of a request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    host: String,
    port: u16,
    path: String,
}

impl Url {
    /// Parse a URL, falling back to port 80
    pub fn parse(url: &str) -> Result<Self> {
        Self::parse_with_default_port(url, DEFAULT_HTTP_PORT)
    }

    /// Parse a URL, falling back to `default_port` when none is given
    pub fn parse_with_default_port(url: &str, default_port: u16) -> Result<Self> {
        if starts_with_ignore_case(url, TLS_SCHEME) {
            return Err(Error::UnsupportedScheme("https".to_string()));
        }

        let rest = if starts_with_ignore_case(url, PLAIN_SCHEME) {
            &url[PLAIN_SCHEME.len()..]
        } else {
            url
        };

        let host_end = rest.find([':', '/']).unwrap_or(rest.len());
        let host = &rest[..host_end];
        if host.is_empty() {
            return Err(Error::InvalidUrl(format!("missing host in {:?}", url)));
        }

        let after_host = &rest[host_end..];
        let (port, path) = match after_host.strip_prefix(':') {
            Some(port_and_path) => {
                let port_end = port_and_path.find('/').unwrap_or(port_and_path.len());
                let port_str = &port_and_path[..port_end];
                if port_str.is_empty() {
                    return Err(Error::InvalidUrl(format!("empty port in {:?}", url)));
                }
                let port = port_str.parse::<u16>().map_err(|_| {
                    Error::InvalidUrl(format!("invalid port {:?} in {:?}", port_str, url))
                })?;
                (port, &port_and_path[port_end..])
            }
            None => (default_port, after_host),
        };

        let path = if path.is_empty() { "/" } else { path };

        Ok(Url {
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    /// Get the host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port, explicit or default
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the path, `/` when the URL had none
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.host, self.port, self.path)
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
