//! Fetch entry points
//!
//! `fetch` is the one-call form. `fetch_ex` takes a caller-built header for
//! anything beyond the default `Content-Type: text/html` field.

use super::{
    ClientConfig, HttpClient, Method, RequestHeader, Response, Result, Url,
};

/// Runs fetches with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    config: ClientConfig,
}

impl Fetcher {
    /// Create a fetcher using `config`
    pub fn new(config: ClientConfig) -> Self {
        Fetcher { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch `url` with a default header carrying `Content-Type: text/html`
    pub fn fetch(&self, url: &str, method: Method) -> Result<Response> {
        let mut header = RequestHeader::new(method, url)?;
        header.add_field("Content-Type", "text/html")?;
        self.fetch_ex(url, method, header)
    }

    /// Fetch `url` with a caller-built header that is not closed yet
    pub fn fetch_ex(
        &self,
        url: &str,
        method: Method,
        mut header: RequestHeader,
    ) -> Result<Response> {
        header.close()?;
        let target = Url::parse_with_default_port(url, self.config.default_port)?;
        log::debug!("{} {}", method, target);

        HttpClient::connect(&target, self.config.clone())?.exchange(&header)
    }
}

/// Create a request header for `method` on `url`
pub fn new_header(method: Method, url: &str) -> Result<RequestHeader> {
    RequestHeader::new(method, url)
}

/// Append a field to `header`; duplicates are not detected
pub fn header_add(header: &mut RequestHeader, field: &str, value: &str) -> Result<()> {
    header.add_field(field, value)
}

/// Send an HTTP/1.1 request to `url` with the default configuration
///
/// The URL must be one of the following formats:
///
/// - `host/path`
/// - `host:port/path`
/// - `http://host/path`
/// - `x.x.x.x/path`
/// - `x.x.x.x:port/path`
///
/// A `Content-Type: text/html` field is always sent; use [`fetch_ex`] to
/// control the fields. An `Ok` result means a response was received, not
/// that its status is a success.
pub fn fetch(url: &str, method: Method) -> Result<Response> {
    Fetcher::default().fetch(url, method)
}

/// Same as [`fetch`] but sends `header` as built by the caller
pub fn fetch_ex(url: &str, method: Method, header: RequestHeader) -> Result<Response> {
    Fetcher::default().fetch_ex(url, method, header)
}

/// Release a response and its raw buffer
pub fn free_response(response: Response) {
    drop(response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Error;

    #[test]
    fn test_tls_url_fails_before_io() {
        assert!(matches!(
            fetch("https://127.0.0.1:1/", Method::Get),
            Err(Error::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_closed_header_rejected() {
        let mut header = new_header(Method::Get, "127.0.0.1:1/").unwrap();
        header.close().unwrap();
        assert!(matches!(
            fetch_ex("127.0.0.1:1/", Method::Get, header),
            Err(Error::HeaderClosed)
        ));
    }

    #[test]
    fn test_header_add() {
        let mut header = new_header(Method::Put, "localhost/doc").unwrap();
        header_add(&mut header, "Content-Type", "application/json").unwrap();
        assert_eq!(
            header.as_bytes(),
            b"PUT /doc HTTP/1.1\nHost: localhost\nContent-Type: application/json\n"
        );
    }
}
