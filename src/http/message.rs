//! HTTP message types
//!
//! This module defines the request header builder and the parsed response
//! types returned by a fetch.

use super::{ByteBuffer, Error, Result, Url, LF, REQUEST_HEADER_CAPACITY};
use bytes::Bytes;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    /// Convert method to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outgoing request header in wire format
///
/// Created with the request line and a `Host` field already written. Fields
/// are appended verbatim; nothing stops a caller from setting the same field
/// twice. Lines end in a bare `\n`.
#[derive(Debug, Clone)]
pub struct RequestHeader {
    buf: ByteBuffer,
    closed: bool,
}

impl RequestHeader {
    /// Start a request header for `method` on `url`
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;

        let mut header = RequestHeader {
            buf: ByteBuffer::with_capacity(REQUEST_HEADER_CAPACITY)?,
            closed: false,
        };

        let request_line = format!("{} {} HTTP/1.1{}", method, url.path(), LF);
        header.buf.append(request_line.as_bytes())?;
        header.add_field("Host", url.host())?;

        Ok(header)
    }

    /// Append a `name: value` line
    pub fn add_field(&mut self, name: &str, value: &str) -> Result<()> {
        if self.closed {
            return Err(Error::HeaderClosed);
        }

        self.buf.append(name.as_bytes())?;
        self.buf.append(b": ")?;
        self.buf.append(value.as_bytes())?;
        self.buf.append(LF.as_bytes())
    }

    /// Terminate the header section with a blank line
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::HeaderClosed);
        }

        self.buf.append(LF.as_bytes())?;
        self.closed = true;
        Ok(())
    }

    /// Check if the blank line ending the header has been written
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get the header in wire format
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Get the header size in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the header holds no bytes
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the capacity of the underlying buffer
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

/// Response fields that are copied into a named slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownField {
    Date,
    ContentType,
    ContentLength,
    LastModified,
    AcceptRanges,
}

impl KnownField {
    /// Look up a field name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        [
            KnownField::Date,
            KnownField::ContentType,
            KnownField::ContentLength,
            KnownField::LastModified,
            KnownField::AcceptRanges,
        ]
        .into_iter()
        .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    /// Get the canonical field name
    pub fn name(&self) -> &'static str {
        match self {
            KnownField::Date => "Date",
            KnownField::ContentType => "Content-Type",
            KnownField::ContentLength => "Content-Length",
            KnownField::LastModified => "Last-Modified",
            KnownField::AcceptRanges => "Accept-Ranges",
        }
    }
}

/// Parsed response header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub(crate) http_version: String,
    pub(crate) status: u16,
    pub(crate) content_length: Option<usize>,
    pub(crate) date: Option<String>,
    pub(crate) content_type: Option<String>,
    pub(crate) last_modified: Option<String>,
    pub(crate) accept_ranges: Option<String>,
    pub(crate) header_byte_length: usize,
}

impl ResponseHeader {
    /// Get the HTTP version token of the status line
    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    /// Get the status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Declared body length, 0 when the field was absent
    pub fn content_length(&self) -> usize {
        self.content_length.unwrap_or(0)
    }

    /// Declared body length, `None` when the field was absent
    pub fn declared_content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// Get the `Date` field
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Get the `Content-Type` field
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the `Last-Modified` field
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Get the `Accept-Ranges` field
    pub fn accept_ranges(&self) -> Option<&str> {
        self.accept_ranges.as_deref()
    }

    /// Offset of the first body byte in the raw response
    pub fn header_byte_length(&self) -> usize {
        self.header_byte_length
    }

    pub(crate) fn set_field(&mut self, field: KnownField, value: &str) -> Result<()> {
        match field {
            KnownField::Date => self.date = Some(value.to_string()),
            KnownField::ContentType => self.content_type = Some(value.to_string()),
            KnownField::LastModified => self.last_modified = Some(value.to_string()),
            KnownField::AcceptRanges => self.accept_ranges = Some(value.to_string()),
            KnownField::ContentLength => {
                let length = value.parse::<usize>().map_err(|_| {
                    Error::HeaderParse(format!("invalid Content-Length: {}", value))
                })?;
                self.content_length = Some(length);
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResponseHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "HTTP Version: {}", self.http_version)?;
        writeln!(f, "Content-Type: {}", self.content_type().unwrap_or(""))?;
        writeln!(f, "Content-Length: {}", self.content_length())?;
        writeln!(f, "Accept-Ranges: {}", self.accept_ranges().unwrap_or(""))?;
        writeln!(f, "Date: {}", self.date().unwrap_or(""))?;
        writeln!(f, "Last-Modified: {}", self.last_modified().unwrap_or(""))
    }
}

/// Write the diagnostic summary of `header` to `out`
pub fn print_header<W: Write>(header: &ResponseHeader, mut out: W) -> io::Result<()> {
    write!(out, "{}", header)
}

/// Completed response
///
/// Owns the raw bytes read from the connection: the header section followed
/// directly by the body. The body is a view into the same allocation.
#[derive(Debug, Clone)]
pub struct Response {
    ok: bool,
    raw: Bytes,
    body_offset: usize,
    header: ResponseHeader,
}

impl Response {
    pub(crate) fn new(raw: Bytes, header: ResponseHeader) -> Self {
        let body_offset = header.header_byte_length.min(raw.len());
        Response {
            ok: true,
            raw,
            body_offset,
            header,
        }
    }

    /// Whether a response was received; says nothing about the status code
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Get the parsed header
    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    /// Get the raw response: header bytes followed by the body
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Get the body
    pub fn body(&self) -> &[u8] {
        &self.raw[self.body_offset..]
    }

    /// Get the offset of the body in the raw response
    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Give up the response, keeping only the raw buffer
    pub fn into_raw(self) -> Bytes {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!("PUT".parse::<Method>().unwrap(), Method::Put);
        assert!("DELETE".parse::<Method>().is_err());
    }

    #[test]
    fn test_new_header_request_line_and_host() {
        let header = RequestHeader::new(Method::Get, "example.com/a/b").unwrap();
        assert_eq!(header.as_bytes(), b"GET /a/b HTTP/1.1\nHost: example.com\n");
        assert!(!header.is_closed());
        assert_eq!(header.capacity(), REQUEST_HEADER_CAPACITY);
    }

    #[test]
    fn test_new_header_rejects_tls() {
        let result = RequestHeader::new(Method::Get, "https://example.com/");
        assert!(matches!(result, Err(Error::UnsupportedScheme(_))));
    }

    #[test]
    fn test_add_field_allows_duplicates() {
        let mut header = RequestHeader::new(Method::Post, "localhost:8080/submit").unwrap();
        header.add_field("Accept", "*/*").unwrap();
        header.add_field("Accept", "text/plain").unwrap();
        assert_eq!(
            header.as_bytes(),
            b"POST /submit HTTP/1.1\nHost: localhost\nAccept: */*\nAccept: text/plain\n"
        );
    }

    #[test]
    fn test_close_appends_single_blank_line() {
        for fields in 0..5 {
            let mut header = RequestHeader::new(Method::Get, "localhost/").unwrap();
            for i in 0..fields {
                header.add_field(&format!("X-Field-{}", i), "v").unwrap();
            }
            header.close().unwrap();

            let bytes = header.as_bytes();
            assert!(bytes.ends_with(b"\n\n"));
            assert!(!bytes.ends_with(b"\n\n\n"));
            assert_eq!(bytes.windows(2).filter(|w| *w == b"\n\n").count(), 1);
        }
    }

    #[test]
    fn test_closed_header_rejects_changes() {
        let mut header = RequestHeader::new(Method::Get, "localhost/").unwrap();
        header.close().unwrap();
        assert!(matches!(header.add_field("A", "b"), Err(Error::HeaderClosed)));
        assert!(matches!(header.close(), Err(Error::HeaderClosed)));
    }

    #[test]
    fn test_header_grows_past_initial_capacity() {
        let mut header = RequestHeader::new(Method::Get, "localhost/").unwrap();
        let long = "v".repeat(3000);
        header.add_field("X-Long", &long).unwrap();
        header.close().unwrap();
        assert!(header.capacity() >= header.len());
        assert_eq!(header.capacity(), 4096);
        assert!(header.as_bytes().ends_with(b"\n\n"));
    }

    #[test]
    fn test_known_field_lookup() {
        assert_eq!(KnownField::from_name("content-length"), Some(KnownField::ContentLength));
        assert_eq!(KnownField::from_name("DATE"), Some(KnownField::Date));
        assert_eq!(KnownField::from_name("Server"), None);
    }

    #[test]
    fn test_print_header() {
        let header = ResponseHeader {
            http_version: "HTTP/1.1".to_string(),
            status: 200,
            content_length: Some(5),
            content_type: Some("text/plain".to_string()),
            ..Default::default()
        };

        let mut out = Vec::new();
        print_header(&header, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Status: 200\nHTTP Version: HTTP/1.1\n"));
        assert!(text.contains("Content-Type: text/plain\n"));
        assert!(text.contains("Content-Length: 5\n"));
        assert!(text.ends_with("Last-Modified: \n"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_response_body_view() {
        let raw = Bytes::from_static(b"HTTP/1.1 200 OK\n\nhello");
        let header = ResponseHeader {
            status: 200,
            header_byte_length: 17,
            content_length: Some(5),
            ..Default::default()
        };
        let response = Response::new(raw, header);
        assert!(response.is_ok());
        assert_eq!(response.body_offset(), 17);
        assert_eq!(response.body(), b"hello");
        assert_eq!(response.raw().len(), 22);
    }
}
