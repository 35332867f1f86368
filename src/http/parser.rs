//! HTTP response header parsing
//!
//! The parser works on a window of bytes that must already hold the complete
//! header section. It never asks for more data: a window without the blank
//! line that ends the header is an error.

use super::{Error, KnownField, Result, ResponseHeader};

/// Find the next LF at or after `start`
///
/// Returns the line without its terminator (a trailing CR is stripped too)
/// and the offset just past the LF.
fn next_line(buf: &[u8], start: usize) -> Option<(&[u8], usize)> {
    let lf_pos = start + buf[start..].iter().position(|&b| b == b'\n')?;
    let line = &buf[start..lf_pos];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, lf_pos + 1))
}

/// Parse HTTP response status line
///
/// Format: VERSION STATUS REASON
/// Example: HTTP/1.1 200 OK
///
/// The reason phrase is discarded.
pub fn parse_status_line(line: &str) -> Result<(String, u16)> {
    let parts: Vec<&str> = line.splitn(3, ' ').collect();

    if parts.len() < 2 {
        return Err(Error::HeaderParse(format!(
            "Invalid status line: expected at least 2 parts, got {}",
            parts.len()
        )));
    }

    let version = parts[0];
    if !version.starts_with("HTTP/") {
        return Err(Error::HeaderParse(format!("Invalid HTTP version: {}", version)));
    }

    let status = parts[1]
        .parse::<u16>()
        .map_err(|_| Error::HeaderParse(format!("Invalid status code: {}", parts[1])))?;

    Ok((version.to_string(), status))
}

fn parse_field_line(line: &str) -> Result<(&str, &str)> {
    let colon_pos = line
        .find(':')
        .ok_or_else(|| Error::HeaderParse(format!("No colon in header: {}", line)))?;

    let name = line[..colon_pos].trim();
    if name.is_empty() {
        return Err(Error::HeaderParse("Empty header name".to_string()));
    }

    Ok((name, line[colon_pos + 1..].trim()))
}

/// Parse the header section at the start of `raw`
///
/// Recognized fields land in their named slot, others are skipped.
/// `header_byte_length` is the offset just past the terminating blank line,
/// i.e. where the body starts in `raw`.
pub fn parse_response_header(raw: &[u8]) -> Result<ResponseHeader> {
    let (line, mut pos) = next_line(raw, 0)
        .ok_or_else(|| Error::HeaderParse("Unterminated status line".to_string()))?;
    let line = std::str::from_utf8(line)
        .map_err(|_| Error::HeaderParse("Status line is not valid UTF-8".to_string()))?;

    let (http_version, status) = parse_status_line(line)?;
    let mut header = ResponseHeader {
        http_version,
        status,
        ..Default::default()
    };

    loop {
        let (line, next) = next_line(raw, pos).ok_or_else(|| {
            Error::HeaderParse(format!(
                "Header section not terminated within {} bytes",
                raw.len()
            ))
        })?;
        pos = next;

        if line.is_empty() {
            header.header_byte_length = pos;
            return Ok(header);
        }

        let line = String::from_utf8_lossy(line);
        let (name, value) = parse_field_line(&line)?;
        match KnownField::from_name(name) {
            Some(field) => header.set_field(field, value)?,
            None => log::trace!("ignoring response field {}", name),
        }
    }
}
