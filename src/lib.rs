//! httpfetch - minimal synchronous HTTP/1.1 client
//!
//! This crate fetches a single resource over a plain TCP connection: it
//! builds the request header, sends it, peeks the response to size the
//! header section, then reads header and body into one buffer.

pub mod http;

pub use http::{fetch, fetch_ex, free_response, Error, Method, Response, Result};
