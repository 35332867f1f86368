//! Client configuration
//!
//! This module provides the configuration builder for fetches.

use super::{DEFAULT_HTTP_PORT, MAX_HEADER_SIZE};

/// How the body is read once the response size is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Keep reading until header and body are complete; a connection that
    /// ends early is an `IncompleteBody` error
    #[default]
    Exact,
    /// Issue a single sized read and accept whatever it returns, so the body
    /// may come back short
    SingleRead,
}

/// Client configuration (immutable after building)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub(crate) default_port: u16,
    pub(crate) max_header_size: usize,
    pub(crate) read_policy: ReadPolicy,
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Port used when the URL names none
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Size of the peek window the response header must fit in
    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    /// Get the body read policy
    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            default_port: DEFAULT_HTTP_PORT,
            max_header_size: MAX_HEADER_SIZE,
            read_policy: ReadPolicy::default(),
        }
    }
}

/// Client configuration builder
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the port used for URLs without one
    pub fn default_port(mut self, port: u16) -> Self {
        self.config.default_port = port;
        self
    }

    /// Set the peek window size (minimum 1 byte)
    pub fn max_header_size(mut self, size: usize) -> Self {
        self.config.max_header_size = size.max(1);
        self
    }

    /// Set the body read policy
    pub fn read_policy(mut self, policy: ReadPolicy) -> Self {
        self.config.read_policy = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
