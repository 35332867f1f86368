//! Growable byte buffer
//!
//! Append-only accumulator for outgoing request headers. Capacity doubles
//! whenever an append would overflow it, and a failed reservation is returned
//! to the caller instead of truncating.

use super::Result;

/// Append-only byte buffer with doubling growth
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    data: Vec<u8>,
    cap: usize,
}

impl ByteBuffer {
    /// Create a buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let cap = capacity.max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(cap)?;
        Ok(ByteBuffer { data, cap })
    }

    /// Append `bytes`, growing the capacity first if they do not fit
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self.data.len() + bytes.len();
        if needed > self.cap {
            let mut new_cap = self.cap;
            while new_cap < needed {
                new_cap = new_cap.saturating_mul(2);
            }
            self.data.try_reserve_exact(new_cap - self.data.len())?;
            log::trace!("byte buffer grew from {} to {} bytes", self.cap, new_cap);
            self.cap = new_cap;
        }

        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Get the bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity; only ever doubles
    pub fn capacity(&self) -> usize {
        self.cap
    }
}
