use crate::prelude::*;

/// An abstraction of a HTTP response the host's native transport (or bridge)
/// completed a [`TransportDescriptor`] with.
#[derive(Record, Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: u16,

    /// Can be empty.
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status_code: u16, body: Vec<u8>) -> Self {
        Self { status_code, body }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status_code)
    }
}
