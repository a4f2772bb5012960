use crate::prelude::*;

/// A [`TransportDescriptor`] handed to the privileged bridge, tagged with the
/// correlation id its result resolves.
#[derive(Record, Clone, Debug, PartialEq, Eq)]
pub struct BridgeRequest {
    pub id: String,
    pub descriptor: TransportDescriptor,
}

impl BridgeRequest {
    pub(crate) fn new(id: CorrelationId, descriptor: TransportDescriptor) -> Self {
        Self {
            id: id.to_string(),
            descriptor,
        }
    }
}
