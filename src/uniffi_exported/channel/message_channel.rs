use crate::prelude::*;

/// Bidirectional asynchronous message transport between two execution
/// contexts, implemented by the host (e.g. a runtime port). Messages are
/// JSON text, see [`RelayMessage`].
///
/// Delivery is reliable and ordered per channel, but replies to different
/// requests may come back in any order.
#[uniffi::export(with_foreign)]
pub trait MessageChannel: Send + Sync {
    /// Whether a peer is established on the other end.
    fn is_connected(&self) -> bool;

    fn send(&self, message: String) -> Result<(), HostSideError>;

    /// Registers `listener` to receive every message arriving on this channel.
    fn on_message(&self, listener: Arc<InboundMessageListener>);
}
