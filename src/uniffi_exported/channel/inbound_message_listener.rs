use crate::prelude::*;

/// Registered on a [`MessageChannel`] by a [`RequestDispatcher`] or a
/// [`RelayServer`]. The host calls `receive` for every arriving message.
#[derive(Object)]
pub struct InboundMessageListener {
    handler: Weak<dyn InboundMessageHandler>,
}

impl InboundMessageListener {
    pub(crate) fn new(handler: Weak<dyn InboundMessageHandler>) -> Self {
        Self { handler }
    }
}

#[export]
impl InboundMessageListener {
    pub fn receive(&self, message: String) {
        match self.handler.upgrade() {
            Some(handler) => handler.handle_inbound(message),
            None => debug!("Receiver of channel already dropped, ignoring message"),
        }
    }
}
