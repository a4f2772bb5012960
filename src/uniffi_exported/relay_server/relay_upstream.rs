use crate::prelude::*;

/// Where a [`RelayServer`] sends the requests it receives.
#[derive(Clone)]
pub enum RelayUpstream {
    /// The server runs in a privileged context and executes requests itself.
    Native(Arc<dyn NativeTransportExecutor>),

    /// The server is a middle hop, e.g. a content script between a page and
    /// an extension background, and forwards every request through its own
    /// dispatcher.
    Forward(Arc<RequestDispatcher>),
}

impl RelayUpstream {
    pub(crate) fn execute(&self, descriptor: TransportDescriptor, continuation: Continuation) {
        match self {
            Self::Native(native_transport) => {
                execute_natively(native_transport, descriptor, continuation)
            }
            Self::Forward(dispatcher) => dispatcher.submit(descriptor, continuation),
        }
    }
}
