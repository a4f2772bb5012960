use crate::prelude::*;

/// Which transport a [`RequestDispatcher`] uses for its requests.
#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportRoute {
    /// The context has direct network privilege, the native transport is
    /// called directly.
    Native,

    /// Restricted context with a connected peer relay.
    Relay,

    /// Restricted context without a peer relay, the host's privileged
    /// cross-origin bridge is used.
    Bridge,

    /// Nothing can carry the request, it fails immediately.
    Unavailable,
}
