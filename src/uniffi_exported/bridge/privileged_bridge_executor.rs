use crate::prelude::*;

/// The host's privileged cross-origin request bridge (a
/// `GM_xmlhttpRequest`-like facility), the transport of last resort for a
/// restricted context that has no peer relay.
///
/// Rust calls `execute_bridge_request`, and once the request finished the
/// host passes back the outcome using `listener_rust_side`. The listener is
/// tagged with the same id as `request`, so concurrent bridge calls never
/// cross-resolve.
#[uniffi::export(with_foreign)]
pub trait PrivilegedBridgeExecutor: Send + Sync {
    fn execute_bridge_request(
        &self,
        request: BridgeRequest,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), HostSideError>;
}
