use crate::prelude::*;

/// The host's native network transport, only usable from a context with
/// direct network privilege, e.g. an extension background page.
#[uniffi::export(with_foreign)]
pub trait NativeTransportExecutor: Send + Sync {
    /// Rust will tell the host to execute `request` by calling this
    /// function. Once the request has finished with a result (Success/Failure)
    /// the host passes back the outcome using the `listener_rust_side` callback.
    fn execute_native_request(
        &self,
        request: TransportDescriptor,
        listener_rust_side: Arc<TransportOutcomeListener>,
    ) -> Result<(), HostSideError>;
}
