use crate::prelude::*;

/// Hands `descriptor` to the host's native transport and feeds the outcome
/// into `continuation`. A synchronous refusal by the host is reported through
/// the same listener, so `continuation` still runs exactly once.
pub(crate) fn execute_natively(
    native_transport: &Arc<dyn NativeTransportExecutor>,
    descriptor: TransportDescriptor,
    continuation: Continuation,
) {
    let format = descriptor.response_format;
    let listener = Arc::new(TransportOutcomeListener::new(move |outcome| {
        continuation(result_from_outcome(format, outcome))
    }));

    if let Err(error) =
        native_transport.execute_native_request(descriptor, Arc::clone(&listener))
    {
        warn!(%error, "Native transport refused request");
        listener.notify_outcome(TransportOutcome::Failure { error });
    }
}
