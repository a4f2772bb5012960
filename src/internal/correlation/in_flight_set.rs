use crate::prelude::*;
use dashmap::DashMap;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Mapping from correlation id to pending [`RequestHandle`].
///
/// Flow:
/// 1. The dispatcher creates a handle and calls `insert()`
/// 2. The request is sent to the peer relay or bridge, tagged with the id
/// 3. The result arrives and `resolve()` (or `resolve_with()`) removes the
///    handle and runs its continuation
/// 4. Unresolved handles are released by `expire()` or `remove_expired()`
///
/// A handle is always removed from the map before its continuation runs, so
/// continuations may freely dispatch new requests.
pub(crate) struct InFlightSet {
    pending: DashMap<CorrelationId, RequestHandle>,
}

impl InFlightSet {
    pub(crate) fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    pub(crate) fn insert(&self, handle: RequestHandle) -> CorrelationId {
        let id = handle.id.clone();
        trace!(correlation_id = %id, route = ?handle.route, "Registered in-flight request");
        self.pending.insert(id.clone(), handle);
        id
    }

    pub(crate) fn mark_dispatched(&self, id: &CorrelationId) {
        if let Some(mut handle) = self.pending.get_mut(id) {
            if handle.state == RequestState::Created {
                handle.state = RequestState::Dispatched;
            }
        }
    }

    /// Ties the timeout task to the request. A request that already resolved
    /// no longer needs it, so the task is aborted right away.
    pub(crate) fn attach_timer(&self, id: &CorrelationId, timer: AbortHandle) {
        match self.pending.get_mut(id) {
            Some(mut handle) => handle.set_timer(timer),
            None => timer.abort(),
        }
    }

    /// Returns `false` if no request with `id` is in flight.
    pub(crate) fn resolve(&self, id: &CorrelationId, result: Result<ResultBody, RelayError>) -> bool {
        self.resolve_with(id, |_| result)
    }

    /// Like `resolve`, but builds the result from the request's descriptor,
    /// e.g. to read the body according to its response format.
    pub(crate) fn resolve_with(
        &self,
        id: &CorrelationId,
        result: impl FnOnce(&TransportDescriptor) -> Result<ResultBody, RelayError>,
    ) -> bool {
        let Some((_, handle)) = self.pending.remove(id) else {
            warn!(correlation_id = %id, "Result for unknown or already resolved correlation id");
            return false;
        };
        let result = result(&handle.descriptor);
        handle.resolve(result);
        true
    }

    /// Fails the request with a timeout if it is still in flight.
    pub(crate) fn expire(&self, id: &CorrelationId) -> bool {
        let Some((_, handle)) = self.pending.remove(id) else {
            return false;
        };
        warn!(
            correlation_id = %id,
            url = %handle.descriptor.url,
            "Request timed out waiting for result"
        );
        handle.resolve(Err(RustSideError::RelayTimeout.into()));
        true
    }

    /// Fails every request older than `timeout`, returns how many were removed.
    pub(crate) fn remove_expired(&self, timeout: Duration) -> usize {
        let expired = self
            .pending
            .iter()
            .filter(|entry| entry.created_at.elapsed() >= timeout)
            .map(|entry| entry.key().clone())
            .collect::<Vec<_>>();

        expired.iter().filter(|id| self.expire(id)).count()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn state_of(&self, id: &CorrelationId) -> Option<RequestState> {
        self.pending.get(id).map(|handle| handle.state)
    }

    fn handle_relay_message(&self, message: RelayMessage) {
        match message {
            RelayMessage::RelayResponse {
                id,
                code,
                body,
                reason,
            } => {
                self.resolve_with(&id, |descriptor| match code {
                    ResultCode::Success => {
                        ResultBody::from_wire(descriptor.response_format, body)
                            .map_err(RelayError::from)
                    }
                    ResultCode::Failure => Err(RelayError::FromPeer { reason }),
                });
            }
            RelayMessage::RelayRequest { id, .. } => {
                warn!(correlation_id = %id, "Dropping relay-request received by dispatcher");
            }
        }
    }
}

impl InboundMessageHandler for InFlightSet {
    fn handle_inbound(&self, message: String) {
        match RelayMessage::from_json(&message) {
            Ok(message) => self.handle_relay_message(message),
            Err(error) => warn!(%error, "Dropping malformed relay message"),
        }
    }
}
