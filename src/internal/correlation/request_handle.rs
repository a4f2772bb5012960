use crate::prelude::*;
use std::sync::PoisonError;
use std::time::Instant;
use tokio::task::AbortHandle;

/// The caller's pair of success/failure continuations, folded into one
/// call that receives the result. Consumed by value, so it runs at most once.
pub(crate) type Continuation = Box<dyn FnOnce(Result<ResultBody, RelayError>) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Created,
    Dispatched,
    Completed,
    Failed,
}

/// One pending relayed or bridged request, owned by the in-flight set
/// until it is resolved.
pub(crate) struct RequestHandle {
    pub(crate) id: CorrelationId,
    pub(crate) descriptor: TransportDescriptor,
    pub(crate) route: TransportRoute,
    pub(crate) state: RequestState,
    pub(crate) created_at: Instant,
    /// Behind a mutex so the handle, and the map holding it, is `Sync`.
    continuation: Mutex<Continuation>,
    timer: Option<AbortHandle>,
}

impl RequestHandle {
    pub(crate) fn new(
        descriptor: TransportDescriptor,
        route: TransportRoute,
        continuation: Continuation,
    ) -> Self {
        Self {
            id: CorrelationId::new(),
            descriptor,
            route,
            state: RequestState::Created,
            created_at: Instant::now(),
            continuation: Mutex::new(continuation),
            timer: None,
        }
    }

    /// The timeout task racing this request, aborted once it resolves.
    pub(crate) fn set_timer(&mut self, timer: AbortHandle) {
        if let Some(previous) = self.timer.replace(timer) {
            previous.abort();
        }
    }

    /// Runs the continuation with `result` and returns the final state.
    pub(crate) fn resolve(mut self, result: Result<ResultBody, RelayError>) -> RequestState {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.state = if result.is_ok() {
            RequestState::Completed
        } else {
            RequestState::Failed
        };
        debug!(
            correlation_id = %self.id,
            route = ?self.route,
            state = ?self.state,
            elapsed_ms = self.created_at.elapsed().as_millis() as u64,
            "Resolved request"
        );
        let continuation = self
            .continuation
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        continuation(result);
        self.state
    }
}
