use crate::prelude::*;

/// Passed to the host together with every request it should execute. The
/// host calls `notify_outcome` exactly once when the request finished;
/// further calls are ignored.
#[derive(Object)]
pub struct TransportOutcomeListener {
    correlation_id: Option<CorrelationId>,
    outcome_listener: HostOperationOutcomeListener<TransportOutcome>,
}

impl TransportOutcomeListener {
    pub(crate) fn new(on_outcome: impl FnOnce(TransportOutcome) + Send + 'static) -> Self {
        Self {
            correlation_id: None,
            outcome_listener: HostOperationOutcomeListener::new(on_outcome),
        }
    }

    /// A listener for a request tagged with `correlation_id`.
    pub(crate) fn correlated(
        correlation_id: CorrelationId,
        on_outcome: impl FnOnce(TransportOutcome) + Send + 'static,
    ) -> Self {
        Self {
            correlation_id: Some(correlation_id),
            outcome_listener: HostOperationOutcomeListener::new(on_outcome),
        }
    }
}

#[export]
impl TransportOutcomeListener {
    pub fn correlation_id(&self) -> Option<String> {
        self.correlation_id.as_ref().map(ToString::to_string)
    }

    pub fn notify_outcome(&self, outcome: TransportOutcome) {
        if !self.outcome_listener.notify_outcome(outcome) {
            debug!(correlation_id = ?self.correlation_id, "Ignored repeated outcome");
        }
    }
}
