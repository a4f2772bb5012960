use crate::prelude::*;

type OnOutcome<R> = Box<dyn FnOnce(R) + Send>;

/// An object representing that Rust is listening on the outcome of an operation
/// carried out by the host. When the host has finished the operation, either
/// successfully or with failure, it passes back the outcome by calling
/// `notify_outcome`. This is effectively a callback pattern.
///
/// The callback is taken out on the first notification, so it runs at most
/// once no matter how often the host notifies.
pub(crate) struct HostOperationOutcomeListener<R> {
    on_outcome: Mutex<Option<OnOutcome<R>>>,
}

impl<R> HostOperationOutcomeListener<R> {
    pub(crate) fn new(on_outcome: impl FnOnce(R) + Send + 'static) -> Self {
        Self {
            on_outcome: Mutex::new(Some(Box::new(on_outcome))),
        }
    }

    /// Returns `false` if the outcome was already notified and this one got
    /// dropped.
    pub(crate) fn notify_outcome(&self, outcome: R) -> bool {
        let on_outcome = self
            .on_outcome
            .lock()
            .ok()
            .and_then(|mut on_outcome| on_outcome.take());

        match on_outcome {
            Some(on_outcome) => {
                on_outcome(outcome);
                true
            }
            None => {
                warn!("Host notified outcome more than once, ignoring");
                false
            }
        }
    }
}
