use crate::prelude::*;

/// The caller's continuations for one request. Exactly one of the two
/// methods is called, exactly once.
#[uniffi::export(with_foreign)]
pub trait RequestListener: Send + Sync {
    fn on_success(&self, body: Arc<RelayedBody>);

    /// `reason` is `None` unless the dispatcher runs with
    /// [`FailureDetail::Detailed`].
    fn on_failure(&self, reason: Option<FailureReason>);
}
