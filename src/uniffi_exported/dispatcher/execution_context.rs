use crate::prelude::*;
use std::time::Duration;

/// Whether failures are reported with a [`FailureReason`] or as a bare signal.
#[derive(Enum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureDetail {
    /// `on_failure` gets no reason and `relay-response` carries none,
    /// compatible with peers that only understand `code = -1`.
    #[default]
    Minimal,
    Detailed,
}

impl FailureDetail {
    pub(crate) fn reason_for(&self, error: &RelayError) -> Option<FailureReason> {
        match self {
            Self::Minimal => None,
            Self::Detailed => Some(error.reason()),
        }
    }
}

/// Configuration of the execution context a [`RequestDispatcher`] runs in,
/// handed over at construction instead of being read from global state.
#[derive(Record, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionContext {
    /// Whether this context may use the native network transport directly.
    pub has_network_privilege: bool,

    /// How long a relayed or bridged request may stay in flight before it
    /// fails with [`FailureReason::Timeout`]. `None` waits forever.
    pub relay_timeout_ms: Option<u64>,

    pub failure_detail: FailureDetail,

    /// Sent verbatim as the `Authorization` header by `post_authorized`.
    pub authorization_token: Option<String>,
}

impl ExecutionContext {
    pub fn privileged() -> Self {
        Self {
            has_network_privilege: true,
            ..Self::default()
        }
    }

    pub fn restricted() -> Self {
        Self::default()
    }

    pub fn with_relay_timeout(mut self, timeout: Duration) -> Self {
        self.relay_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_failure_detail(mut self, failure_detail: FailureDetail) -> Self {
        self.failure_detail = failure_detail;
        self
    }

    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.authorization_token = Some(token.into());
        self
    }

    pub fn relay_timeout(&self) -> Option<Duration> {
        self.relay_timeout_ms.map(Duration::from_millis)
    }

    pub fn from_json(json: &str) -> Result<Self, RustSideError> {
        serde_json::from_str(json).map_err(|error| RustSideError::InvalidExecutionContext {
            reason: error.to_string(),
        })
    }
}
