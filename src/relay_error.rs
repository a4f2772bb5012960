use crate::prelude::*;
use thiserror::Error as ThisError;

/// Errors raised by the host (foreign side) from its implementations of
/// [`NativeTransportExecutor`], [`PrivilegedBridgeExecutor`] and
/// [`MessageChannel`].
#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error)]
pub enum HostSideError {
    #[error("Host transport failed to complete request to '{url}', underlying error: '{underlying}'")]
    RequestFailed { url: String, underlying: String },

    #[error("Host message channel rejected message: '{reason}'")]
    ChannelSendFailed { reason: String },

    #[error("Host is unable to execute requests: '{reason}'")]
    Unavailable { reason: String },

    #[error("Unexpected error in host callback: '{reason}'")]
    Unexpected { reason: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for HostSideError {
    fn from(value: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Unexpected {
            reason: value.reason,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error)]
pub enum RustSideError {
    #[error("Bad response code: {status_code}")]
    BadResponseCode { status_code: u16 },

    #[error("Unable to read HTTP response body as {format:?}")]
    MalformedResponseBody { format: ResponseFormat },

    #[error("Malformed relay message: {reason}")]
    MalformedMessage { reason: String },

    #[error("Invalid execution context: {reason}")]
    InvalidExecutionContext { reason: String },

    #[error("No relay peer, privileged bridge or native transport available")]
    NoTransportAvailable,

    #[error("Timed out waiting for relayed result")]
    RelayTimeout,

    #[error("Failed to receive result of request")]
    FailedToReceiveResult,
}

/// Everything that can make a request fail, as observed by the caller of
/// [`RequestDispatcher`].
#[derive(Debug, PartialEq, Eq, Clone, ThisError, Error)]
pub enum RelayError {
    #[error(transparent)]
    FromRust {
        #[from]
        error: RustSideError,
    },

    #[error(transparent)]
    FromHost {
        #[from]
        error: HostSideError,
    },

    /// The relay peer answered with `code = -1`. Peers in minimal failure
    /// mode do not say why.
    #[error("Relay peer reported failure, reason: {reason:?}")]
    FromPeer { reason: Option<FailureReason> },
}

impl RelayError {
    /// Collapses the error into the coarse category that may cross the relay.
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::FromRust { error } => match error {
                RustSideError::BadResponseCode { status_code } => FailureReason::Status {
                    status_code: *status_code,
                },
                RustSideError::MalformedResponseBody { .. }
                | RustSideError::MalformedMessage { .. } => FailureReason::MalformedBody,
                RustSideError::RelayTimeout => FailureReason::Timeout,
                RustSideError::NoTransportAvailable
                | RustSideError::InvalidExecutionContext { .. } => {
                    FailureReason::NoTransportAvailable
                }
                RustSideError::FailedToReceiveResult => FailureReason::Dropped,
            },
            Self::FromHost { error } => match error {
                HostSideError::ChannelSendFailed { .. } => FailureReason::ChannelSend,
                HostSideError::Unavailable { .. } => FailureReason::NoTransportAvailable,
                HostSideError::RequestFailed { .. } | HostSideError::Unexpected { .. } => {
                    FailureReason::Transport
                }
            },
            Self::FromPeer { reason } => reason.clone().unwrap_or(FailureReason::Transport),
        }
    }
}

/// Coarse failure category, optionally carried in `relay-response` messages
/// and handed to [`RequestListener::on_failure`] in
/// [`FailureDetail::Detailed`] mode.
#[derive(Enum, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FailureReason {
    Transport,
    Status { status_code: u16 },
    MalformedBody,
    Timeout,
    ChannelSend,
    NoTransportAvailable,
    Dropped,
}
