use crate::prelude::*;

/// What the host passes back to Rust once it has executed a request,
/// UniFFI cannot pass `Result` across so this is its stand-in.
#[derive(Enum, Clone, Debug, PartialEq, Eq)]
pub enum TransportOutcome {
    Success { response: TransportResponse },
    Failure { error: HostSideError },
}

impl From<TransportOutcome> for Result<TransportResponse, HostSideError> {
    fn from(value: TransportOutcome) -> Self {
        match value {
            TransportOutcome::Success { response } => Ok(response),
            TransportOutcome::Failure { error } => Err(error),
        }
    }
}
