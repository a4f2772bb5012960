use crate::prelude::*;

/// Maps what the host's native transport (or bridge) reported into the
/// result handed to the caller: a 2xx status with a body readable in
/// `format` succeeds, everything else fails.
pub(crate) fn result_from_outcome(
    format: ResponseFormat,
    outcome: TransportOutcome,
) -> Result<ResultBody, RelayError> {
    let response = Result::<TransportResponse, HostSideError>::from(outcome)?;

    if !response.is_success() {
        return Err(RustSideError::BadResponseCode {
            status_code: response.status_code,
        }
        .into());
    }

    ResultBody::from_raw(format, &response.body).map_err(RelayError::from)
}
