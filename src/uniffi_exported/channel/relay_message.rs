use crate::prelude::*;
use serde_json::Value;

/// `code` of a `relay-response`: `0` on success, `-1` on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum ResultCode {
    Success,
    Failure,
}

impl From<ResultCode> for i8 {
    fn from(value: ResultCode) -> Self {
        match value {
            ResultCode::Success => 0,
            ResultCode::Failure => -1,
        }
    }
}

impl TryFrom<i8> for ResultCode {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, String> {
        match value {
            0 => Ok(ResultCode::Success),
            -1 => Ok(ResultCode::Failure),
            other => Err(format!("unknown result code {other}")),
        }
    }
}

/// The messages exchanged over a [`MessageChannel`], distinguished by their
/// `type` field. Anything else is rejected as malformed.
///
/// ```json
/// {"type":"relay-request","id":"…","url":"…","method":"GET","headers":{},"body":null,"json":false}
/// {"type":"relay-response","id":"…","code":0,"body":"…"}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, enum_as_inner::EnumAsInner)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RelayMessage {
    RelayRequest {
        id: CorrelationId,
        url: String,
        #[serde(default)]
        method: HttpMethod,
        #[serde(default)]
        headers: HashMap<String, String>,
        #[serde(default)]
        body: Option<RequestBody>,
        #[serde(default)]
        json: bool,
    },
    RelayResponse {
        id: CorrelationId,
        code: ResultCode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
        /// Not understood by minimal peers, which ignore it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<FailureReason>,
    },
}

impl RelayMessage {
    pub fn request(id: CorrelationId, descriptor: &TransportDescriptor) -> Self {
        let descriptor = descriptor.clone();
        Self::RelayRequest {
            id,
            url: descriptor.url,
            method: descriptor.method,
            headers: descriptor.headers,
            body: descriptor.body,
            json: descriptor.response_format.is_json(),
        }
    }

    pub fn success(id: CorrelationId, body: ResultBody) -> Self {
        Self::RelayResponse {
            id,
            code: ResultCode::Success,
            body: Some(body.into_wire()),
            reason: None,
        }
    }

    pub fn failure(id: CorrelationId, reason: Option<FailureReason>) -> Self {
        Self::RelayResponse {
            id,
            code: ResultCode::Failure,
            body: None,
            reason,
        }
    }

    pub fn id(&self) -> CorrelationId {
        match self {
            Self::RelayRequest { id, .. } | Self::RelayResponse { id, .. } => id.clone(),
        }
    }

    /// The request described by a `relay-request`, `None` for responses.
    pub fn into_descriptor(self) -> Option<(CorrelationId, TransportDescriptor)> {
        match self {
            Self::RelayRequest {
                id,
                url,
                method,
                headers,
                body,
                json,
            } => Some((
                id,
                TransportDescriptor {
                    url,
                    method,
                    headers,
                    body,
                    response_format: ResponseFormat::from_json_flag(json),
                },
            )),
            Self::RelayResponse { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String, RustSideError> {
        serde_json::to_string(self).map_err(|error| RustSideError::MalformedMessage {
            reason: error.to_string(),
        })
    }

    pub fn from_json(message: &str) -> Result<Self, RustSideError> {
        serde_json::from_str(message).map_err(|error| RustSideError::MalformedMessage {
            reason: error.to_string(),
        })
    }
}
