use crate::prelude::*;
use serde_json::Value;

/// The body handed to a caller on success: text, or the parsed JSON value
/// when the request asked for [`ResponseFormat::Json`].
#[derive(Clone, Debug, PartialEq, enum_as_inner::EnumAsInner)]
pub enum ResultBody {
    Text(String),
    Json(Value),
}

impl ResultBody {
    /// Reads a raw response body. Text is decoded lossily, the way a
    /// browser's `text()` does.
    pub(crate) fn from_raw(format: ResponseFormat, body: &[u8]) -> Result<Self, RustSideError> {
        match format {
            ResponseFormat::Text => Ok(Self::Text(String::from_utf8_lossy(body).into_owned())),
            ResponseFormat::Json => serde_json::from_slice(body)
                .map(Self::Json)
                .map_err(|_| RustSideError::MalformedResponseBody { format }),
        }
    }

    /// Reads the `body` of a successful `relay-response`.
    pub(crate) fn from_wire(
        format: ResponseFormat,
        body: Option<Value>,
    ) -> Result<Self, RustSideError> {
        match (format, body) {
            (ResponseFormat::Json, body) => Ok(Self::Json(body.unwrap_or(Value::Null))),
            (ResponseFormat::Text, None) => Ok(Self::Text(String::new())),
            (ResponseFormat::Text, Some(Value::String(text))) => Ok(Self::Text(text)),
            (ResponseFormat::Text, Some(_)) => {
                Err(RustSideError::MalformedResponseBody { format })
            }
        }
    }

    pub(crate) fn into_wire(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Json(value) => value,
        }
    }

    pub fn format(&self) -> ResponseFormat {
        match self {
            Self::Text(_) => ResponseFormat::Text,
            Self::Json(_) => ResponseFormat::Json,
        }
    }
}

/// A [`ResultBody`] as handed to the host through [`RequestListener::on_success`].
#[derive(Object, Debug)]
pub struct RelayedBody {
    body: ResultBody,
}

impl RelayedBody {
    pub fn new(body: ResultBody) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &ResultBody {
        &self.body
    }
}

#[export]
impl RelayedBody {
    pub fn format(&self) -> ResponseFormat {
        self.body.format()
    }

    /// The text of a [`ResponseFormat::Text`] body.
    pub fn text(&self) -> Option<String> {
        self.body.as_text().cloned()
    }

    /// The JSON of a [`ResponseFormat::Json`] body, re-serialized.
    pub fn json_string(&self) -> Option<String> {
        self.body.as_json().map(Value::to_string)
    }
}
