use crate::prelude::*;

/// Body of a request: text, or opaque bytes.
///
/// On the wire text is a JSON string and bytes are a JSON array of numbers.
#[derive(Enum, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireBody", into = "WireBody")]
pub enum RequestBody {
    Text { text: String },
    Bytes { bytes: Vec<u8> },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<WireBody> for RequestBody {
    fn from(value: WireBody) -> Self {
        match value {
            WireBody::Text(text) => Self::Text { text },
            WireBody::Bytes(bytes) => Self::Bytes { bytes },
        }
    }
}

impl From<RequestBody> for WireBody {
    fn from(value: RequestBody) -> Self {
        match value {
            RequestBody::Text { text } => Self::Text(text),
            RequestBody::Bytes { bytes } => Self::Bytes(bytes),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text { text }
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text {
            text: text.to_owned(),
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes { bytes }
    }
}

impl RequestBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text { text } => text.as_bytes(),
            Self::Bytes { bytes } => bytes,
        }
    }
}
