use crate::prelude::*;

/// Description of one HTTP request, independent of which transport ends up
/// executing it.
///
/// A [`RequestDispatcher`] takes the descriptor by value and never changes it
/// after dispatch.
#[derive(Record, Clone, Debug, PartialEq, Eq)]
pub struct TransportDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
    pub response_format: ResponseFormat,
}

impl TransportDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::default(),
            headers: HashMap::new(),
            body: None,
            response_format: ResponseFormat::default(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<RequestBody>) -> Self {
        Self::new(url)
            .with_method(HttpMethod::Post)
            .with_body(body)
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    pub fn expecting_json(self) -> Self {
        self.with_response_format(ResponseFormat::Json)
    }

    pub fn expecting_text(self) -> Self {
        self.with_response_format(ResponseFormat::Text)
    }
}
