use crate::prelude::*;

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

impl RequestDispatcher {
    pub async fn get(
        &self,
        url: impl Into<String>,
        response_format: ResponseFormat,
    ) -> Result<ResultBody, RelayError> {
        self.dispatch(TransportDescriptor::get(url).with_response_format(response_format))
            .await
    }

    /// POSTs a form-encoded `body`.
    pub async fn post_form(
        &self,
        url: impl Into<String>,
        body: impl Into<String>,
        response_format: ResponseFormat,
    ) -> Result<ResultBody, RelayError> {
        self.dispatch(
            TransportDescriptor::post(url, body.into())
                .with_header(CONTENT_TYPE, FORM_URLENCODED)
                .with_response_format(response_format),
        )
        .await
    }

    /// POSTs `body` with the context's static authorization token, JSON
    /// encoded if `json`, form-encoded otherwise. The response is read as
    /// text.
    pub async fn post_authorized(
        &self,
        url: impl Into<String>,
        body: impl Into<String>,
        json: bool,
    ) -> Result<ResultBody, RelayError> {
        let token = self.context().authorization_token.clone().unwrap_or_default();
        let content_type = if json { APPLICATION_JSON } else { FORM_URLENCODED };
        self.dispatch(
            TransportDescriptor::post(url, body.into())
                .with_header(AUTHORIZATION, token)
                .with_header(CONTENT_TYPE, content_type),
        )
        .await
    }
}
