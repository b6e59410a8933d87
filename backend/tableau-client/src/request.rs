//! Request descriptors and their conversion into `reqwest` requests.

use crate::error::api::ApiError;

use common::RedactedToken;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Body, Method, Request};
use url::Url;

/// Header carrying the session token on every call after sign-in.
pub const AUTH_HEADER: &str = "X-Tableau-Auth";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// One outbound call, described as plain data.
///
/// Method and URL are kept as text so that whitespace trimming and validation
/// happen in one place, [`build_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET.as_str(), url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST.as_str(), url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE.as_str(), url)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// XML payload with the matching content type.
    pub fn with_xml(self, xml: impl Into<Vec<u8>>) -> Self {
        self.with_header(CONTENT_TYPE.as_str(), XML_CONTENT_TYPE)
            .with_body(xml)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Turn a descriptor into a ready-to-send request.
///
/// * method and URL are trimmed before parsing;
/// * a non-empty body is attached with an explicit `Content-Length`;
/// * caller headers are appended in order;
/// * with a session token, [`AUTH_HEADER`] is set last and replaces any caller
///   value, so an authenticated client can never send an unauthenticated call.
///
/// The result depends only on the inputs.
///
/// # Errors
///
/// Returns [`ApiError::Transport`] if the method, URL or a header cannot form a
/// valid HTTP request.
#[track_caller]
pub fn build_request(
    descriptor: &RequestDescriptor,
    token: Option<&RedactedToken>,
) -> Result<Request, ApiError> {
    let method_text = descriptor.method.trim();
    let method = Method::from_bytes(method_text.as_bytes())
        .map_err(|_| ApiError::invalid_request(format!("invalid HTTP method '{method_text}'")))?;

    let url = Url::parse(descriptor.url.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::invalid_request(format!(
            "unsupported URL scheme '{}'",
            url.scheme()
        )));
    }

    let mut request = Request::new(method, url);

    if let Some(body) = descriptor.body.as_ref().filter(|body| !body.is_empty()) {
        request
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        *request.body_mut() = Some(Body::from(body.clone()));
    }

    for (name, value) in &descriptor.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::invalid_request(format!("invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::invalid_request(format!("invalid value for header '{name}'")))?;
        request.headers_mut().append(header_name, header_value);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(token.as_str())
            .map_err(|_| ApiError::invalid_request("session token is not a valid header value"))?;
        value.set_sensitive(true);
        request
            .headers_mut()
            .insert(HeaderName::from_static("x-tableau-auth"), value);
    }

    Ok(request)
}
