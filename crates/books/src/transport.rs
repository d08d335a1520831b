//! HTTP transport
//!
//! The [`Transport`] trait is the seam between request assembly and the
//! network. [`ReqwestTransport`] is the production implementation; tests plug
//! in their own.

use std::time::Duration;

use async_trait::async_trait;
use books_core::payload::{BodyEncoding, RequestPayload, JSON_FIELD};
use books_core::response::{file_name_from_disposition, BinaryFile, RawResponse};
use books_core::{Error, Result, Verb};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};

/// Everything the transport needs to perform one exchange
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub verb: Verb,
    /// Resource path, kept for error context
    pub path: String,
    pub url: String,
    pub bearer: String,
    pub query: Vec<(String, String)>,
    /// Body for POST/PUT; `None` sends no body at all
    pub payload: Option<RequestPayload>,
}

/// Status and raw bytes of a download
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub status: u16,
    pub file: BinaryFile,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange and return status and body text
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse>;

    /// Perform one exchange and return the body as raw bytes
    async fn fetch_binary(&self, request: HttpRequest) -> Result<BinaryResponse>;
}

/// [`Transport`] over a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Transport with default timeouts
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn request_builder(&self, request: &HttpRequest) -> Result<reqwest::RequestBuilder> {
        let method = match request.verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .bearer_auth(&request.bearer)
            .query(&request.query);

        if let Some(payload) = &request.payload {
            builder = match payload.encoding() {
                BodyEncoding::Form if payload.json().is_some() => {
                    builder.form(&payload.form_fields())
                }
                BodyEncoding::Form => builder,
                BodyEncoding::Multipart => builder.multipart(multipart_form(request, payload)?),
            };
        }

        Ok(builder)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        let response = self
            .request_builder(&request)?
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(&request, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&request, e))?;

        Ok(RawResponse { status, body })
    }

    async fn fetch_binary(&self, request: HttpRequest) -> Result<BinaryResponse> {
        let response = self
            .request_builder(&request)?
            .send()
            .await
            .map_err(|e| transport_error(&request, e))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&request, e))?;

        Ok(BinaryResponse {
            status,
            file: BinaryFile {
                file_name: header_str(&headers, CONTENT_DISPOSITION)
                    .and_then(file_name_from_disposition),
                content_type: header_str(&headers, CONTENT_TYPE).map(str::to_string),
                bytes: bytes.to_vec(),
            },
        })
    }
}

/// Builder for [`ReqwestTransport`]
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("books/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReqwestTransportBuilder {
    /// Total time allowed for one exchange, body included
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<ReqwestTransport> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| Error::ClientSetup(e.to_string()))?;

        Ok(ReqwestTransport { client })
    }
}

/// Multipart body: the JSON field as a text part, then every file part
fn multipart_form(
    request: &HttpRequest,
    payload: &RequestPayload,
) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();

    if let Some(json) = payload.json() {
        form = form.text(JSON_FIELD, json.to_string());
    }

    for attachment in payload.attachments().iter() {
        let part = reqwest::multipart::Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|e| Error::Request {
                verb: request.verb,
                path: request.path.clone(),
                message: format!("Invalid MIME type {}: {e}", attachment.mime_type),
            })?;

        form = form.part(attachment.field.clone(), part);
    }

    Ok(form)
}

fn transport_error(request: &HttpRequest, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            verb: request.verb,
            path: request.path.clone(),
        }
    } else {
        Error::Network {
            verb: request.verb,
            path: request.path.clone(),
            message: err.to_string(),
        }
    }
}

fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
