//! Request dispatch
//!
//! Turns an assembled request (path, tenant-scoped query, optional body)
//! into exactly one exchange over a [`Transport`]. No retries, no caching.

use books_core::path::ResourcePath;
use books_core::payload::{encode_payload, Attachments, RequestPayload};
use books_core::query::{build_query, QueryParameters};
use books_core::response::{check_status, BinaryFile, RawResponse};
use books_core::tenant::TenantContext;
use books_core::{Error, Result, Verb};
use serde::Serialize;

use crate::transport::{HttpRequest, Transport};

/// Tenant plus the transport every request goes through
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    tenant: TenantContext,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(tenant: TenantContext, transport: T) -> Self {
        Self { tenant, transport }
    }

    pub fn tenant(&self) -> &TenantContext {
        &self.tenant
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request and classify its status
    ///
    /// `query` must already carry the tenant scope (see [`build_query`]).
    pub async fn dispatch(
        &self,
        verb: Verb,
        path: &ResourcePath,
        query: &QueryParameters,
        payload: Option<RequestPayload>,
    ) -> Result<RawResponse> {
        let request = self.request(verb, path, query, payload);

        match &request.payload {
            Some(payload) => log::debug!("{verb} {path} ({:?})", payload.encoding()),
            None => log::debug!("{verb} {path}"),
        }

        let raw = self.transport.execute(request).await?;
        log::debug!("{verb} {path} -> {}", raw.status);

        check_status(verb, &path.to_path(), raw)
    }

    /// Download a binary resource
    ///
    /// The bytes are returned as they came; an error status is reported as
    /// `Remote` with the body decoded lossily.
    pub async fn fetch_file(
        &self,
        path: &ResourcePath,
        query: &QueryParameters,
    ) -> Result<BinaryFile> {
        let request = self.request(Verb::Get, path, query, None);
        log::debug!("GET {path} (binary)");

        let response = self.transport.fetch_binary(request).await?;
        log::debug!(
            "GET {path} -> {} ({} bytes)",
            response.status,
            response.file.len()
        );

        if response.status >= 400 {
            let body = String::from_utf8_lossy(&response.file.bytes).into_owned();
            check_status(
                Verb::Get,
                &path.to_path(),
                RawResponse::new(response.status, body),
            )?;
        }

        Ok(response.file)
    }

    /// Build, encode and dispatch in one go
    ///
    /// Caller filters are copied and scoped to the tenant. A body or
    /// attachments on a verb that carries no body is rejected with
    /// `Error::Request` before anything is sent.
    pub async fn send<B>(
        &self,
        verb: Verb,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
        body: Option<&B>,
        attachments: Attachments,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        if !verb.has_body() && (body.is_some() || !attachments.is_empty()) {
            return Err(Error::Request {
                verb,
                path: path.to_path(),
                message: format!("{verb} requests carry no body or attachments"),
            });
        }

        let query = build_query(&self.tenant, filters);

        let payload = if verb.has_body() {
            Some(encode_payload(body, attachments)?)
        } else {
            None
        };

        self.dispatch(verb, path, &query, payload).await
    }

    /// Tenant-scoped binary download
    pub async fn download(
        &self,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
    ) -> Result<BinaryFile> {
        let query = build_query(&self.tenant, filters);
        self.fetch_file(path, &query).await
    }

    fn request(
        &self,
        verb: Verb,
        path: &ResourcePath,
        query: &QueryParameters,
        payload: Option<RequestPayload>,
    ) -> HttpRequest {
        HttpRequest {
            verb,
            path: path.to_path(),
            url: path.url(self.tenant.base_endpoint()),
            bearer: self.tenant.credential().to_string(),
            query: query.to_pairs(),
            payload,
        }
    }
}
