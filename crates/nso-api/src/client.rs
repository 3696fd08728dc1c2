// RESTCONF HTTP client
//
// Wraps `reqwest::Client` with NSO-specific URL construction, Basic auth and
// the YANG JSON media type. Endpoint groups (devices, loopbacks) are inherent
// methods implemented in separate files to keep this module focused on
// transport mechanics.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::ConnectionParams;
use crate::error::Error;
use crate::models::{OperationEnvelope, OperationOutput};
use crate::transport::TransportConfig;

/// Media type for every RESTCONF request and response body.
pub const YANG_JSON: &str = "application/yang-data+json";

// ── Response ─────────────────────────────────────────────────────────

/// A fully-read RESTCONF response: status plus body text.
///
/// Mutating calls hand this back untouched. A 2xx only means NSO accepted
/// the request; for `/operations/...` calls the real outcome lives in the
/// body and is read with [`operation_output`](Self::operation_output).
#[derive(Debug, Clone)]
pub struct RestconfResponse {
    status: StatusCode,
    body: String,
}

impl RestconfResponse {
    pub fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body as arbitrary JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&self.body)),
            body: self.body.clone(),
        })
    }

    /// Decode the `tailf-ncs:output` block of an action response.
    pub fn operation_output(&self) -> Result<OperationOutput, Error> {
        let envelope: OperationEnvelope = decode("operation output", &self.body)?;
        Ok(envelope.output)
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one NSO instance's RESTCONF interface.
///
/// Holds only immutable connection data; every method issues exactly one
/// HTTP request and awaits it before returning.
#[derive(Debug)]
pub struct RestconfClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
}

impl RestconfClient {
    /// Build a client from connection parameters and a transport config.
    pub fn new(params: ConnectionParams, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, params))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, params: ConnectionParams) -> Self {
        Self {
            http,
            base_url: params.base_url(),
            username: params.username,
            password: params.password,
        }
    }

    /// The RESTCONF root, e.g. `http://127.0.0.1:8080/restconf`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/data/{path}`
    ///
    /// Names are spliced in as given, then parsed as a URL: spaces are
    /// percent-encoded and `.` / `..` segments are normalized away.
    pub(crate) fn data_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/data/{path}", self.base_url))?)
    }

    /// `{base}/operations/{path}`
    pub(crate) fn operations_url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/operations/{path}", self.base_url))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue one request and read the whole body.
    ///
    /// Never inspects the status: that's the caller's call.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<RestconfResponse, Error> {
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(CONTENT_TYPE, YANG_JSON)
            .header(ACCEPT, YANG_JSON);
        if let Some(bytes) = body {
            builder = builder.body(bytes);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        trace!(%status, bytes = text.len(), "response received");

        Ok(RestconfResponse::new(status, text))
    }

    pub(crate) async fn get(&self, url: Url) -> Result<RestconfResponse, Error> {
        self.send(Method::GET, url, None).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<RestconfResponse, Error> {
        self.send(Method::DELETE, url, None).await
    }

    /// POST without a body (RPCs / actions under `/operations`).
    pub(crate) async fn invoke(&self, url: Url) -> Result<RestconfResponse, Error> {
        self.send(Method::POST, url, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<RestconfResponse, Error> {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.send(Method::POST, url, Some(bytes)).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<RestconfResponse, Error> {
        let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.send(Method::PATCH, url, Some(bytes)).await
    }

    /// GET a data node and decode it.
    ///
    /// Returns `Ok(None)` when the node does not exist (404) or NSO answers
    /// with no content; any other non-2xx becomes [`Error::Status`].
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<Option<T>, Error> {
        let resp = self.get(url).await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            debug!(endpoint, %status, "data node absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: resp.body,
            });
        }
        if resp.body.trim().is_empty() {
            return Ok(None);
        }

        decode(endpoint, &resp.body).map(Some)
    }
}

// ── Decoding ─────────────────────────────────────────────────────────

/// Two-stage decode so "not JSON" and "JSON with the wrong shape" stay
/// distinguishable.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, Error> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(body)),
            body: body.to_owned(),
        })?;

    serde_json::from_value(value).map_err(|e| Error::UnexpectedSchema {
        endpoint,
        message: e.to_string(),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
