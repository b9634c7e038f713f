// ACOS v2.1 HTTP client
//
// Wraps `reqwest::Client` with ACOS URL construction, session bookkeeping
// and status checking. Resource endpoints (servers, service groups,
// virtual servers) and the login/logout pair live in their own files as
// inherent methods so this module stays focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint;
use crate::error::Error;
use crate::response;
use crate::transport::TransportConfig;

/// Method name of the login call.
pub(crate) const AUTHENTICATE: &str = "authenticate";

/// Wrap a reqwest failure, dropping the request URL so the session id
/// cannot surface through `Display`.
fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(e.without_url())
}

/// Behaviour switches for [`AcosClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Log mutating calls instead of sending them. Login, logout and
    /// reads still reach the device.
    pub dry_run: bool,
}

/// HTTP client for the ACOS v2.1 management API.
///
/// Holds at most one session. All session-bound methods fail with
/// [`Error::NoSession`] until [`login`](Self::login) succeeds.
pub struct AcosClient {
    http: reqwest::Client,
    base_url: Url,
    options: ClientOptions,
    session: RwLock<Option<SecretString>>,
}

impl AcosClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the device root, usually from
    /// [`endpoint::base_url`](crate::endpoint::base_url).
    pub fn new(
        base_url: Url,
        options: ClientOptions,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, options))
    }

    /// Create a client for a bare host name or address with default transport.
    pub fn for_host(host: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::new(endpoint::base_url(host)?, options, &TransportConfig::default())
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, options: ClientOptions) -> Self {
        Self {
            http,
            base_url,
            options,
            session: RwLock::new(None),
        }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn options(&self) -> ClientOptions {
        self.options
    }

    /// The current session id, if logged in.
    pub fn session_id(&self) -> Option<SecretString> {
        self.session.read().expect("session lock poisoned").clone()
    }

    pub(crate) fn set_session(&self, id: Option<SecretString>) {
        *self.session.write().expect("session lock poisoned") = id;
    }

    /// Session-bound URL for `method`, or `NoSession`.
    pub(crate) fn session_url(&self, method: &str) -> Result<Url, Error> {
        let guard = self.session.read().expect("session lock poisoned");
        let id = guard.as_ref().ok_or(Error::NoSession)?;
        endpoint::session_url(&self.base_url, method, id.expose_secret())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `url`, returning the body of a 200 response.
    pub(crate) async fn get_bytes(&self, method: &str, url: Url) -> Result<Vec<u8>, Error> {
        debug!(url = %endpoint::redacted(&url), "GET");
        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        Self::read_body(method, resp).await
    }

    /// POST `body` as JSON to `url`, returning the body of a 200 response.
    pub(crate) async fn post_bytes(
        &self,
        method: &str,
        url: Url,
        body: &impl Serialize,
    ) -> Result<Vec<u8>, Error> {
        debug!(url = %endpoint::redacted(&url), "POST");
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::read_body(method, resp).await
    }

    async fn read_body(method: &str, resp: reqwest::Response) -> Result<Vec<u8>, Error> {
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            debug!(method, %status, "bad status");
            return Err(Error::HttpStatus {
                method: method.to_owned(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await.map_err(transport_error)?;
        // The authenticate reply is the session credential itself.
        if method != AUTHENTICATE {
            trace!(method, body = %String::from_utf8_lossy(&bytes), "response body");
        }
        Ok(bytes.to_vec())
    }

    // ── Raw API access ───────────────────────────────────────────────

    /// Call any session-bound method with GET and return the raw body.
    pub async fn get_raw(&self, method: &str) -> Result<Vec<u8>, Error> {
        let url = self.session_url(method)?;
        self.get_bytes(method, url).await
    }

    /// Call any session-bound method with POST and return the raw body.
    ///
    /// In dry-run mode nothing is sent and the body is empty.
    pub async fn post_raw(&self, method: &str, body: &impl Serialize) -> Result<Vec<u8>, Error> {
        let url = self.session_url(method)?;
        if self.options.dry_run {
            let payload = serde_json::to_string(body).unwrap_or_default();
            debug!(method, %payload, "dry run, not sending");
            return Ok(Vec::new());
        }
        self.post_bytes(method, url, body).await
    }

    /// POST a mutation and require `{"response": {"status": "OK"}}`.
    ///
    /// Dry runs skip the status check since nothing was sent.
    pub(crate) async fn mutate(&self, method: &str, body: &impl Serialize) -> Result<(), Error> {
        if !self.options.dry_run {
            let payload = serde_json::to_string(body).unwrap_or_default();
            debug!(method, %payload, "mutation request");
        }
        let resp = self.post_raw(method, body).await?;
        if self.options.dry_run {
            return Ok(());
        }
        debug!(method, response = %String::from_utf8_lossy(&resp), "mutation response");
        response::check_status(method, &resp)
    }
}
