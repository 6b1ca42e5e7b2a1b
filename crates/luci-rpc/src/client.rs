//! Authenticated client for the LuCI UCI API.
//!
//! A [`Client`] is produced by logging in once. It holds nothing but the UCI
//! endpoint URL (token included) and a pooled HTTP client, so it can be cloned
//! and shared across tasks freely. When the session expires, build a new one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use luci_types::Options;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use crate::changes::{Change, parse_changes};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::protocol::{
    CHANGES, COMMIT, DELETE, GET_ALL, LOGIN, LoginResponse, REVERT, Request, Response, SECTION,
    TSET,
};

const USER_AGENT: &str = concat!("luci-rpc/", env!("CARGO_PKG_VERSION"));

/// Session-bound client for UCI section operations.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    uci_url: Url,
    next_id: Arc<AtomicU64>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.uci_url.host_str())
            .field("path", &self.uci_url.path())
            .finish_non_exhaustive()
    }
}

fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(config.accept_invalid_certs);

    if config.timeout_ms > 0 {
        builder = builder.timeout(config.timeout());
    }

    Ok(builder.build()?)
}

/// POST `body` to `url` and decode the JSON reply into `T`.
///
/// Bodies are not logged here; login replies carry the session token.
async fn post_json<B, T>(http: &reqwest::Client, url: &Url, body: &B, context: &str) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http.post(url.clone()).json(body).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ClientError::UnexpectedStatus { status });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(context, e))
}

impl Client {
    /// Log in with the credentials in `config`.
    ///
    /// # Errors
    ///
    /// Fails if the URL is invalid, the HTTP exchange fails or returns a
    /// status other than 200, the reply cannot be decoded, the device rejects
    /// the login, or the reply carries no token.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let http = build_http_client(config)?;
        Self::connect_with(http, config).await
    }

    /// Log in using `scheme://hostname[:port]` with default settings otherwise.
    ///
    /// A `port` of `0` leaves the port out of the URL.
    ///
    /// # Errors
    ///
    /// See [`Client::connect`].
    pub async fn new(
        scheme: &str,
        hostname: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Self::connect(&ClientConfig::new(scheme, hostname, port, username, password)).await
    }

    /// Log in reusing an existing HTTP client.
    ///
    /// Timeout and certificate settings in `config` are ignored; they belong to
    /// the HTTP client.
    ///
    /// # Errors
    ///
    /// See [`Client::connect`].
    pub async fn connect_with(http: reqwest::Client, config: &ClientConfig) -> Result<Self> {
        let auth_url = config.auth_url()?;
        let request = Request::new(1, LOGIN, (&config.username, &config.password));

        debug!(host = %config.host(), user = %config.username, "logging in");
        let response: LoginResponse =
            post_json(&http, &auth_url, &request, "unable to process login response").await?;

        if let Some(error) = response.error {
            return Err(ClientError::Login(error.to_string()));
        }

        let token = response
            .result
            .ok_or_else(|| ClientError::InvalidResponse("login returned no token".to_string()))?;

        let uci_url = config.uci_url(&token)?;
        info!(host = %config.host(), "logged in");

        Ok(Self {
            http,
            uci_url,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// The UCI endpoint this client talks to, session token included.
    #[must_use]
    pub fn uci_url(&self) -> &Url {
        &self.uci_url
    }

    /// Invoke `method` and return its raw `result`.
    async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request::new(id, method, params);

        debug!(id, method, "calling uci");
        let context = format!("unable to process {method} response");
        let response: Response = post_json(&self.http, &self.uci_url, &request, &context).await?;

        trace!(id, method, result = %response.result, "response");

        if let Some(error) = response.error {
            return Err(ClientError::rpc(method, error.to_string()));
        }

        Ok(response.result)
    }

    /// Invoke a method whose result signals success.
    ///
    /// `section` answers with the new section name, the rest with booleans.
    async fn call_bool<P: Serialize>(&self, method: &str, params: P) -> Result<bool> {
        match self.call(method, params).await? {
            Value::Bool(ok) => Ok(ok),
            Value::Null => Ok(false),
            Value::String(s) => Ok(!s.is_empty()),
            other => Err(ClientError::InvalidResponse(format!(
                "{method} returned {other}, expected a boolean"
            ))),
        }
    }

    /// Run a staging call and commit `config` if it succeeded.
    async fn apply<P: Serialize>(&self, config: &str, method: &str, params: P) -> Result<bool> {
        if !self.call_bool(method, params).await? {
            warn!(config, method, "device rejected change");
            return Ok(false);
        }

        self.commit(config).await
    }

    /// Fetch every option of `config.section`, metadata keys included.
    ///
    /// # Errors
    ///
    /// [`ClientError::SectionNotFound`] if the device has no such config or
    /// section; otherwise any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_section(&self, config: &str, section: &str) -> Result<Options> {
        let result = self.call(GET_ALL, [config, section]).await?;

        if matches!(result, Value::Null | Value::Bool(false)) {
            return Err(ClientError::SectionNotFound {
                config: config.to_string(),
                section: section.to_string(),
            });
        }

        serde_json::from_value(result)
            .map_err(|e| ClientError::decode(format!("unable to decode {config}.{section}"), e))
    }

    /// Create the named section `config.name` of type `section_type` and commit.
    ///
    /// Returns `false` when the device refuses, for example because the
    /// section already exists.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self, name, options), fields(section = name))]
    pub async fn create_section(
        &self,
        config: &str,
        section_type: &str,
        name: &str,
        options: &Options,
    ) -> Result<bool> {
        self.apply(config, SECTION, (config, section_type, name, options))
            .await
    }

    /// Set `options` on the existing section `config.name` and commit.
    ///
    /// Options not named in `options` are left as they are.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self, name, options), fields(section = name))]
    pub async fn update_section(&self, config: &str, name: &str, options: &Options) -> Result<bool> {
        self.apply(config, TSET, (config, name, options)).await
    }

    /// Remove the section `config.name` and commit.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self, name), fields(section = name))]
    pub async fn delete_section(&self, config: &str, name: &str) -> Result<bool> {
        self.apply(config, DELETE, [config, name]).await
    }

    /// List the staged, uncommitted changes to `config`.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error, or
    /// [`ClientError::InvalidResponse`] for an unrecognised change list.
    #[instrument(level = "debug", skip(self))]
    pub async fn show_changes(&self, config: &str) -> Result<Vec<Change>> {
        let result = self.call(CHANGES, [config]).await?;
        parse_changes(config, &result).map_err(ClientError::InvalidResponse)
    }

    /// Commit the staged changes to `config`.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self))]
    pub async fn commit(&self, config: &str) -> Result<bool> {
        let committed = self.call_bool(COMMIT, [config]).await?;
        if !committed {
            warn!(config, "commit failed");
        }
        Ok(committed)
    }

    /// Discard the staged changes to `config`.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, or device error.
    #[instrument(level = "debug", skip(self))]
    pub async fn revert(&self, config: &str) -> Result<bool> {
        self.call_bool(REVERT, [config]).await
    }
}
