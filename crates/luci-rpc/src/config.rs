//! Connection settings for a LuCI device.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::protocol::{AUTH_PATH, AUTH_QUERY_PARAM, UCI_PATH};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const KNOWN_FIELDS: [&str; 7] = [
    "scheme",
    "hostname",
    "port",
    "username",
    "password",
    "timeoutMs",
    "acceptInvalidCerts",
];

/// Where and how to reach the device.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub scheme: String,
    pub hostname: String,
    /// `0` leaves the port out of the URL.
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Per-request timeout in milliseconds, `0` for none.
    pub timeout_ms: u64,
    /// Accept self-signed certificates, common on devices served over https.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            hostname: "192.168.1.1".to_string(),
            port: 0,
            username: "root".to_string(),
            password: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            accept_invalid_certs: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(
        scheme: impl Into<String>,
        hostname: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            hostname: hostname.into(),
            port,
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout. Sub-millisecond durations round up to 1ms so a
    /// non-zero deadline is never dropped.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = if millis == 0 && !timeout.is_zero() {
            1
        } else {
            millis
        };
        self
    }

    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `hostname` or `hostname:port`, bracketing bare IPv6 addresses.
    #[must_use]
    pub fn host(&self) -> String {
        let hostname = if self.hostname.contains(':') && !self.hostname.starts_with('[') {
            format!("[{}]", self.hostname)
        } else {
            self.hostname.clone()
        };

        if self.port == 0 {
            hostname
        } else {
            format!("{hostname}:{}", self.port)
        }
    }

    fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}://{}/", self.scheme, self.host()))
    }

    /// URL of the `login` endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if scheme and host do not form a valid URL.
    pub fn auth_url(&self) -> Result<Url, url::ParseError> {
        self.base_url()?.join(AUTH_PATH)
    }

    /// URL of the UCI endpoint with `token` attached.
    ///
    /// # Errors
    ///
    /// Returns an error if scheme and host do not form a valid URL.
    pub fn uci_url(&self, token: &str) -> Result<Url, url::ParseError> {
        let mut url = self.base_url()?.join(UCI_PATH)?;
        url.query_pairs_mut().append_pair(AUTH_QUERY_PARAM, token);
        Ok(url)
    }

    /// Parse a JSON config document, warning about fields that are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or a field has the
    /// wrong type.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        for field in unknown_fields(&value) {
            warn!("Unknown client config field: {field}");
        }
        serde_json::from_value(value)
    }
}

fn unknown_fields(value: &Value) -> Vec<String> {
    let Value::Object(obj) = value else {
        return Vec::new();
    };

    obj.keys()
        .filter(|key| !KNOWN_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect()
}
