//! LuCI JSON-RPC wire types.
//!
//! LuCI speaks a JSON-RPC 1.0 dialect: requests carry `id`, `method`, and a
//! positional `params` array, and responses carry `id`, `result`, and `error`
//! with exactly one of the latter being non-null.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authentication endpoint, relative to the device root.
pub const AUTH_PATH: &str = "cgi-bin/luci/rpc/auth";

/// UCI configuration endpoint, relative to the device root.
pub const UCI_PATH: &str = "cgi-bin/luci/rpc/uci";

/// Query parameter carrying the session token on [`UCI_PATH`].
pub const AUTH_QUERY_PARAM: &str = "auth";

pub const LOGIN: &str = "login";
pub const GET_ALL: &str = "get_all";
pub const SECTION: &str = "section";
pub const TSET: &str = "tset";
pub const DELETE: &str = "delete";
pub const CHANGES: &str = "changes";
pub const COMMIT: &str = "commit";
pub const REVERT: &str = "revert";

/// JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a, P> {
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> Request<'a, P> {
    #[must_use]
    pub fn new(id: u64, method: &'a str, params: P) -> Self {
        Self { id, method, params }
    }
}

/// Error reported by the device.
///
/// LuCI normally sends a bare string; some handlers send a JSON-RPC 2.0 style
/// object instead. Both render as the device's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcError {
    Message(String),
    Object {
        #[serde(default)]
        code: Option<i64>,
        message: String,
    },
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::Message(message) => write!(f, "{message}"),
            RpcError::Object {
                code: Some(code),
                message,
            } => write!(f, "{message} ({code})"),
            RpcError::Object {
                code: None,
                message,
            } => write!(f, "{message}"),
        }
    }
}

/// JSON-RPC response envelope for UCI calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcError>,
}

/// Response to the `login` call: the session token on success.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub result: Option<String>,
}
