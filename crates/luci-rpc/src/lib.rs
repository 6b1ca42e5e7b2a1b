//! Client for the LuCI JSON-RPC configuration API of OpenWrt devices.
//!
//! # Architecture
//!
//! - [`client`]: login handshake and UCI section operations
//! - [`config`]: connection settings and endpoint URLs
//! - [`protocol`]: JSON-RPC envelopes and method names
//! - [`changes`]: decoding of staged, uncommitted changes
//! - [`error`]: error type and `Result` alias
//!
//! Option values and section maps come from `luci-types` and are re-exported
//! here.
//!
//! # Example
//!
//! ```no_run
//! use luci_rpc::{Client, ClientConfig, Options, UciOption};
//!
//! # async fn example() -> Result<(), luci_rpc::ClientError> {
//! let config = ClientConfig::new("http", "192.168.1.1", 0, "root", "secret");
//! let client = Client::connect(&config).await?;
//!
//! let options = Options::new()
//!     .with("proto", "static")
//!     .with("mtu", 1500)
//!     .with("dns", UciOption::list_string(["1.1.1.1", "9.9.9.9"]));
//! client.create_section("network", "interface", "testing", &options).await?;
//!
//! let section = client.get_section("network", "testing").await?;
//! assert_eq!(section.get_integer("mtu").unwrap(), 1500);
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

#[cfg(test)]
mod tests;

pub use changes::{Change, ChangeOperation};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use protocol::RpcError;

pub use luci_types::*;
