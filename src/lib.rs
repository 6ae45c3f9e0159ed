//! moip-assinaturas is a thin blocking HTTP client for the Moip Assinaturas
//! (subscriptions) REST API. It stores Basic-Auth credentials, selects the
//! sandbox or production host, dispatches GET/POST/PUT/DELETE calls and
//! extracts the provider's uniform `{code, description}` error structure from
//! JSON responses.
//!
//! The client never fails on an HTTP error status. Every verb method performs
//! a full round trip, records the response and returns the client itself, so
//! the intended flow is: call a verb method, check [`ApiClient::has_errors`],
//! then branch to [`ApiClient::results`] or [`ApiClient::errors`].
//!
//! ```no_run
//! use moip_assinaturas::{ApiClient, Environment, RequestOptions, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut client = ApiClient::new("my-token", "my-key", Environment::Sandbox)?;
//!
//!     let options = RequestOptions::new().body(json!({
//!         "code": "plan101",
//!         "amount": 990,
//!     }));
//!     if client.post("/assinaturas/v1/plans", options)?.has_errors() {
//!         for error in client.errors() {
//!             eprintln!("{}: {}", error.code, error.description);
//!         }
//!     } else {
//!         println!("{:?}", client.results());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Only transport failures (connection refused, timeouts) surface as `Err`.
//!
//! A client holds the last response as instance state, overwritten on each
//! call. Verb methods take `&mut self`, so one instance cannot be shared
//! between concurrent callers; construct one client per caller instead.

pub mod client;
pub mod http_client;
mod model;

pub use crate::client::{ApiClient, ApiError, ApiResponse, Credentials, RequestOptions};
pub use crate::model::{Environment, Method, Request, Response};

pub type Result<T> = anyhow::Result<T>;

/// Settings for building the underlying HTTP transport. The base URL is baked
/// into the transport once; relative request paths are joined onto it.
pub struct ClientConfig {
    pub base_url: String,
    pub ssl_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Environment::default().base_url(),
            ssl_check: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: String, ssl_check: bool) -> Self {
        Self {
            base_url,
            ssl_check,
        }
    }
}
