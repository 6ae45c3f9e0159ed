use std::collections::BTreeMap;

use anyhow::ensure;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::{ClientConfig, Environment, Method, Request, Response, Result};


const API_VERSION: &str = "assinaturas/v1";

const UNEXPECTED_ERROR_CODE: &str = "MXX";
const UNEXPECTED_ERROR_DESCRIPTION: &str = "Unexpected error";

/// API token/key pair used for Basic Auth.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Credentials {
    token: String,
    key: String,
}

impl Credentials {
    pub fn new(token: &str, key: &str) -> Result<Credentials> {
        ensure!(!token.is_empty(), "API token must not be empty");
        ensure!(!key.is_empty(), "API key must not be empty");

        Ok(Credentials {
            token: token.to_string(),
            key: key.to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// `Authorization` header value: `Basic base64(token:key)`.
    pub fn basic_auth(&self) -> String {
        format!(
            "Basic {}",
            base64::encode(format!("{}:{}", self.token, self.key))
        )
    }
}

/// One failure reported by the provider, or synthesized locally.
///
/// Decoding is lenient: entries missing `code` or `description` come back
/// with empty strings rather than failing the whole list.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ApiError {
    pub fn new(code: &str, description: &str) -> ApiError {
        ApiError {
            code: code.to_string(),
            description: description.to_string(),
        }
    }

    fn unexpected() -> ApiError {
        ApiError::new(UNEXPECTED_ERROR_CODE, UNEXPECTED_ERROR_DESCRIPTION)
    }
}

/// The most recent status code and raw body, overwritten on each call.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ApiResponse {
    pub http_code: u16,
    pub content: String,
}

/// Per-call overrides merged over the client's base configuration. Per-call
/// headers win on key collision; query and body only exist per call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> RequestOptions {
        RequestOptions::default()
    }

    pub fn header(mut self, name: &str, value: &str) -> RequestOptions {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn query(mut self, name: &str, value: &str) -> RequestOptions {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> RequestOptions {
        self.body = Some(body);
        self
    }
}

/// Blocking client for the Assinaturas REST API.
///
/// The transport is built once at construction, with the environment's base
/// URL and the Basic-Auth header baked in. Each verb method performs a full
/// round trip, records the response over the previous one and returns the
/// client itself for chaining.
pub struct ApiClient<C: HttpClient = ReqwestHttpClient> {
    credentials: Credentials,
    environment: Environment,
    api_url: String,
    base_options: RequestOptions,
    client: C,
    response: Option<ApiResponse>,
    errors: Vec<ApiError>,
}

impl ApiClient<ReqwestHttpClient> {
    /// Builds a client for the given environment. Fails when the token or
    /// key is empty.
    pub fn new(token: &str, key: &str, environment: Environment) -> Result<ApiClient> {
        let credentials = Credentials::new(token, key)?;
        let client = ReqwestHttpClient::create(ClientConfig::new(environment.base_url(), true));

        Ok(ApiClient::build(credentials, environment, client))
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Same as [`ApiClient::new`] with an injected transport.
    pub fn with_client(
        token: &str,
        key: &str,
        environment: Environment,
        client: C,
    ) -> Result<ApiClient<C>> {
        let credentials = Credentials::new(token, key)?;

        Ok(ApiClient::build(credentials, environment, client))
    }

    fn build(credentials: Credentials, environment: Environment, client: C) -> ApiClient<C> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), credentials.basic_auth());

        ApiClient {
            credentials,
            environment,
            api_url: environment.base_url(),
            base_options: RequestOptions {
                headers,
                ..RequestOptions::default()
            },
            client,
            response: None,
            errors: Vec::new(),
        }
    }

    /// Replaces the stored credentials.
    ///
    /// Configure-before-build contract: the `Authorization` header baked into
    /// the base configuration at construction is not recomputed, so this only
    /// affects what [`ApiClient::credentials`] reports. Construct a new client
    /// to authenticate with different credentials.
    pub fn set_credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = credentials;
        self
    }

    /// Replaces the stored environment.
    ///
    /// Same configure-before-build contract as [`ApiClient::set_credentials`]:
    /// the transport keeps the base URL it was built with.
    pub fn set_environment(&mut self, environment: Environment) -> &mut Self {
        self.environment = environment;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    /// Base URL the transport was built with.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The last recorded response, `None` before the first call.
    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    fn request(&mut self, method: Method, path: &str, options: RequestOptions) -> Result<()> {
        let options = self.options(&options);
        let request = Request {
            method,
            path: path.to_string(),
            headers: options.headers.into_iter().collect(),
            query: options.query,
            body: options.body,
        };
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let Response { status_code, body } = self.client.execute(&request)?;
        debug!(status = status_code, "response recorded");

        self.response = Some(ApiResponse {
            http_code: status_code,
            content: body,
        });

        Ok(())
    }

    pub fn get(&mut self, path: &str, options: RequestOptions) -> Result<&mut Self> {
        self.request(Method::Get, path, options)?;
        Ok(self)
    }

    pub fn post(&mut self, path: &str, options: RequestOptions) -> Result<&mut Self> {
        self.request(Method::Post, path, options)?;
        Ok(self)
    }

    pub fn put(&mut self, path: &str, options: RequestOptions) -> Result<&mut Self> {
        self.request(Method::Put, path, options)?;
        Ok(self)
    }

    pub fn delete(&mut self, path: &str, options: RequestOptions) -> Result<&mut Self> {
        self.request(Method::Delete, path, options)?;
        Ok(self)
    }

    /// The base configuration shallow-merged with the given per-call options.
    pub fn options(&self, options: &RequestOptions) -> RequestOptions {
        let mut merged = self.base_options.clone();
        for (name, value) in &options.headers {
            merged.headers.insert(name.clone(), value.clone());
        }
        merged.query = options.query.clone();
        merged.body = options.body.clone();
        merged
    }

    /// Decoded JSON body of the last response. `None` on a malformed body or
    /// before any request; no distinct parse-error signal is raised.
    pub fn results(&self) -> Option<Value> {
        self.response
            .as_ref()
            .and_then(|response| serde_json::from_str(&response.content).ok())
    }

    /// True iff the last recorded status code is >= 400. Pure function of the
    /// status; the body is never inspected.
    pub fn has_errors(&self) -> bool {
        self.response
            .as_ref()
            .map_or(false, |response| response.http_code >= 400)
    }

    /// Recomputes the error list from the last response and returns it.
    ///
    /// A recorded body without an `errors` field yields the synthetic
    /// `MXX / Unexpected error` entry even when the call succeeded, so gate on
    /// [`ApiClient::has_errors`] before trusting this list.
    pub fn errors(&mut self) -> &[ApiError] {
        self.find_errors();
        &self.errors
    }

    /// Appends one entry without making a network call. Entries injected
    /// before the first request survive [`ApiClient::errors`]; once a
    /// response exists the list is recomputed from it instead.
    pub fn set_error(&mut self, code: &str, description: &str) -> &mut Self {
        self.errors.push(ApiError::new(code, description));
        self
    }

    fn find_errors(&mut self) {
        let response = match &self.response {
            Some(response) => response,
            None => return,
        };
        self.errors.clear();

        let body: Option<Value> = serde_json::from_str(&response.content).ok();
        if let Some(errors) = body.as_ref().and_then(|body| body.get("errors")) {
            // Taken as reported, empty list included. A shape that does not
            // decode as error entries yields an empty list.
            self.errors = serde_json::from_value(errors.clone()).unwrap_or_default();
            return;
        }

        self.errors.push(ApiError::unexpected());
    }
}
