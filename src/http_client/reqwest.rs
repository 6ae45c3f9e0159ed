use crate::http_client::HttpClient;
use crate::{ClientConfig, Method, Request, Response, Result};
use reqwest::blocking::{Client, RequestBuilder};

pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::create(ClientConfig::default())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> ReqwestHttpClient
    where
        Self: Sized,
    {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.ssl_check)
            .build()
            .unwrap();

        ReqwestHttpClient {
            client,
            base_url: config.base_url,
        }
    }

    // Responses with 4xx/5xx statuses come back as Ok; only network-level
    // failures surface as Err.
    fn execute(&self, request: &Request) -> Result<Response> {
        let Request {
            method,
            path,
            headers,
            query,
            body,
        } = request;
        let url = join_url(&self.base_url, path);
        let mut request_builder = self.client.request(method.into(), url);
        request_builder = set_headers(headers, request_builder);
        if !query.is_empty() {
            request_builder = request_builder.query(query);
        }
        if let Some(body) = body {
            request_builder = request_builder.body(body.to_string());
        }
        let response = request_builder.send()?;

        Ok(Response {
            status_code: response.status().as_u16(),
            body: response.text()?,
        })
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{base}/{path}",
        base = base_url.trim_end_matches('/'),
        path = path.trim_start_matches('/')
    )
}

fn set_headers(
    headers: &[(String, String)],
    mut request_builder: RequestBuilder,
) -> RequestBuilder {
    for (key, value) in headers {
        request_builder = request_builder.header(key, value);
    }
    request_builder
}

impl From<&Method> for reqwest::Method {
    fn from(method: &Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}
