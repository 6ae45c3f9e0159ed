use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use serde_json::Value;

const API_URL_TEMPLATE: &str = "https://{environment}.moip.com.br";

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let method = match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(method)
    }
}

/// Deployment target selecting the API host.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    /// Base URL for this environment, the host template with the environment
    /// name substituted once.
    pub fn base_url(&self) -> String {
        API_URL_TEMPLATE.replace("{environment}", self.as_str())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(anyhow::anyhow!("unknown environment: {}", other)),
        }
    }
}
