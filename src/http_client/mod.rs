use crate::{ClientConfig, Request, Response, Result};


pub mod reqwest;

/// Transport seam. The base URL lives in the [`ClientConfig`] handed to
/// `create`; `execute` joins it with the request's relative path.
pub trait HttpClient {
    fn create(config: ClientConfig) -> Self
    where
        Self: Sized;

    fn execute(&self, request: &Request) -> Result<Response>;
}
