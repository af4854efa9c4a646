use crate::core::error::SwaboxError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;

/// Thin POST-only client shared by the provider implementations.
///
/// The only per-backend differences it carries are the base URL, the
/// authentication header and any fixed extra headers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    auth_header: Option<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(
        endpoint: String,
        auth_header: Option<(String, String)>,
        extra_headers: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth_header,
            extra_headers: extra_headers.unwrap_or_default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs `payload` as JSON to `{endpoint}/{path}`.
    ///
    /// Non-2xx responses are turned into `SwaboxError::Api` carrying the
    /// status code and the response body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, SwaboxError> {
        let url = format!("{}/{}", self.endpoint, path);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some((name, value)) = &self.auth_header {
            request = request.header(name, value);
        }
        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request.json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwaboxError::Api(format!(
                "API call failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(response)
    }
}
