//! Thin request/response wrapper over the ops REST API.
//!
//! No business logic lives here: callers get typed JSON or a
//! [`TransportError`]. Non-2xx responses carry the server's body text so the
//! command paths can surface it to the operator unmodified.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx response. The display form is the body text verbatim.
    #[error("{body}")]
    Status { status: u16, body: String },
    /// Connection, DNS, or timeout failure before a response arrived.
    #[error("request failed: {0}")]
    Request(String),
    /// The response was 2xx but its body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Shared HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with query pairs. Pairs with empty values are skipped, the
    /// same way the console omits blank filter inputs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;
        Self::read_json(response).await
    }

    /// POST a JSON body to `path`.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|error| TransportError::Decode(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    use super::{ApiClient, TransportError};

    #[tokio::test]
    async fn get_json_skips_empty_query_values() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/jobs")
                .query_param("page", "1")
                .query_param_missing("status");
            then.status(200).json_body(json!({ "ok": true }));
        });

        let client = ApiClient::new(server.base_url());
        let _: serde_json::Value = client
            .get_json(
                "/jobs",
                &[
                    ("page".to_string(), "1".to_string()),
                    ("status".to_string(), String::new()),
                ],
            )
            .await
            .expect("request should succeed");

        mock.assert();
    }

    #[tokio::test]
    async fn non_2xx_surfaces_body_text_verbatim() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/jobs/missing");
            then.status(404).body("Job not found");
        });

        let client = ApiClient::new(server.base_url());
        let result: Result<serde_json::Value, _> = client.get_json("/jobs/missing", &[]).await;

        match result {
            Err(TransportError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "Job not found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/jobs");
            then.status(200).body("not json");
        });

        let client = ApiClient::new(server.base_url());
        let result: Result<serde_json::Value, _> = client.get_json("/jobs", &[]).await;
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }
}
