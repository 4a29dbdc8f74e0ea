//! reqwest adapter for the sentiment REST service.
//!
//! Implements `SentimentServicePort`: `POST {endpoint}/register` and
//! `GET {endpoint}/query`. No retries; non-success bodies are passed through verbatim.

use crate::domain::validation::format_date;
use crate::domain::{DomainError, QueryParams, QueryResult, RegistrationResult};
use crate::ports::SentimentServicePort;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct HttpSentimentClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSentimentClient {
    /// Create a client for the service rooted at `endpoint`
    /// (e.g. "http://localhost:9000/twitter_sentiment_service").
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Like `new`, with an overall per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    /// Map status and body into a domain result.
    async fn read_json<T: DeserializeOwned>(
        operation: &str,
        response: reqwest::Response,
    ) -> Result<T, DomainError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(operation, status = %status, body = %body, "service returned error");
            return Err(DomainError::Transport {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(operation, body_len = body.len(), "received service response");
        serde_json::from_str(&body).map_err(|e| {
            warn!(operation, error = %e, "response JSON parse failed");
            DomainError::Decode(format!("{} response: {}", operation, e))
        })
    }
}

#[async_trait::async_trait]
impl SentimentServicePort for HttpSentimentClient {
    async fn register(&self, username: &str) -> Result<RegistrationResult, DomainError> {
        let url = self.url("register");
        info!(url = %url, "POST register");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(username.to_string())
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("HTTP request failed: {}", e)))?;

        Self::read_json("register", response).await
    }

    async fn query(&self, params: &QueryParams) -> Result<QueryResult, DomainError> {
        let url = self.url("query");
        let from = format_date(params.from);
        let to = format_date(params.to);
        info!(url = %url, %from, %to, "GET query");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("token", params.token.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("classifierModel", params.classifier_model.as_param()),
                ("trainingConfig", params.training_config.as_param()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Network(format!("HTTP request failed: {}", e)))?;

        Self::read_json("query", response).await
    }
}
