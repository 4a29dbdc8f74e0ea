//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, QueryParams, QueryResult, RegistrationResult};

/// Remote sentiment analysis service.
///
/// One call, one result: success carries the decoded payload, failure carries
/// the HTTP status and body (`DomainError::Transport`) or a transport-level error.
#[async_trait::async_trait]
pub trait SentimentServicePort: Send + Sync {
    /// Register `username` (already validated by the caller) and open a session.
    async fn register(&self, username: &str) -> Result<RegistrationResult, DomainError>;

    /// Fetch and classify the user's tweets in the given date range.
    async fn query(&self, params: &QueryParams) -> Result<QueryResult, DomainError>;
}
