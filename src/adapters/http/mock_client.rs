//! Offline sentiment service for demos and development.
//!
//! Returns canned sessions and results after a simulated network delay.

use crate::domain::validation::format_date;
use crate::domain::{
    AggregatedSentiment, DomainError, QueryParams, QueryResult, RegistrationResult, TweetResult,
};
use crate::ports::SentimentServicePort;
use chrono::Utc;
use std::time::Duration;
use tracing::info;

const TOKEN_PREFIX: &str = "mock-token-";
/// One day, as the real service hands out.
const SESSION_DURATION_MS: i64 = 86_400_000;

pub struct MockSentimentClient {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockSentimentClient {
    /// Create a new mock client with default delay (400ms).
    pub fn new() -> Self {
        Self { delay_ms: 400 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockSentimentClient {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_tweet(id: u64, created_at: i64, text: &str, sentiment: &str) -> TweetResult {
    TweetResult {
        text: text.to_string(),
        sentiment: sentiment.to_string(),
        id: Some(id),
        created_at: Some(created_at),
        retweet_count: Some(id % 5),
        favorite_count: Some(id % 7),
    }
}

#[async_trait::async_trait]
impl SentimentServicePort for MockSentimentClient {
    async fn register(&self, username: &str) -> Result<RegistrationResult, DomainError> {
        info!(%username, "[MOCK] Simulating registration");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(RegistrationResult {
            username: username.to_string(),
            token: format!("{}{}", TOKEN_PREFIX, username.trim_start_matches('@')),
            expires: Some(Utc::now().timestamp_millis() + SESSION_DURATION_MS),
        })
    }

    async fn query(&self, params: &QueryParams) -> Result<QueryResult, DomainError> {
        info!(
            from = %format_date(params.from),
            to = %format_date(params.to),
            model = %params.classifier_model,
            "[MOCK] Simulating sentiment query"
        );
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if !params.token.starts_with(TOKEN_PREFIX) {
            return Err(DomainError::Transport {
                status: 401,
                message: "Invalid user token -- please register first".to_string(),
            });
        }

        let start = params
            .from
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        let tweets = vec![
            sample_tweet(1, start, "[MOCK] Great day at the conference!", "positive"),
            sample_tweet(2, start + 3_600_000, "[MOCK] Train delayed again...", "negative"),
            sample_tweet(3, start + 7_200_000, "[MOCK] Reading the docs.", "neutral"),
            sample_tweet(4, start + 10_800_000, "[MOCK] Loving the new release", "positive"),
        ];

        Ok(QueryResult {
            aggregated_sentiment: AggregatedSentiment::new(vec![
                ("positive".to_string(), 0.5),
                ("negative".to_string(), 0.25),
                ("neutral".to_string(), 0.25),
            ]),
            tweets,
        })
    }
}
