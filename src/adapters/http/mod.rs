//! Sentiment service adapters. Implement SentimentServicePort.
//!
//! Provides the reqwest client and an offline mock for development.

pub mod client;
pub mod mock_client;

pub use client::HttpSentimentClient;
pub use mock_client::MockSentimentClient;
