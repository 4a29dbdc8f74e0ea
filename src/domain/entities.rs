//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here; adapters map wire payloads into these.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Session handed out by the service after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationResult {
    pub username: String,
    pub token: String,
    /// Session expiry in epoch milliseconds, when the service reports one.
    #[serde(default)]
    pub expires: Option<i64>,
}

impl RegistrationResult {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires.and_then(DateTime::from_timestamp_millis)
    }
}

/// Result of a sentiment query: per-label aggregate plus the classified tweets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResult {
    pub aggregated_sentiment: AggregatedSentiment,
    #[serde(default)]
    pub tweets: Vec<TweetResult>,
}

/// Sentiment label -> score, in the order the service sent the keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSentiment(Vec<(String, f64)>);

impl AggregatedSentiment {
    pub fn new(pairs: Vec<(String, f64)>) -> Self {
        Self(pairs)
    }

    pub fn pairs(&self) -> &[(String, f64)] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, v)| v).sum()
    }
}

impl<'de> Deserialize<'de> for AggregatedSentiment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = AggregatedSentiment;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of sentiment label to number")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(3));
                while let Some((label, value)) = map.next_entry::<String, f64>()? {
                    pairs.push((label, value));
                }
                Ok(AggregatedSentiment(pairs))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// A single classified tweet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TweetResult {
    pub text: String,
    /// Raw label as sent by the service. Not trusted for presentation.
    pub sentiment: String,
    pub id: Option<u64>,
    /// Creation time in epoch milliseconds.
    pub created_at: Option<i64>,
    pub retweet_count: Option<u64>,
    pub favorite_count: Option<u64>,
}

/// Visual category of a result card. Derived from a label through an allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
    Other,
}

impl SentimentCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "neutral" => Self::Neutral,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Other => "other",
        }
    }
}

/// Server-side classifier selection. Opaque to the client; forwarded by wire name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ClassifierModel {
    #[default]
    #[serde(rename = "SVM")]
    Svm,
    #[serde(rename = "Bayes")]
    Bayes,
    #[serde(rename = "kNN")]
    Knn,
}

impl ClassifierModel {
    pub const ALL: [ClassifierModel; 3] = [Self::Svm, Self::Bayes, Self::Knn];

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Svm => "SVM",
            Self::Bayes => "Bayes",
            Self::Knn => "kNN",
        }
    }
}

impl fmt::Display for ClassifierModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for ClassifierModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_param().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown classifier model '{}'", s))
    }
}

/// Server-side training data selection (Sentiment140 sample sizes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TrainingConfig {
    #[serde(rename = "Sentiment140_10k")]
    Sample10k,
    #[serde(rename = "Sentiment140_20k")]
    Sample20k,
    #[default]
    #[serde(rename = "Sentiment140_100k")]
    Sample100k,
    #[serde(rename = "Sentiment140_200k")]
    Sample200k,
}

impl TrainingConfig {
    pub const ALL: [TrainingConfig; 4] = [
        Self::Sample10k,
        Self::Sample20k,
        Self::Sample100k,
        Self::Sample200k,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Sample10k => "Sentiment140_10k",
            Self::Sample20k => "Sentiment140_20k",
            Self::Sample100k => "Sentiment140_100k",
            Self::Sample200k => "Sentiment140_200k",
        }
    }
}

impl fmt::Display for TrainingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for TrainingConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_param().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown training config '{}'", s))
    }
}

/// Validated query parameters, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub token: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub classifier_model: ClassifierModel,
    pub training_config: TrainingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregated_sentiment_keeps_key_order() {
        let json = r#"{"positive": 3, "negative": 1, "neutral": 0.5}"#;
        let agg: AggregatedSentiment = serde_json::from_str(json).unwrap();
        assert_eq!(
            agg.pairs(),
            &[
                ("positive".to_string(), 3.0),
                ("negative".to_string(), 1.0),
                ("neutral".to_string(), 0.5),
            ]
        );
        assert_eq!(agg.total(), 4.5);
    }

    #[test]
    fn test_query_result_from_service_payload() {
        let json = r#"{
            "aggregated_sentiment": {"positive": 0.75, "negative": 0.25},
            "tweets": [
                {"id": 42, "created_at": 1417392000000, "text": "great day",
                 "retweet_count": 2, "favorite_count": 7, "sentiment": "positive"},
                {"text": "meh", "sentiment": "negative"}
            ]
        }"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.tweets.len(), 2);
        assert_eq!(result.tweets[0].id, Some(42));
        assert_eq!(result.tweets[1].created_at, None);
        assert_eq!(result.aggregated_sentiment.pairs()[0].0, "positive");
    }

    #[test]
    fn test_registration_expiry() {
        let reg = RegistrationResult {
            username: "@alice".into(),
            token: "abc".into(),
            expires: Some(1_417_392_000_000),
        };
        let at = reg.expires_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d").to_string(), "2014-12-01");
    }

    #[test]
    fn test_sentiment_category_allow_list() {
        assert_eq!(
            SentimentCategory::from_label("Positive"),
            SentimentCategory::Positive
        );
        assert_eq!(
            SentimentCategory::from_label("neutral"),
            SentimentCategory::Neutral
        );
        assert_eq!(
            SentimentCategory::from_label("positive\" onclick=\"x"),
            SentimentCategory::Other
        );
    }

    #[test]
    fn test_model_params_parse() {
        assert_eq!("knn".parse::<ClassifierModel>(), Ok(ClassifierModel::Knn));
        assert_eq!(
            "Sentiment140_20k".parse::<TrainingConfig>(),
            Ok(TrainingConfig::Sample20k)
        );
        assert!("forest".parse::<ClassifierModel>().is_err());
        assert_eq!(TrainingConfig::default().as_param(), "Sentiment140_100k");
    }
}
