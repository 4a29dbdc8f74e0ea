//! Application configuration. Service endpoint, form defaults, paths.

use crate::domain::{ClassifierModel, TrainingConfig};
use serde::Deserialize;

/// Endpoint of a locally running sentiment service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9000/twitter_sentiment_service";

pub const DEFAULT_REPORTS_DIR: &str = "./reports";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the sentiment service. Read from SENTIMENT_ENDPOINT.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Optional per-request timeout in seconds. Unset = transport default.
    /// Read from SENTIMENT_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Preselected classifier model (SVM, Bayes, kNN). Read from SENTIMENT_CLASSIFIER_MODEL.
    #[serde(default)]
    pub classifier_model: Option<String>,

    /// Preselected training config (e.g. Sentiment140_100k). Read from SENTIMENT_TRAINING_CONFIG.
    #[serde(default)]
    pub training_config: Option<String>,

    /// Use the offline mock service instead of HTTP. Read from SENTIMENT_MOCK.
    #[serde(default)]
    pub mock: Option<bool>,

    /// Directory for exported Markdown reports. Read from SENTIMENT_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SENTIMENT"));
        if let Ok(path) = std::env::var("SENTIMENT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn endpoint_or_default(&self) -> String {
        self.endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(std::time::Duration::from_secs)
    }

    /// Returns the configured classifier model. Defaults to SVM if unset or invalid.
    pub fn classifier_model_or_default(&self) -> ClassifierModel {
        self.classifier_model
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Returns the configured training config. Defaults to Sentiment140_100k if unset or invalid.
    pub fn training_config_or_default(&self) -> TrainingConfig {
        self.training_config
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORTS_DIR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.endpoint_or_default(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.classifier_model_or_default(), ClassifierModel::Svm);
        assert_eq!(cfg.training_config_or_default(), TrainingConfig::Sample100k);
        assert!(!cfg.is_mock());
        assert_eq!(cfg.reports_dir_or_default(), "./reports");
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            endpoint: Some("http://sentiment.example/api".into()),
            request_timeout_secs: Some(30),
            classifier_model: Some("kNN".into()),
            training_config: Some("nonsense".into()),
            mock: Some(true),
            reports_dir: None,
        };
        assert_eq!(cfg.endpoint_or_default(), "http://sentiment.example/api");
        assert_eq!(cfg.request_timeout(), Some(std::time::Duration::from_secs(30)));
        assert_eq!(cfg.classifier_model_or_default(), ClassifierModel::Knn);
        assert_eq!(cfg.training_config_or_default(), TrainingConfig::Sample100k);
        assert!(cfg.is_mock());
    }

    #[test]
    fn test_from_config_source() {
        let cfg: AppConfig = config::Config::builder()
            .set_override("endpoint", "http://127.0.0.1:9000/svc")
            .unwrap()
            .set_override("mock", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.endpoint_or_default(), "http://127.0.0.1:9000/svc");
        assert!(cfg.is_mock());
    }
}
