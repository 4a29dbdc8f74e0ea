//! Core domain layer. No external I/O dependencies.
//!
//! Entities, form vocabulary and validation rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod form;
pub mod validation;
pub mod view_model;

pub use entities::{
    AggregatedSentiment, ClassifierModel, QueryParams, QueryResult, RegistrationResult,
    SentimentCategory, TrainingConfig, TweetResult,
};
pub use errors::{DomainError, ValidationError, ValidationKind};
pub use form::{Alert, AlertKind, FormField, FormState, QueryForm, Workflow};
pub use view_model::{ChartSeries, ChartSlice, ResultCard};
