//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive front-end driving the form workflows.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the menu loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
