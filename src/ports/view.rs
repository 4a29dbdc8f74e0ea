//! View port. The controller pushes every UI update through this trait.
//!
//! Calls are synchronous; a view must not block.

use crate::domain::{Alert, ChartSeries, FormField, ResultCard, Workflow};

pub trait FormView: Send + Sync {
    /// Show `alert` next to `field`, replacing whatever was there.
    fn show_alert(&self, field: FormField, alert: Alert);

    fn clear_alert(&self, field: FormField);

    /// Show or hide the loading indicator of a workflow.
    fn set_loader(&self, workflow: Workflow, visible: bool);

    /// Populate the session token input.
    fn set_token(&self, token: &str);

    fn reveal_query_form(&self);

    fn render_chart(&self, chart: &ChartSeries);

    /// Replace the result list.
    fn render_results(&self, cards: &[ResultCard]);
}
