//! Register and query workflows: validate → call service → update view.
//!
//! Every request gets a ticket from its workflow's `RequestSequence`; a response
//! whose ticket is no longer current is dropped without touching the view.
//! The loader is hidden by a guard, so it is cleared on every exit path.

use super::render::{chart_series, escape_text, has_control_chars, result_cards};
use super::request_ticket::{RequestSequence, Ticket};
use crate::domain::validation::{validate_query, validate_username};
use crate::domain::{
    Alert, DomainError, FormField, QueryForm, RegistrationResult, ValidationError, Workflow,
};
use crate::ports::{FormView, SentimentServicePort};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const QUERY_SUCCESS_MESSAGE: &str = "Query performed successfully -- see your results below:";

/// How a single workflow run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Rejected before any network call; the alert is already shown.
    Invalid(ValidationError),
    Succeeded,
    /// Service or transport failure; `message` is what the alert shows.
    Failed { message: String },
    /// A newer request of the same workflow was issued meanwhile; response dropped.
    Stale,
}

/// Hides the loader on drop if its request is still the current one.
struct LoaderGuard<'a> {
    view: &'a dyn FormView,
    sequence: &'a RequestSequence,
    workflow: Workflow,
    ticket: Ticket,
}

impl<'a> LoaderGuard<'a> {
    fn show(
        view: &'a dyn FormView,
        sequence: &'a RequestSequence,
        workflow: Workflow,
        ticket: Ticket,
    ) -> Self {
        view.set_loader(workflow, true);
        Self {
            view,
            sequence,
            workflow,
            ticket,
        }
    }
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        if self.sequence.is_current(self.ticket) {
            self.view.set_loader(self.workflow, false);
        }
    }
}

/// The token is stored and echoed back into the token input verbatim, so it
/// must not carry terminal control sequences. It can't be escaped either,
/// since the escaped form would no longer authenticate.
fn usable_session(session: RegistrationResult) -> Result<RegistrationResult, DomainError> {
    if has_control_chars(&session.token) {
        return Err(DomainError::Decode(
            "session token contains control characters".to_string(),
        ));
    }
    Ok(session)
}

/// Drives both form workflows against a service and a view.
pub struct FormController {
    service: Arc<dyn SentimentServicePort>,
    view: Arc<dyn FormView>,
    registrations: RequestSequence,
    queries: RequestSequence,
}

impl FormController {
    pub fn new(service: Arc<dyn SentimentServicePort>, view: Arc<dyn FormView>) -> Self {
        Self {
            service,
            view,
            registrations: RequestSequence::new(),
            queries: RequestSequence::new(),
        }
    }

    /// Registration flow. On success the token field is populated and the
    /// query form revealed.
    pub async fn register(&self, username: &str) -> WorkflowOutcome {
        self.view.clear_alert(FormField::Username);
        self.view.clear_alert(FormField::Register);

        let username = match validate_username(username) {
            Ok(u) => u,
            Err(e) => return self.reject(e),
        };

        let ticket = self.registrations.issue();
        let _loader = LoaderGuard::show(
            self.view.as_ref(),
            &self.registrations,
            Workflow::Register,
            ticket,
        );
        info!(ticket = ticket.id(), %username, "registering user");

        let result = self.service.register(username).await.and_then(usable_session);
        if !self.registrations.is_current(ticket) {
            debug!(ticket = ticket.id(), "dropping stale registration response");
            return WorkflowOutcome::Stale;
        }

        match result {
            Ok(session) => {
                self.view.set_token(&session.token);
                let mut message = format!(
                    "Successfully registered user {} - your session token: {}",
                    escape_text(&session.username),
                    escape_text(&session.token)
                );
                if let Some(expires) = session.expires_at() {
                    message.push_str(&format!(
                        " (valid until {})",
                        expires.format("%Y-%m-%d %H:%M UTC")
                    ));
                }
                self.view
                    .show_alert(FormField::Register, Alert::success(message));
                self.view.reveal_query_form();
                info!(ticket = ticket.id(), "registration succeeded");
                WorkflowOutcome::Succeeded
            }
            Err(e) => {
                warn!(ticket = ticket.id(), error = %e, "registration failed");
                let message = escape_text(&e.alert_message());
                self.view.show_alert(
                    FormField::Username,
                    Alert::danger(format!("Couldn't register user: {}", message)),
                );
                WorkflowOutcome::Failed { message }
            }
        }
    }

    /// Query flow. On success renders the chart and the result list.
    pub async fn query(&self, form: &QueryForm) -> WorkflowOutcome {
        for field in [FormField::Query, FormField::From, FormField::To] {
            self.view.clear_alert(field);
        }

        let params = match validate_query(form) {
            Ok(p) => p,
            Err(e) => return self.reject(e),
        };

        let ticket = self.queries.issue();
        let _loader =
            LoaderGuard::show(self.view.as_ref(), &self.queries, Workflow::Query, ticket);
        info!(
            ticket = ticket.id(),
            from = %params.from,
            to = %params.to,
            model = %params.classifier_model,
            training = %params.training_config,
            "querying sentiment"
        );

        let result = self.service.query(&params).await;
        if !self.queries.is_current(ticket) {
            debug!(ticket = ticket.id(), "dropping stale query response");
            return WorkflowOutcome::Stale;
        }

        match result {
            Ok(result) => {
                self.view
                    .show_alert(FormField::Query, Alert::success(QUERY_SUCCESS_MESSAGE));
                self.view
                    .render_chart(&chart_series(&result.aggregated_sentiment));
                self.view.render_results(&result_cards(&result.tweets));
                info!(
                    ticket = ticket.id(),
                    tweets = result.tweets.len(),
                    "query succeeded"
                );
                WorkflowOutcome::Succeeded
            }
            Err(e) => {
                warn!(ticket = ticket.id(), error = %e, "query failed");
                let message = escape_text(&e.alert_message());
                self.view.show_alert(
                    FormField::Query,
                    Alert::danger(format!("Couldn't perform query operation: {}", message)),
                );
                WorkflowOutcome::Failed { message }
            }
        }
    }

    fn reject(&self, error: ValidationError) -> WorkflowOutcome {
        info!(field = error.field.label(), reason = %error, "input rejected");
        self.view
            .show_alert(error.field, Alert::danger(error.to_string()));
        WorkflowOutcome::Invalid(error)
    }
}
