//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Menu loop: register, query, inspect chart slices, export a report.
//! Esc on a field returns to the menu; Ctrl-C quits.
//!
//! Exports describe the last successful query, not whatever the form holds now.

use super::terminal_view::TerminalView;
use crate::domain::validation::{format_date, parse_date};
use crate::domain::{
    Alert, ChartSeries, ClassifierModel, DomainError, FormField, ResultCard, TrainingConfig,
};
use crate::ports::{FormView, InputPort};
use crate::usecases::{FormController, ReportContext, ReportService, WorkflowOutcome};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{DateSelect, InquireError, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Applies the neon prompt theme to every subsequent inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightMagenta))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Register,
    Query,
    InspectChart,
    ExportReport,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Register => "Register Twitter user",
            Self::Query => "Query sentiment",
            Self::InspectChart => "Inspect chart slice",
            Self::ExportReport => "Export report (Markdown)",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Answer of a single prompt.
enum Answer<T> {
    Given(T),
    /// Esc: abandon the current action.
    Back,
    /// Ctrl-C: leave the application.
    Quit,
}

fn ask<T>(result: Result<T, InquireError>) -> Result<Answer<T>, DomainError> {
    match result {
        Ok(v) => Ok(Answer::Given(v)),
        Err(InquireError::OperationCanceled) => Ok(Answer::Back),
        Err(InquireError::OperationInterrupted) => Ok(Answer::Quit),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

enum Flow {
    Continue,
    Quit,
}

macro_rules! answer {
    ($prompt:expr) => {
        match ask($prompt)? {
            Answer::Given(v) => v,
            Answer::Back => return Ok(Flow::Continue),
            Answer::Quit => return Ok(Flow::Quit),
        }
    };
}

/// Available actions depend on the form state: querying needs a revealed
/// query form, inspecting and exporting need results.
fn menu_actions(query_form_visible: bool, has_results: bool) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::Register];
    if query_form_visible {
        actions.push(MenuAction::Query);
    }
    if has_results {
        actions.push(MenuAction::InspectChart);
        actions.push(MenuAction::ExportReport);
    }
    actions.push(MenuAction::Quit);
    actions
}

fn position<T: PartialEq>(all: &[T], current: &T) -> usize {
    all.iter().position(|x| x == current).unwrap_or(0)
}

/// Date picker showing and echoing dates as yyyy-mm-dd.
fn date_picker(message: &str, starting_date: NaiveDate) -> DateSelect<'_> {
    DateSelect::new(message)
        .with_formatter(&format_date)
        .with_starting_date(starting_date)
        .with_help_message("Esc leaves the date empty")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// What the last successful query asked for and what it rendered.
#[derive(Debug, Clone)]
struct ReportSnapshot {
    context: ReportContext,
    chart: ChartSeries,
    cards: Vec<ResultCard>,
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    controller: Arc<FormController>,
    view: Arc<TerminalView>,
    reports: ReportService,
    /// Username of the last successful registration.
    session_user: Mutex<Option<String>>,
    last_report: Mutex<Option<ReportSnapshot>>,
}

impl TuiInputPort {
    pub fn new(controller: Arc<FormController>, view: Arc<TerminalView>, reports: ReportService) -> Self {
        Self {
            controller,
            view,
            reports,
            session_user: Mutex::new(None),
            last_report: Mutex::new(None),
        }
    }

    async fn dispatch(&self, action: MenuAction) -> Result<Flow, DomainError> {
        match action {
            MenuAction::Register => self.register().await,
            MenuAction::Query => self.query().await,
            MenuAction::InspectChart => self.inspect_chart(),
            MenuAction::ExportReport => self.export_report().await,
            MenuAction::Quit => Ok(Flow::Quit),
        }
    }

    async fn register(&self) -> Result<Flow, DomainError> {
        let current = self.view.form();
        let username = answer!(
            Text::new("Twitter username:")
                .with_placeholder("@username")
                .with_initial_value(&current.username)
                .prompt()
        );
        self.view.update_form(|f| f.username = username.clone());

        self.submit_registration(&username).await;
        Ok(Flow::Continue)
    }

    async fn submit_registration(&self, username: &str) -> WorkflowOutcome {
        let outcome = self.controller.register(username).await;
        debug!(?outcome, "registration finished");
        if outcome == WorkflowOutcome::Succeeded {
            *lock(&self.session_user) = Some(username.to_string());
        }
        outcome
    }

    async fn query(&self) -> Result<Flow, DomainError> {
        let current = self.view.form();
        let token = answer!(
            Text::new("Session token:")
                .with_initial_value(&current.token)
                .prompt()
        );

        let today = Utc::now().date_naive();
        let from = answer!(
            date_picker("From date:", parse_date(&current.from).unwrap_or(today))
                .prompt_skippable()
        );
        let to = answer!(
            date_picker("To date:", parse_date(&current.to).or(from).unwrap_or(today))
                .prompt_skippable()
        );
        let classifier_model = answer!(
            Select::new("Classifier model:", ClassifierModel::ALL.to_vec())
                .with_starting_cursor(position(&ClassifierModel::ALL, &current.classifier_model))
                .prompt()
        );
        let training_config = answer!(
            Select::new("Training config:", TrainingConfig::ALL.to_vec())
                .with_starting_cursor(position(&TrainingConfig::ALL, &current.training_config))
                .prompt()
        );

        self.view.update_form(|f| {
            f.token = token;
            f.from = from.map(format_date).unwrap_or_default();
            f.to = to.map(format_date).unwrap_or_default();
            f.classifier_model = classifier_model;
            f.training_config = training_config;
        });

        self.submit_query().await;
        Ok(Flow::Continue)
    }

    /// Run the query the form describes. On success, snapshot its inputs
    /// together with the rendered results for a later export.
    async fn submit_query(&self) -> WorkflowOutcome {
        let form = self.view.form();
        let outcome = self.controller.query(&form.query_form()).await;
        debug!(?outcome, "query finished");
        if outcome != WorkflowOutcome::Succeeded {
            return outcome;
        }

        if let Some((chart, cards)) = self.view.last_results() {
            let username = lock(&self.session_user)
                .clone()
                .unwrap_or(form.username);
            let context = ReportContext {
                username,
                from: form.from.trim().to_string(),
                to: form.to.trim().to_string(),
                classifier_model: form.classifier_model.to_string(),
                training_config: form.training_config.to_string(),
                generated_at: Utc::now(),
            };
            *lock(&self.last_report) = Some(ReportSnapshot {
                context,
                chart,
                cards,
            });
        }
        outcome
    }

    fn inspect_chart(&self) -> Result<Flow, DomainError> {
        let Some((chart, _)) = self.view.last_results() else {
            return Ok(Flow::Continue);
        };
        let labels: Vec<String> = chart.slices.iter().map(|s| s.data_label()).collect();
        let choice = answer!(Select::new("Select a slice:", labels).raw_prompt());
        self.view.highlight_slice(choice.index);
        Ok(Flow::Continue)
    }

    async fn export_report(&self) -> Result<Flow, DomainError> {
        match self.write_last_report().await {
            Ok(Some(path)) => self.view.show_alert(
                FormField::Query,
                Alert::success(format!("Report written to {}", path.display())),
            ),
            Ok(None) => {}
            Err(e) => self
                .view
                .show_alert(FormField::Query, Alert::danger(e.to_string())),
        }
        Ok(Flow::Continue)
    }

    /// Write the last successful query's report. `None` if there is none yet.
    async fn write_last_report(&self) -> Result<Option<PathBuf>, DomainError> {
        let snapshot = lock(&self.last_report).clone();
        let Some(snapshot) = snapshot else {
            return Ok(None);
        };
        let context = ReportContext {
            generated_at: Utc::now(),
            ..snapshot.context
        };
        self.reports
            .write_report(&context, &snapshot.chart, &snapshot.cards)
            .await
            .map(Some)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let form = self.view.form();
            let actions = menu_actions(form.query_form_visible, self.view.last_results().is_some());
            let flow = match ask(Select::new("What would you like to do?", actions).prompt())? {
                Answer::Given(action) => self.dispatch(action).await?,
                Answer::Back | Answer::Quit => Flow::Quit,
            };
            if let Flow::Quit = flow {
                info!("leaving sentiment client");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockSentimentClient;
    use crate::domain::FormState;

    fn tui(reports_dir: PathBuf) -> TuiInputPort {
        let view = Arc::new(TerminalView::new(FormState::default()));
        let service = Arc::new(MockSentimentClient::with_delay(1));
        let controller = Arc::new(FormController::new(service, view.clone()));
        TuiInputPort::new(controller, view, ReportService::new(reports_dir))
    }

    #[test]
    fn test_menu_hides_query_until_registered() {
        assert_eq!(
            menu_actions(false, false),
            vec![MenuAction::Register, MenuAction::Quit]
        );
        assert_eq!(
            menu_actions(true, true),
            vec![
                MenuAction::Register,
                MenuAction::Query,
                MenuAction::InspectChart,
                MenuAction::ExportReport,
                MenuAction::Quit
            ]
        );
    }

    #[test]
    fn test_prompt_answers() {
        assert!(matches!(ask(Ok(1)), Ok(Answer::Given(1))));
        assert!(matches!(
            ask::<u8>(Err(InquireError::OperationCanceled)),
            Ok(Answer::Back)
        ));
        assert!(matches!(
            ask::<u8>(Err(InquireError::OperationInterrupted)),
            Ok(Answer::Quit)
        ));
    }

    #[test]
    fn test_starting_cursor() {
        assert_eq!(position(&ClassifierModel::ALL, &ClassifierModel::Knn), 2);
        assert_eq!(position(&TrainingConfig::ALL, &TrainingConfig::default()), 2);
    }

    #[test]
    fn test_date_picker_uses_wire_format() {
        let start = NaiveDate::from_ymd_opt(2014, 12, 1).unwrap();
        let picker = date_picker("From date:", start);
        assert_eq!((picker.formatter)(start), "2014-12-01");
        assert_eq!(picker.starting_date, start);
    }

    #[tokio::test]
    async fn test_export_without_results_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tui = tui(dir.path().to_path_buf());
        assert!(tui.write_last_report().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_describes_last_successful_query() {
        let dir = tempfile::tempdir().unwrap();
        let tui = tui(dir.path().to_path_buf());

        assert_eq!(tui.submit_registration("@alice").await, WorkflowOutcome::Succeeded);
        tui.view.update_form(|f| {
            f.username = "@alice".into();
            f.from = "2014-12-01".into();
            f.to = "2014-12-02".into();
        });
        assert_eq!(tui.submit_query().await, WorkflowOutcome::Succeeded);

        tui.view.update_form(|f| {
            f.username = "@mallory".into();
            f.token = "bogus".into();
            f.from = "2015-01-01".into();
            f.to = "2015-01-05".into();
            f.classifier_model = ClassifierModel::Knn;
        });
        assert!(matches!(
            tui.submit_query().await,
            WorkflowOutcome::Failed { .. }
        ));

        let path = tui.write_last_report().await.unwrap().unwrap();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("sentiment_2014-12-01_2014-12-02_"), "{name}");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Sentiment report: @alice\n"));
        assert!(content.contains("**Range:** 2014-12-01 to 2014-12-02"));
        assert!(content.contains("**Model:** SVM"));
        assert!(!content.contains("mallory"));
        assert!(!content.contains("2015-01"));
    }
}
