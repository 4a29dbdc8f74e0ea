//! Implements FormView on a terminal: colored alerts, indicatif spinners as
//! loaders, a bar-style pie summary and result cards.
//!
//! Holds the FormState; the input loop reads and edits it through this view.

use crate::domain::{
    Alert, AlertKind, ChartSeries, FormField, FormState, ResultCard, SentimentCategory, Workflow,
};
use crate::ports::FormView;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{Write, stdout};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const BAR_WIDTH: usize = 30;
const SPINNER_TICK: Duration = Duration::from_millis(80);

#[derive(Debug, Default)]
struct ViewState {
    form: FormState,
    alerts: HashMap<FormField, Alert>,
    chart: Option<ChartSeries>,
    cards: Vec<ResultCard>,
}

pub struct TerminalView {
    state: Mutex<ViewState>,
    loaders: Mutex<HashMap<Workflow, ProgressBar>>,
}

fn category_color(category: SentimentCategory) -> Color {
    match category {
        SentimentCategory::Positive => Color::Green,
        SentimentCategory::Negative => Color::Red,
        SentimentCategory::Neutral => Color::Yellow,
        SentimentCategory::Other => Color::Blue,
    }
}

fn loader_message(workflow: Workflow) -> &'static str {
    match workflow {
        Workflow::Register => "Registering with the sentiment service...",
        Workflow::Query => "Querying and classifying tweets...",
    }
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Print one line in `color`. Errors writing to the terminal are ignored.
fn print_line(color: Color, bold: bool, text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    if bold {
        let _ = out.execute(SetAttribute(Attribute::Bold));
    }
    let _ = out.execute(Print(text));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

impl TerminalView {
    pub fn new(form: FormState) -> Self {
        Self {
            state: Mutex::new(ViewState {
                form,
                ..ViewState::default()
            }),
            loaders: Mutex::new(HashMap::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn loaders(&self) -> MutexGuard<'_, HashMap<Workflow, ProgressBar>> {
        self.loaders.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `draw` with any active spinner suspended so output does not interleave.
    fn emit(&self, draw: impl FnOnce()) {
        let active = self.loaders().values().next().cloned();
        match active {
            Some(pb) => pb.suspend(draw),
            None => draw(),
        }
    }

    pub fn form(&self) -> FormState {
        self.state().form.clone()
    }

    pub fn update_form(&self, edit: impl FnOnce(&mut FormState)) {
        edit(&mut self.state().form);
    }

    pub fn alert(&self, field: FormField) -> Option<Alert> {
        self.state().alerts.get(&field).cloned()
    }

    pub fn is_loading(&self, workflow: Workflow) -> bool {
        self.loaders().contains_key(&workflow)
    }

    /// Chart and cards of the last successful query.
    pub fn last_results(&self) -> Option<(ChartSeries, Vec<ResultCard>)> {
        let state = self.state();
        state
            .chart
            .as_ref()
            .map(|chart| (chart.clone(), state.cards.clone()))
    }

    /// Print one slice of the last chart in detail.
    pub fn highlight_slice(&self, index: usize) {
        let slice = self
            .state()
            .chart
            .as_ref()
            .and_then(|c| c.slices.get(index).cloned());
        if let Some(slice) = slice {
            self.emit(|| {
                print_line(
                    category_color(slice.category()),
                    true,
                    &format!(
                        "▶ {}  {}  (value {})",
                        slice.data_label(),
                        bar(slice.percentage),
                        slice.value
                    ),
                );
            });
        }
    }
}

impl FormView for TerminalView {
    fn show_alert(&self, field: FormField, alert: Alert) {
        let color = match alert.kind {
            AlertKind::Success => Color::Green,
            AlertKind::Danger => Color::Red,
        };
        let text = format!("[{}] {}", field.label(), alert.message);
        self.state().alerts.insert(field, alert);
        self.emit(|| print_line(color, false, &text));
    }

    fn clear_alert(&self, field: FormField) {
        self.state().alerts.remove(&field);
    }

    fn set_loader(&self, workflow: Workflow, visible: bool) {
        let mut loaders = self.loaders();
        if visible {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(loader_message(workflow));
            pb.enable_steady_tick(SPINNER_TICK);
            if let Some(old) = loaders.insert(workflow, pb) {
                old.finish_and_clear();
            }
        } else if let Some(pb) = loaders.remove(&workflow) {
            pb.finish_and_clear();
        }
    }

    fn set_token(&self, token: &str) {
        self.state().form.token = token.to_string();
    }

    fn reveal_query_form(&self) {
        self.state().form.query_form_visible = true;
        self.emit(|| {
            print_line(
                Color::Cyan,
                false,
                "Query form unlocked: choose \"Query sentiment\" from the menu.",
            )
        });
    }

    fn render_chart(&self, chart: &ChartSeries) {
        self.state().chart = Some(chart.clone());
        self.emit(|| {
            print_line(Color::White, true, &chart.title);
            for slice in &chart.slices {
                print_line(
                    category_color(slice.category()),
                    false,
                    &format!("  {:<10} {}  {}", slice.label, bar(slice.percentage), slice.data_label()),
                );
            }
        });
    }

    fn render_results(&self, cards: &[ResultCard]) {
        self.state().cards = cards.to_vec();
        self.emit(|| {
            print_line(Color::White, true, &format!("Tweets ({})", cards.len()));
            for card in cards {
                let color = category_color(card.category);
                let header = match &card.meta {
                    Some(meta) => format!("┌ [{}] {}", card.label, meta),
                    None => format!("┌ [{}]", card.label),
                };
                print_line(color, true, &header);
                for line in card.body.lines() {
                    print_line(Color::White, false, &format!("│ {}", line));
                }
                print_line(color, false, "└");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartSlice;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(50.0).chars().filter(|c| *c == '█').count(), 15);
        assert_eq!(bar(150.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_view_tracks_form_state() {
        let view = TerminalView::new(FormState::default());

        view.set_token("abc123");
        view.reveal_query_form();
        view.update_form(|f| f.from = "2014-12-01".into());

        let form = view.form();
        assert_eq!(form.token, "abc123");
        assert!(form.query_form_visible);
        assert_eq!(form.query_form().from, "2014-12-01");
    }

    #[test]
    fn test_alerts_replace_and_clear() {
        let view = TerminalView::new(FormState::default());

        view.show_alert(FormField::From, Alert::danger("first"));
        view.show_alert(FormField::From, Alert::danger("second"));
        assert_eq!(view.alert(FormField::From).unwrap().message, "second");

        view.clear_alert(FormField::From);
        assert!(view.alert(FormField::From).is_none());
    }

    #[test]
    fn test_loader_toggle() {
        let view = TerminalView::new(FormState::default());
        view.set_loader(Workflow::Query, true);
        assert!(view.is_loading(Workflow::Query));
        assert!(!view.is_loading(Workflow::Register));
        view.set_loader(Workflow::Query, false);
        assert!(!view.is_loading(Workflow::Query));
    }

    #[test]
    fn test_last_results() {
        let view = TerminalView::new(FormState::default());
        assert!(view.last_results().is_none());

        let chart = ChartSeries {
            title: "Aggregated sentiment".into(),
            slices: vec![ChartSlice {
                label: "positive".into(),
                value: 1.0,
                percentage: 100.0,
            }],
        };
        view.render_chart(&chart);
        view.render_results(&[]);
        view.highlight_slice(0);
        view.highlight_slice(7);

        let (stored, cards) = view.last_results().unwrap();
        assert_eq!(stored, chart);
        assert!(cards.is_empty());
    }
}
