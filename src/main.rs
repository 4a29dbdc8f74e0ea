//! Wiring & DI. Entry point: bootstrap adapters, inject into the controller, run UI.
//! No business logic here; workflows live in FormController.

use dotenv::dotenv;
use sentiment_cli::adapters::http::{HttpSentimentClient, MockSentimentClient};
use sentiment_cli::adapters::ui::{TerminalView, TuiInputPort};
use sentiment_cli::domain::FormState;
use sentiment_cli::ports::{FormView, InputPort, SentimentServicePort};
use sentiment_cli::shared::config::AppConfig;
use sentiment_cli::usecases::{FormController, ReportService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    sentiment_cli::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    // --- Service client: HTTP, or offline mock when SENTIMENT_MOCK=true ---
    let service: Arc<dyn SentimentServicePort> = if cfg.is_mock() {
        warn!("SENTIMENT_MOCK is set, using offline mock service");
        Arc::new(MockSentimentClient::new())
    } else {
        let endpoint = cfg.endpoint_or_default();
        info!(endpoint = %endpoint, "using sentiment service");
        match cfg.request_timeout() {
            Some(timeout) => Arc::new(
                HttpSentimentClient::with_timeout(endpoint, timeout)
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            ),
            None => Arc::new(HttpSentimentClient::new(endpoint)),
        }
    };

    // --- Application state + view ---
    let view = Arc::new(TerminalView::new(FormState::with_defaults(
        cfg.classifier_model_or_default(),
        cfg.training_config_or_default(),
    )));
    let form_view: Arc<dyn FormView> = Arc::clone(&view) as Arc<dyn FormView>;
    let controller = Arc::new(FormController::new(service, form_view));

    let reports_dir = PathBuf::from(cfg.reports_dir_or_default());
    info!(path = %reports_dir.display(), "reports directory");
    let reports = ReportService::new(reports_dir);

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(controller, view, reports));

    // --- Run (main menu -> Register / Query / Inspect / Export) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
