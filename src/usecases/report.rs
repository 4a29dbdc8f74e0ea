//! Markdown export of the last query result.

use super::render::escape_markdown;
use crate::domain::{ChartSeries, DomainError, ResultCard};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// What the report describes, besides the rendered results.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub username: String,
    pub from: String,
    pub to: String,
    pub classifier_model: String,
    pub training_config: String,
    pub generated_at: DateTime<Utc>,
}

/// Writes query results as Markdown files into `reports_dir`.
pub struct ReportService {
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new(reports_dir: PathBuf) -> Self {
        Self { reports_dir }
    }

    /// Write the report and return its path.
    pub async fn write_report(
        &self,
        ctx: &ReportContext,
        chart: &ChartSeries,
        cards: &[ResultCard],
    ) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Report(format!("Failed to create reports dir: {}", e)))?;

        let filename = format!(
            "sentiment_{}_{}_{}.md",
            sanitize_filename(&ctx.from),
            sanitize_filename(&ctx.to),
            ctx.generated_at.format("%Y%m%d%H%M%S")
        );
        let path = self.reports_dir.join(filename);

        fs::write(&path, render_markdown(ctx, chart, cards))
            .await
            .map_err(|e| DomainError::Report(format!("Failed to write report: {}", e)))?;

        info!(path = %path.display(), cards = cards.len(), "report generated");
        Ok(path)
    }
}

fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// Card text is already terminal-escaped; only Markdown escaping is added here.
pub fn render_markdown(ctx: &ReportContext, chart: &ChartSeries, cards: &[ResultCard]) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Sentiment report: {}\n\n",
        escape_markdown(&ctx.username)
    ));
    md.push_str(&format!(
        "**Range:** {} to {} | **Model:** {} | **Training:** {} | **Generated:** {}\n\n",
        escape_markdown(&ctx.from),
        escape_markdown(&ctx.to),
        escape_markdown(&ctx.classifier_model),
        escape_markdown(&ctx.training_config),
        ctx.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str("---\n\n");

    md.push_str(&format!("## {}\n\n", escape_markdown(&chart.title)));
    md.push_str("| Sentiment | Value | Share |\n|---|---:|---:|\n");
    for slice in &chart.slices {
        md.push_str(&format!(
            "| {} | {} | {:.1} % |\n",
            escape_markdown(&slice.label),
            slice.value,
            slice.percentage
        ));
    }
    md.push('\n');

    md.push_str(&format!("## Tweets ({})\n\n", cards.len()));
    for card in cards {
        let body = escape_markdown(&card.body).replace('\n', " ");
        md.push_str(&format!("- **{}** {}", escape_markdown(&card.label), body));
        if let Some(meta) = &card.meta {
            md.push_str(&format!(" _({})_", escape_markdown(meta)));
        }
        md.push('\n');
    }

    md.push_str("\n---\n*Generated by sentiment-cli*\n");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartSlice, SentimentCategory};

    fn ctx() -> ReportContext {
        ReportContext {
            username: "@alice".into(),
            from: "2014-12-01".into(),
            to: "2014-12-07".into(),
            classifier_model: "SVM".into(),
            training_config: "Sentiment140_100k".into(),
            generated_at: DateTime::from_timestamp(1_417_392_000, 0).unwrap(),
        }
    }

    fn chart() -> ChartSeries {
        ChartSeries {
            title: "Aggregated sentiment".into(),
            slices: vec![ChartSlice {
                label: "positive".into(),
                value: 3.0,
                percentage: 100.0,
            }],
        }
    }

    fn cards() -> Vec<ResultCard> {
        vec![ResultCard {
            category: SentimentCategory::Positive,
            label: "positive".into(),
            body: "great *day*\nagain".into(),
            meta: None,
        }]
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&ctx(), &chart(), &cards());
        assert!(md.starts_with("# Sentiment report: @alice\n"));
        assert!(md.contains("**Range:** 2014-12-01 to 2014-12-07 |"));
        assert!(md.contains("| positive | 3 | 100.0 % |"));
        assert!(md.contains("- **positive** great \\*day\\* again"));
        assert!(md.contains("## Tweets (1)"));
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let service = ReportService::new(dir.path().join("reports"));

        let path = service.write_report(&ctx(), &chart(), &cards()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "sentiment_2014-12-01_2014-12-07_20141201000000.md"
        );
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("Aggregated sentiment"));
    }
}
