//! Presentation-ready data handed to a view. All text is already escaped.

use super::entities::SentimentCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    /// Share of the series total, 0..=100.
    pub percentage: f64,
}

impl ChartSlice {
    pub fn data_label(&self) -> String {
        format!("{}: {:.1} %", self.label, self.percentage)
    }

    pub fn category(&self) -> SentimentCategory {
        SentimentCategory::from_label(&self.label)
    }
}

/// Pie chart input.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl ChartSeries {
    pub fn pairs(&self) -> Vec<(&str, f64)> {
        self.slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }
}

/// One entry of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub category: SentimentCategory,
    pub label: String,
    pub body: String,
    /// Date and counters line, when the service sent them.
    pub meta: Option<String>,
}
