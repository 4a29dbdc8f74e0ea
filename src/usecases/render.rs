//! Maps service payloads to view models. Every server-provided string is
//! escaped here, before it can reach a terminal or a report.

use crate::domain::{
    AggregatedSentiment, ChartSeries, ChartSlice, ResultCard, SentimentCategory, TweetResult,
};
use chrono::DateTime;

pub const CHART_TITLE: &str = "Aggregated sentiment";

/// Neutralises control characters (ESC sequences, C1 controls, bidi overrides)
/// by rendering them as visible `\u{..}` escapes. Newline and tab pass through.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\n' || c == '\t' {
            out.push(c);
        } else if c.is_control() || is_bidi_control(c) {
            out.push_str(&format!("\\u{{{:x}}}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// True if `raw` holds anything `escape_text` would rewrite, newline and tab included.
pub fn has_control_chars(raw: &str) -> bool {
    raw.chars().any(|c| c.is_control() || is_bidi_control(c))
}

fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}')
}

/// Escapes Markdown metacharacters. Input is expected to be `escape_text` output.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '#' | '!'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Pie series in mapping order. Percentages are 0 when the total is 0.
pub fn chart_series(aggregated: &AggregatedSentiment) -> ChartSeries {
    let total = aggregated.total();
    let slices = aggregated
        .pairs()
        .iter()
        .map(|(label, value)| ChartSlice {
            label: escape_text(label),
            value: *value,
            percentage: if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    ChartSeries {
        title: CHART_TITLE.to_string(),
        slices,
    }
}

pub fn result_cards(tweets: &[TweetResult]) -> Vec<ResultCard> {
    tweets.iter().map(result_card).collect()
}

fn result_card(tweet: &TweetResult) -> ResultCard {
    let mut meta = Vec::new();
    if let Some(created) = tweet.created_at.and_then(DateTime::from_timestamp_millis) {
        meta.push(created.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    if let Some(n) = tweet.retweet_count {
        meta.push(format!("{} retweets", n));
    }
    if let Some(n) = tweet.favorite_count {
        meta.push(format!("{} favorites", n));
    }

    ResultCard {
        category: SentimentCategory::from_label(&tweet.sentiment),
        label: escape_text(tweet.sentiment.trim()),
        body: escape_text(&tweet.text),
        meta: (!meta.is_empty()).then(|| meta.join(" · ")),
    }
}
