use pulse_core::{round_to, AnalysisRow, SentimentLabel};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const SUMMARY_DECIMALS: i32 = 4;

/// Sentiment aggregated over one (date, subreddit) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub subreddit: String,
    pub avg_sentiment: f64,
    /// Sample standard deviation; empty for single-row groups.
    pub sentiment_std: Option<f64>,
    pub count: usize,
    /// JSON object of label counts, most frequent first.
    pub sentiment_breakdown: String,
}

pub fn daily_summary(rows: &[AnalysisRow]) -> Vec<DailySummary> {
    let mut groups: BTreeMap<(&str, &str), Vec<&AnalysisRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.date.as_str(), row.subreddit.as_str()))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((date, subreddit), group)| {
            let scores: Vec<f64> = group.iter().map(|r| r.combined_score).collect();
            DailySummary {
                date: date.to_string(),
                subreddit: subreddit.to_string(),
                avg_sentiment: round_to(mean(&scores), SUMMARY_DECIMALS),
                sentiment_std: sample_std(&scores).map(|s| round_to(s, SUMMARY_DECIMALS)),
                count: group.len(),
                sentiment_breakdown: label_breakdown(group.iter().map(|r| r.sentiment_label)),
            }
        })
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Count labels and render them as a JSON object, most frequent first.
pub fn label_breakdown(labels: impl IntoIterator<Item = SentimentLabel>) -> String {
    let mut counts: BTreeMap<SentimentLabel, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut ordered: Vec<(SentimentLabel, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    let breakdown: Map<String, Value> = ordered
        .into_iter()
        .map(|(label, count)| (label.as_str().to_string(), Value::from(count)))
        .collect();
    Value::Object(breakdown).to_string()
}
