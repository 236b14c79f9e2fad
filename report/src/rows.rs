use pulse_core::{AnalysisRow, NormalizedItem, SentimentRecord};
use std::collections::HashSet;
use tracing::debug;

pub const SOURCE_NAME: &str = "Reddit";

/// Merge an item with its sentiment scores into an exported row.
///
/// Returns `None` for items with neither title nor text.
pub fn build_row(item: &NormalizedItem, sentiment: &SentimentRecord) -> Option<AnalysisRow> {
    let full_text = item.full_text();
    if full_text.is_empty() {
        debug!("Skipping {} {} with no text", item.item_type, item.id);
        return None;
    }

    Some(AnalysisRow {
        date: item.created_at.format("%Y-%m-%d").to_string(),
        datetime: item.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        source: SOURCE_NAME.to_string(),
        item_type: item.item_type,
        subreddit: item.subreddit.clone(),
        title: item.title.clone(),
        text: item.text.clone(),
        full_text,
        score: item.score,
        author: item.author.clone(),
        level: item.level,
        url: item.url.clone(),
        relevance_score: item.relevance_score.unwrap_or(0),
        vader_compound: sentiment.compound,
        vader_positive: sentiment.positive,
        vader_negative: sentiment.negative,
        vader_neutral: sentiment.neutral,
        textblob_polarity: sentiment.polarity,
        combined_score: sentiment.combined_score,
        sentiment_label: sentiment.label,
        text_length: sentiment.text_length,
        id: item.id.clone(),
        num_comments: item.num_comments,
        search_term: item.search_term.clone(),
    })
}

/// Keep the first row for every URL.
pub fn dedupe_by_url(rows: Vec<AnalysisRow>) -> Vec<AnalysisRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    let before = rows.len();
    let unique: Vec<AnalysisRow> = rows
        .into_iter()
        .filter(|row| seen.insert(row.url.clone()))
        .collect();

    if unique.len() < before {
        debug!("Dropped {} duplicate rows", before - unique.len());
    }
    unique
}

/// Most relevant first, oldest first within equal relevance.
pub fn order_rows(rows: &mut [AnalysisRow]) {
    rows.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| a.date.cmp(&b.date))
    });
}

/// Deduplicate then order, the shape both exports expect.
pub fn finalize_rows(rows: Vec<AnalysisRow>) -> Vec<AnalysisRow> {
    let mut rows = dedupe_by_url(rows);
    order_rows(&mut rows);
    rows
}
