use crate::daily::mean;
use crate::export::ExportOutcome;
use pulse_core::{AnalysisRow, SentimentLabel};
use std::collections::BTreeMap;
use std::fmt;

pub const NO_DATA_NOTICE: &str =
    "[ERROR] No data collected. Check internet connection and try again.";

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;
const TITLE_PREVIEW_CHARS: usize = 50;

/// Request counters shown at the end of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchStats {
    pub total_requests: u64,
    pub failed_requests: u64,
}

/// Console report for a finished run.
pub struct SummaryReport<'a> {
    rows: &'a [AnalysisRow],
    outcome: &'a ExportOutcome,
    stats: FetchStats,
}

impl<'a> SummaryReport<'a> {
    pub fn new(rows: &'a [AnalysisRow], outcome: &'a ExportOutcome, stats: FetchStats) -> Self {
        Self {
            rows,
            outcome,
            stats,
        }
    }

    fn write_overview(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scores: Vec<f64> = self.rows.iter().map(|r| r.combined_score).collect();
        writeln!(f, "Total Reddit items analyzed: {}", self.rows.len())?;
        writeln!(f, "Average sentiment score: {:.3}", mean(&scores))?;
        writeln!(f, "Sentiment distribution:")?;

        for (label, count) in label_counts(self.rows) {
            let pct = count as f64 / self.rows.len() as f64 * 100.0;
            writeln!(f, "  {}: {} ({:.1}%)", label, count, pct)?;
        }
        Ok(())
    }

    fn write_subreddits(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut by_subreddit: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for row in self.rows {
            by_subreddit
                .entry(row.subreddit.as_str())
                .or_default()
                .push(row.combined_score);
        }

        writeln!(f, "\nBy subreddit:")?;
        for (subreddit, scores) in by_subreddit {
            writeln!(
                f,
                "  r/{}: {} items, avg sentiment {:.3}",
                subreddit,
                scores.len(),
                mean(&scores)
            )?;
        }
        Ok(())
    }

    fn write_extremes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let by_score =
            |a: &AnalysisRow, b: &AnalysisRow| a.combined_score.total_cmp(&b.combined_score);

        writeln!(f, "\nMost positive sentiment:")?;
        for row in top_by(self.rows, 3, |a, b| by_score(b, a)) {
            write_scored(f, row)?;
        }

        writeln!(f, "\nMost negative sentiment:")?;
        for row in top_by(self.rows, 3, by_score) {
            write_scored(f, row)?;
        }
        Ok(())
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "Analysis Results:")?;
        writeln!(f, "{}", "-".repeat(SECTION_WIDTH))?;
        self.write_overview(f)?;
        self.write_subreddits(f)?;

        writeln!(f, "\nMost upvoted posts:")?;
        for row in top_by(self.rows, 3, |a, b| b.score.cmp(&a.score)) {
            writeln!(
                f,
                "  r/{}: {}... ({} upvotes, sentiment: {:.3})",
                row.subreddit,
                preview(row),
                row.score,
                row.combined_score
            )?;
        }

        writeln!(f, "\nMost relevant posts (by relevance score):")?;
        for row in top_by(self.rows, 5, |a, b| b.relevance_score.cmp(&a.relevance_score)) {
            writeln!(
                f,
                "  r/{}: {}... (relevance: {}, sentiment: {:.3})",
                row.subreddit,
                preview(row),
                row.relevance_score,
                row.combined_score
            )?;
        }

        self.write_extremes(f)?;

        writeln!(f, "\n{}", rule)?;
        writeln!(f, "REDDIT SENTIMENT ANALYSIS COMPLETE!")?;
        writeln!(
            f,
            "Requests: {} total, {} failed",
            self.stats.total_requests, self.stats.failed_requests
        )?;
        writeln!(f, "Files generated:")?;
        writeln!(f, "- {} (complete results)", self.outcome.detailed_path.display())?;
        writeln!(f, "- {} (daily aggregated data)", self.outcome.daily_path.display())?;
        writeln!(f, "{}", rule)
    }
}

/// Render the console report for a finished run.
pub fn render_summary(rows: &[AnalysisRow], outcome: &ExportOutcome, stats: FetchStats) -> String {
    SummaryReport::new(rows, outcome, stats).to_string()
}

fn write_scored(f: &mut fmt::Formatter<'_>, row: &AnalysisRow) -> fmt::Result {
    writeln!(
        f,
        "  r/{}: {}... ({:.3})",
        row.subreddit,
        preview(row),
        row.combined_score
    )
}

fn label_counts(rows: &[AnalysisRow]) -> Vec<(SentimentLabel, usize)> {
    let mut counts: BTreeMap<SentimentLabel, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.sentiment_label).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn top_by<F>(rows: &[AnalysisRow], n: usize, cmp: F) -> Vec<&AnalysisRow>
where
    F: Fn(&AnalysisRow, &AnalysisRow) -> std::cmp::Ordering,
{
    let mut sorted: Vec<&AnalysisRow> = rows.iter().collect();
    sorted.sort_by(|a, b| cmp(a, b));
    sorted.truncate(n);
    sorted
}

/// Title cut to 50 characters; comments have no title and show their text.
fn preview(row: &AnalysisRow) -> String {
    let source = if row.title.trim().is_empty() {
        &row.text
    } else {
        &row.title
    };
    source
        .chars()
        .take(TITLE_PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
