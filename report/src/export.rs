use crate::daily::{daily_summary, DailySummary};
use pulse_core::{AnalysisRow, ExportError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files produced by one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub detailed_path: PathBuf,
    pub daily_path: PathBuf,
    pub detailed_rows: usize,
    pub daily_rows: usize,
}

/// Write the detailed table and its daily aggregation.
///
/// `rows` must already be deduplicated and ordered.
pub fn export_all(
    rows: &[AnalysisRow],
    detailed_path: &Path,
    daily_path: &Path,
) -> Result<ExportOutcome, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }

    write_detailed(detailed_path, rows)?;
    let summary = daily_summary(rows);
    write_daily(daily_path, &summary)?;

    Ok(ExportOutcome {
        detailed_path: detailed_path.to_path_buf(),
        daily_path: daily_path.to_path_buf(),
        detailed_rows: rows.len(),
        daily_rows: summary.len(),
    })
}

pub fn write_detailed(path: &Path, rows: &[AnalysisRow]) -> Result<(), ExportError> {
    write_records(path, rows)?;
    info!("Exported detailed analysis: {}", path.display());
    Ok(())
}

pub fn write_daily(path: &Path, summary: &[DailySummary]) -> Result<(), ExportError> {
    write_records(path, summary)?;
    info!("Exported daily summary: {}", path.display());
    Ok(())
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ExportError> {
    ensure_parent_dir(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| ExportError::Flush {
        path: path.display().to_string(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|source| ExportError::OutputDirectory {
                path: dir.display().to_string(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{ItemType, SentimentLabel};
    use tempfile::TempDir;

    fn row(id: &str, search_term: Option<&str>) -> AnalysisRow {
        AnalysisRow {
            date: "2025-07-10".to_string(),
            datetime: "2025-07-10 08:00:00".to_string(),
            source: "Reddit".to_string(),
            item_type: ItemType::SearchResult,
            subreddit: "phinvest".to_string(),
            title: "JFC, tariffs and \"the market\"".to_string(),
            text: "line one\nline two".to_string(),
            full_text: "JFC, tariffs and \"the market\" line one\nline two".to_string(),
            score: 12,
            author: "juan".to_string(),
            level: 0,
            url: format!("https://reddit.com/r/phinvest/comments/{}", id),
            relevance_score: 5,
            vader_compound: 0.25,
            vader_positive: 0.2,
            vader_negative: 0.0,
            vader_neutral: 0.8,
            textblob_polarity: 0.1,
            combined_score: 0.175,
            sentiment_label: SentimentLabel::Positive,
            text_length: 42,
            id: id.to_string(),
            num_comments: 4,
            search_term: search_term.map(str::to_string),
        }
    }

    #[test]
    fn test_detailed_header_and_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("detailed.csv");
        let rows = vec![row("a", Some("JFC stock trump tariff")), row("b", None)];

        write_detailed(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(
            headers,
            vec![
                "date",
                "datetime",
                "source",
                "type",
                "subreddit",
                "title",
                "text",
                "full_text",
                "score",
                "author",
                "level",
                "url",
                "relevance_score",
                "vader_compound",
                "vader_positive",
                "vader_negative",
                "vader_neutral",
                "textblob_polarity",
                "combined_score",
                "sentiment_label",
                "text_length",
                "id",
                "num_comments",
                "search_term",
            ]
        );

        let read_back: Vec<AnalysisRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn test_export_all_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let detailed = dir.path().join("out/nested/detailed.csv");
        let daily = dir.path().join("out/nested/daily.csv");

        let outcome = export_all(&[row("a", None), row("b", None)], &detailed, &daily).unwrap();

        assert!(detailed.exists());
        assert!(daily.exists());
        assert_eq!(outcome.detailed_rows, 2);
        assert_eq!(outcome.daily_rows, 1);

        let content = fs::read_to_string(&daily).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("date,subreddit,avg_sentiment,sentiment_std,count,sentiment_breakdown")
        );
        assert_eq!(
            lines.next(),
            Some(r#"2025-07-10,phinvest,0.175,0.0,2,"{""Positive"":2}""#)
        );
    }

    #[test]
    fn test_export_without_rows_fails() {
        let dir = TempDir::new().unwrap();
        let result = export_all(
            &[],
            &dir.path().join("detailed.csv"),
            &dir.path().join("daily.csv"),
        );
        assert!(matches!(result, Err(ExportError::NoRows)));
        assert!(!dir.path().join("detailed.csv").exists());
    }
}
