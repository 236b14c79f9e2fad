pub mod daily;
pub mod export;
pub mod rows;
pub mod summary;

pub use daily::{daily_summary, label_breakdown, DailySummary};
pub use export::{export_all, write_daily, write_detailed, ExportOutcome};
pub use rows::{build_row, dedupe_by_url, finalize_rows, order_rows, SOURCE_NAME};
pub use summary::{render_summary, FetchStats, SummaryReport, NO_DATA_NOTICE};
