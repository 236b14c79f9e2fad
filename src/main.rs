use anyhow::Context;
use collector::Collector;
use pulse_core::{AppConfig, ErrorExt, ErrorReporter};
use reddit_client::{ClientConfig, RedditApiClient};
use report::{export_all, render_summary, FetchStats, NO_DATA_NOTICE};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "tariff_pulse=info,collector=info,reddit_client=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("PHILIPPINE TARIFF REDDIT SENTIMENT ANALYSIS");
    println!("{}", rule);

    tracing::info!("Scraping {}", config.thread_url);
    let client = RedditApiClient::new(ClientConfig::from(&config))?;
    let collector = Collector::new(client, config.clone());

    let analysis = collector.run().await.map_err(|e| {
        ErrorReporter::new().report_error(&e);
        anyhow::anyhow!(e.user_friendly_message())
    })?;

    let client = collector.source();
    if let Ok(metrics) = client.export_metrics().await {
        tracing::debug!("Request metrics: {}", metrics);
    }
    let retry = client.get_retry_metrics();
    tracing::debug!(
        "Retries: {} total, {} succeeded, {} operations failed",
        retry.total_retries,
        retry.successful_retries,
        retry.failed_operations
    );

    if analysis.rows.is_empty() {
        println!("\n{}", NO_DATA_NOTICE);
        return Ok(());
    }

    let outcome = export_all(&analysis.rows, &config.detailed_path(), &config.daily_path())
        .context("failed to export results")?;

    let metrics = client.get_metrics().await;
    let stats = FetchStats {
        total_requests: metrics.total_requests,
        failed_requests: metrics.failed_requests,
    };
    println!("\n{}", render_summary(&analysis.rows, &outcome, stats));

    Ok(())
}
