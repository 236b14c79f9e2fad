use crate::source::RedditSource;
use futures::stream::{self, StreamExt};
use pulse_core::{
    AnalysisRow, AppConfig, CoreError, ErrorRecovery, NormalizedItem, RecoveryResult,
};
use reddit_client::{parse_search, parse_thread, thread_id_from_url, Normalizer};
use report::{build_row, finalize_rows};
use sentiment_engine::{RelevanceScorer, SentimentScorer};
use tracing::{debug, info};

/// Items gathered by one collection pass, before scoring.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub thread_items: Vec<NormalizedItem>,
    pub search_items: Vec<NormalizedItem>,
    /// Requests whose failure was logged and replaced by an empty result.
    pub skipped_requests: usize,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.thread_items.len() + self.search_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Thread items first, then search results in term order.
    pub fn into_items(self) -> Vec<NormalizedItem> {
        let mut items = self.thread_items;
        items.extend(self.search_items);
        items
    }
}

/// Scored output of a full run.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Deduplicated by URL, most relevant first.
    pub rows: Vec<AnalysisRow>,
    pub thread_count: usize,
    pub search_count: usize,
    pub skipped_requests: usize,
}

/// Drives thread and search fetches into scored rows.
///
/// A failed fetch or an unparseable response only empties the result for
/// that request; the rest of the run continues.
pub struct Collector<S> {
    source: S,
    config: AppConfig,
    normalizer: Normalizer,
    relevance: RelevanceScorer,
    sentiment: SentimentScorer,
}

impl<S: RedditSource> Collector<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        let normalizer = Normalizer::new(config.default_subreddit.clone());
        let relevance = RelevanceScorer::new(&config.keyword_tiers);
        Self {
            source,
            config,
            normalizer,
            relevance,
            sentiment: SentimentScorer::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn run(&self) -> Result<Analysis, CoreError> {
        let collection = self.collect().await?;
        let thread_count = collection.thread_items.len();
        let search_count = collection.search_items.len();
        let skipped_requests = collection.skipped_requests;

        let rows = self.analyze(&collection.into_items());
        info!(
            "Analyzed {} rows ({} thread items, {} search results, {} skipped requests)",
            rows.len(),
            thread_count,
            search_count,
            skipped_requests
        );

        Ok(Analysis {
            rows,
            thread_count,
            search_count,
            skipped_requests,
        })
    }

    /// Scrape the seed thread and every configured search term.
    pub async fn collect(&self) -> Result<Collection, CoreError> {
        let mut collection = Collection::default();

        match ErrorRecovery::settle("thread scrape", self.scrape_thread().await) {
            RecoveryResult::Recovered(items) => {
                info!("Found {} posts/comments in main thread", items.len());
                collection.thread_items = items;
            }
            RecoveryResult::Skipped => collection.skipped_requests += 1,
            RecoveryResult::Failed(e) => return Err(e),
        }

        for (term, result) in self.search_related().await {
            let operation = format!("search for '{}'", term);
            match ErrorRecovery::settle(&operation, result) {
                RecoveryResult::Recovered(items) => collection.search_items.extend(items),
                RecoveryResult::Skipped => collection.skipped_requests += 1,
                RecoveryResult::Failed(e) => return Err(e),
            }
        }
        info!("Found {} related posts", collection.search_items.len());

        Ok(collection)
    }

    /// Fetch and flatten the configured thread: the submission, then its
    /// comments in pre-order.
    pub async fn scrape_thread(&self) -> Result<Vec<NormalizedItem>, CoreError> {
        let thread_id = thread_id_from_url(&self.config.thread_url)?;
        let value = self.source.fetch_thread_json(&thread_id).await?;
        let parsed = parse_thread(value, &self.normalizer, self.config.max_comment_depth)?;
        Ok(parsed.into_items())
    }

    /// Run every search term, at most `search_concurrency` at a time.
    ///
    /// Results come back in term order regardless of completion order.
    pub async fn search_related(&self) -> Vec<(String, Result<Vec<NormalizedItem>, CoreError>)> {
        stream::iter(self.config.search_terms.iter())
            .map(|term| async move { (term.clone(), self.search_term(term).await) })
            .buffered(self.config.search_concurrency.max(1))
            .collect()
            .await
    }

    /// Search one term and keep only on-topic results scoring at least
    /// `min_relevance`.
    pub async fn search_term(&self, term: &str) -> Result<Vec<NormalizedItem>, CoreError> {
        let value = self
            .source
            .search_json(term, &self.config.search_sort, self.config.search_limit)
            .await?;
        let results = parse_search(value, &self.normalizer, term)?;
        let total = results.len();

        let admitted: Vec<NormalizedItem> = results
            .into_iter()
            .filter_map(|mut item| {
                let score = self
                    .relevance
                    .admit(&item.title, &item.text, self.config.min_relevance)?;
                item.relevance_score = Some(score);
                Some(item)
            })
            .collect();

        debug!("'{}': kept {} of {} results", term, admitted.len(), total);
        Ok(admitted)
    }

    /// Score every item and assemble the export rows.
    pub fn analyze(&self, items: &[NormalizedItem]) -> Vec<AnalysisRow> {
        let rows = items
            .iter()
            .filter(|item| item.has_content())
            .filter_map(|item| {
                let sentiment = self.sentiment.score(&item.full_text());
                build_row(item, &sentiment)
            })
            .collect();
        finalize_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::ItemType;

    fn item(id: &str, title: &str, text: &str) -> NormalizedItem {
        NormalizedItem {
            item_type: ItemType::Comment,
            id: id.to_string(),
            title: title.to_string(),
            text: text.to_string(),
            author: "juan".to_string(),
            score: 1,
            num_comments: 0,
            created_at: Default::default(),
            subreddit: "Philippines".to_string(),
            url: format!("https://reddit.com/r/Philippines/comments/t/_/{}", id),
            level: 0,
            search_term: None,
            relevance_score: None,
        }
    }

    #[test]
    fn test_collection_order() {
        let collection = Collection {
            thread_items: vec![item("t1", "", "a"), item("t2", "", "b")],
            search_items: vec![item("s1", "x", "")],
            skipped_requests: 0,
        };
        assert_eq!(collection.len(), 3);
        let ids: Vec<String> = collection.into_items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["t1", "t2", "s1"]);
    }
}
