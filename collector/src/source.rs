use pulse_core::CoreError;
use reddit_client::RedditApiClient;
use serde_json::Value;

/// Where raw Reddit JSON comes from.
pub trait RedditSource {
    /// `[submission listing, comment listing]` for one thread.
    async fn fetch_thread_json(&self, thread_id: &str) -> Result<Value, CoreError>;

    /// Search listing for a free-text query.
    async fn search_json(&self, term: &str, sort: &str, limit: u32) -> Result<Value, CoreError>;
}

impl RedditSource for RedditApiClient {
    async fn fetch_thread_json(&self, thread_id: &str) -> Result<Value, CoreError> {
        RedditApiClient::fetch_thread_json(self, thread_id).await
    }

    async fn search_json(&self, term: &str, sort: &str, limit: u32) -> Result<Value, CoreError> {
        RedditApiClient::search_json(self, term, sort, limit).await
    }
}
