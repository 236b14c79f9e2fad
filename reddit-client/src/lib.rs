pub mod api;
pub mod listing;
pub mod metrics;
pub mod normalize;
pub mod rate_limiter;
pub mod retry;
pub mod tree;

pub use api::{status_error, ClientConfig, RedditApiClient, REDDIT_WEB_API_BASE};
pub use listing::{CommentData, LinkData, Listing, Node, RawChild};
pub use metrics::{ApiMetrics, EndpointMetrics, MetricsCollector};
pub use normalize::{parse_search, parse_thread, thread_id_from_url, Normalizer, ParsedThread};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use retry::{RetryConfig, RetryExecutor, RetryMetrics};
pub use tree::flatten_comments;
