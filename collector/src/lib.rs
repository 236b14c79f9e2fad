//! Collection pipeline: fetch a seed thread and related searches, then score
//! everything into export rows.

pub mod orchestrator;
pub mod source;

pub use orchestrator::{Analysis, Collection, Collector};
pub use source::RedditSource;
