use crate::listing::{CommentData, LinkData, Listing, Node};
use crate::tree::flatten_comments;
use chrono::{DateTime, Utc};
use pulse_core::{
    CoreError, ErrorRecovery, ItemType, NormalizedItem, ParseError, RecoveryResult,
    RedditApiError, DELETED_MARKER, REMOVED_MARKER,
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const REDDIT_WEB_BASE: &str = "https://reddit.com";

/// Converts decoded Reddit payloads into [`NormalizedItem`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_subreddit: String,
}

/// A seed thread: its submission and the flattened comment forest.
#[derive(Debug, Clone)]
pub struct ParsedThread {
    pub post: NormalizedItem,
    pub comments: Vec<NormalizedItem>,
}

impl ParsedThread {
    pub fn into_items(self) -> Vec<NormalizedItem> {
        let mut items = Vec::with_capacity(self.comments.len() + 1);
        items.push(self.post);
        items.extend(self.comments);
        items
    }
}

impl Normalizer {
    pub fn new(default_subreddit: impl Into<String>) -> Self {
        Self {
            default_subreddit: default_subreddit.into(),
        }
    }

    pub fn link(
        &self,
        link: LinkData,
        item_type: ItemType,
        search_term: Option<&str>,
    ) -> NormalizedItem {
        let subreddit = self.subreddit_or_default(link.subreddit);
        let url = permalink_url(&link.permalink)
            .unwrap_or_else(|| format!("{}/r/{}/comments/{}", REDDIT_WEB_BASE, subreddit, link.id));

        NormalizedItem {
            item_type,
            id: link.id,
            title: link.title,
            text: link.selftext,
            author: author_or_deleted(link.author),
            score: link.score,
            num_comments: link.num_comments,
            created_at: timestamp(link.created_utc),
            subreddit,
            url,
            level: 0,
            search_term: search_term.map(str::to_string),
            relevance_score: None,
        }
    }

    pub fn comment(&self, comment: CommentData, level: u32) -> NormalizedItem {
        let subreddit = self.subreddit_or_default(comment.subreddit);
        let url = permalink_url(&comment.permalink).unwrap_or_else(|| {
            let link_id = comment.link_id.trim_start_matches("t3_");
            if link_id.is_empty() {
                format!("{}/r/{}/comments/{}", REDDIT_WEB_BASE, subreddit, comment.id)
            } else {
                format!(
                    "{}/r/{}/comments/{}/_/{}",
                    REDDIT_WEB_BASE, subreddit, link_id, comment.id
                )
            }
        });

        NormalizedItem {
            item_type: ItemType::Comment,
            id: comment.id,
            title: String::new(),
            text: comment.body.unwrap_or_default(),
            author: author_or_deleted(comment.author),
            score: comment.score,
            num_comments: 0,
            created_at: timestamp(comment.created_utc),
            subreddit,
            url,
            level,
            search_term: None,
            relevance_score: None,
        }
    }

    fn subreddit_or_default(&self, subreddit: String) -> String {
        if subreddit.trim().is_empty() {
            self.default_subreddit.clone()
        } else {
            subreddit
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new("Philippines")
    }
}

/// Extract the thread id from a Reddit thread URL.
///
/// Takes the path segment after `comments`, falling back to the last
/// non-empty segment.
pub fn thread_id_from_url(thread_url: &str) -> Result<String, RedditApiError> {
    let invalid = || RedditApiError::InvalidThreadUrl {
        url: thread_url.to_string(),
    };

    let parsed = Url::parse(thread_url).map_err(|_| invalid())?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let id = match segments.iter().position(|s| *s == "comments") {
        Some(index) => segments.get(index + 1),
        None => segments.last(),
    };

    id.map(|s| s.to_string()).ok_or_else(invalid)
}

/// Parse a thread response: `[submission listing, comment listing]`.
///
/// A missing or malformed comment listing yields a thread without comments.
pub fn parse_thread(
    value: Value,
    normalizer: &Normalizer,
    max_depth: u32,
) -> Result<ParsedThread, ParseError> {
    let Value::Array(mut parts) = value else {
        return Err(ParseError::UnexpectedShape {
            path: "$".to_string(),
        });
    };
    if parts.is_empty() {
        return Err(ParseError::MissingSubmission);
    }

    let comment_part = (parts.len() > 1).then(|| parts.swap_remove(1));
    let submission = Listing::from_value(parts.swap_remove(0))?;

    let first = submission
        .data
        .children
        .into_iter()
        .next()
        .ok_or(ParseError::MissingSubmission)?;
    let post = match first.into_node()? {
        Node::Link(link) => normalizer.link(link, ItemType::Post, None),
        _ => {
            return Err(ParseError::UnexpectedShape {
                path: "$[0].data.children[0]".to_string(),
            })
        }
    };

    let comments = match comment_part.map(Listing::from_value) {
        Some(Ok(listing)) => flatten_comments(listing.data.children, normalizer, max_depth),
        Some(Err(e)) => {
            warn!("Comment listing of thread {} is unusable: {}", post.id, e);
            Vec::new()
        }
        None => {
            debug!("Thread {} has no comment listing", post.id);
            Vec::new()
        }
    };

    Ok(ParsedThread { post, comments })
}

/// Parse a search response into search-result items tagged with `term`.
///
/// Malformed children are skipped; the remaining results are kept.
pub fn parse_search(
    value: Value,
    normalizer: &Normalizer,
    term: &str,
) -> Result<Vec<NormalizedItem>, ParseError> {
    let listing = Listing::from_value(value)?;

    let mut items = Vec::with_capacity(listing.data.children.len());
    for child in listing.data.children {
        let decoded = child.into_node().map_err(CoreError::from);
        match ErrorRecovery::settle("search result", decoded) {
            RecoveryResult::Recovered(Node::Link(link)) => {
                items.push(normalizer.link(link, ItemType::SearchResult, Some(term)));
            }
            RecoveryResult::Recovered(Node::Comment(comment)) => {
                debug!("Ignoring comment {} in search results", comment.id);
            }
            RecoveryResult::Recovered(Node::Other(kind)) => {
                debug!("Ignoring {} node in search results", kind);
            }
            RecoveryResult::Skipped | RecoveryResult::Failed(_) => {}
        }
    }

    Ok(items)
}

fn permalink_url(permalink: &str) -> Option<String> {
    if permalink.is_empty() {
        None
    } else {
        Some(format!("{}{}", REDDIT_WEB_BASE, permalink))
    }
}

fn author_or_deleted(author: Option<String>) -> String {
    match author {
        Some(name) if !name.is_empty() && name != DELETED_MARKER && name != REMOVED_MARKER => name,
        _ => DELETED_MARKER.to_string(),
    }
}

fn timestamp(created_utc: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(created_utc.trunc() as i64, 0).unwrap_or_default()
}
