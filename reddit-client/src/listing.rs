//! Typed view of Reddit's public listing JSON.
//!
//! Listings wrap children tagged by `kind`; each child's `data` is decoded
//! into a [`LinkData`] (`t3`) or [`CommentData`] (`t1`) on demand so one bad
//! child never poisons its siblings.

use pulse_core::ParseError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const KIND_COMMENT: &str = "t1";
pub const KIND_LINK: &str = "t3";

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub kind: String,
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<RawChild>,
    #[serde(default)]
    pub after: Option<String>,
}

/// A listing child whose payload has not been decoded yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChild {
    #[serde(default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// A decoded listing child.
#[derive(Debug, Clone)]
pub enum Node {
    Link(LinkData),
    Comment(CommentData),
    /// `more` stubs and anything else that is not a post or comment.
    Other(String),
}

/// Submission payload (`t3`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub selftext: String,
    pub author: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub score: i64,
    #[serde(deserialize_with = "nullable")]
    pub num_comments: u64,
    #[serde(deserialize_with = "nullable")]
    pub created_utc: f64,
    #[serde(deserialize_with = "nullable")]
    pub subreddit: String,
    #[serde(deserialize_with = "nullable")]
    pub permalink: String,
}

/// Comment payload (`t1`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentData {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    pub body: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub score: i64,
    #[serde(deserialize_with = "nullable")]
    pub created_utc: f64,
    #[serde(deserialize_with = "nullable")]
    pub subreddit: String,
    #[serde(deserialize_with = "nullable")]
    pub permalink: String,
    #[serde(deserialize_with = "nullable")]
    pub link_id: String,
    /// A nested listing, or `""` when the comment has no replies.
    pub replies: Value,
}

impl RawChild {
    pub fn into_node(self) -> Result<Node, ParseError> {
        match self.kind.as_str() {
            KIND_LINK => {
                let link: LinkData = decode_payload(KIND_LINK, self.data)?;
                require_id(KIND_LINK, &link.id)?;
                Ok(Node::Link(link))
            }
            KIND_COMMENT => {
                let comment: CommentData = decode_payload(KIND_COMMENT, self.data)?;
                require_id(KIND_COMMENT, &comment.id)?;
                Ok(Node::Comment(comment))
            }
            _ => Ok(Node::Other(self.kind)),
        }
    }
}

impl CommentData {
    /// Move the reply children out of this comment.
    ///
    /// Anything other than a nested listing object yields no replies.
    pub fn take_replies(&mut self) -> Vec<RawChild> {
        let replies = std::mem::take(&mut self.replies);
        if !replies.is_object() {
            return Vec::new();
        }
        match serde_json::from_value::<Listing>(replies) {
            Ok(listing) => listing.data.children,
            Err(e) => {
                tracing::debug!("Ignoring replies of comment {}: {}", self.id, e);
                Vec::new()
            }
        }
    }
}

impl Listing {
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        serde_json::from_value(value).map_err(|e| ParseError::MalformedListing {
            details: e.to_string(),
        })
    }
}

fn decode_payload<T: DeserializeOwned>(kind: &str, data: Value) -> Result<T, ParseError> {
    if !data.is_object() {
        return Err(ParseError::MalformedItem {
            kind: kind.to_string(),
            details: "data is not an object".to_string(),
        });
    }
    serde_json::from_value(data).map_err(|e| ParseError::MalformedItem {
        kind: kind.to_string(),
        details: e.to_string(),
    })
}

fn require_id(kind: &str, id: &str) -> Result<(), ParseError> {
    if id.is_empty() {
        return Err(ParseError::MalformedItem {
            kind: kind.to_string(),
            details: "missing id".to_string(),
        });
    }
    Ok(())
}

/// Treat an explicit `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_comment_with_defaults() {
        let child: RawChild = serde_json::from_value(json!({
            "kind": "t1",
            "data": { "id": "c1", "body": "hello", "score": null }
        }))
        .unwrap();

        match child.into_node().unwrap() {
            Node::Comment(comment) => {
                assert_eq!(comment.id, "c1");
                assert_eq!(comment.body.as_deref(), Some("hello"));
                assert_eq!(comment.score, 0);
                assert_eq!(comment.created_utc, 0.0);
                assert!(comment.author.is_none());
            }
            other => panic!("expected comment, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_link() {
        let child: RawChild = serde_json::from_value(json!({
            "kind": "t3",
            "data": {
                "id": "p1",
                "title": "Tariffs",
                "selftext": "",
                "score": 12,
                "num_comments": 3,
                "created_utc": 1720000000.0,
                "permalink": "/r/Philippines/comments/p1/tariffs/"
            }
        }))
        .unwrap();

        let Node::Link(link) = child.into_node().unwrap() else {
            panic!("expected link");
        };
        assert_eq!(link.title, "Tariffs");
        assert_eq!(link.num_comments, 3);
    }

    #[test]
    fn test_more_stub_is_other() {
        let child: RawChild =
            serde_json::from_value(json!({ "kind": "more", "data": { "count": 4 } })).unwrap();
        assert!(matches!(child.into_node().unwrap(), Node::Other(kind) if kind == "more"));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let child: RawChild =
            serde_json::from_value(json!({ "kind": "t1", "data": { "body": "x" } })).unwrap();
        assert!(matches!(
            child.into_node(),
            Err(ParseError::MalformedItem { kind, .. }) if kind == "t1"
        ));
    }

    #[test]
    fn test_non_object_data_is_malformed() {
        let child: RawChild =
            serde_json::from_value(json!({ "kind": "t3", "data": [1, 2] })).unwrap();
        assert!(child.into_node().is_err());
    }

    #[test]
    fn test_replies_shapes() {
        let mut empty = CommentData {
            replies: json!(""),
            ..Default::default()
        };
        assert!(empty.take_replies().is_empty());

        let mut broken = CommentData {
            replies: json!({ "unexpected": true }),
            ..Default::default()
        };
        assert!(broken.take_replies().is_empty());

        let mut nested = CommentData {
            replies: json!({
                "kind": "Listing",
                "data": { "children": [{ "kind": "t1", "data": { "id": "r1" } }] }
            }),
            ..Default::default()
        };
        let replies = nested.take_replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].kind, "t1");
        assert!(nested.replies.is_null());
    }
}
