use collector::{Collector, RedditSource};
use pulse_core::{AppConfig, CoreError, ItemType, ParseError, RedditApiError, SentimentLabel};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned JSON; anything not registered is a 404.
#[derive(Default)]
struct CannedSource {
    thread: Option<Value>,
    searches: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl CannedSource {
    fn with_thread(mut self, value: Value) -> Self {
        self.thread = Some(value);
        self
    }

    fn with_search(mut self, term: &str, value: Value) -> Self {
        self.searches.insert(term.to_string(), value);
        self
    }
}

impl RedditSource for CannedSource {
    async fn fetch_thread_json(&self, thread_id: &str) -> Result<Value, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.thread.clone().ok_or_else(|| {
            CoreError::RedditApi(RedditApiError::NotFound {
                resource: thread_id.to_string(),
            })
        })
    }

    async fn search_json(&self, term: &str, _sort: &str, _limit: u32) -> Result<Value, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.searches.get(term).cloned().ok_or_else(|| {
            CoreError::RedditApi(RedditApiError::ServerError { status_code: 503 })
        })
    }
}

fn config(search_terms: &[&str]) -> AppConfig {
    AppConfig {
        search_terms: search_terms.iter().map(|t| t.to_string()).collect(),
        ..AppConfig::default()
    }
}

fn comment(id: &str, body: &str) -> Value {
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "body": body,
            "author": "commenter",
            "score": 4,
            "created_utc": 1752110000.0,
            "subreddit": "Philippines",
            "link_id": "t3_1lvofdb",
            "permalink": format!("/r/Philippines/comments/1lvofdb/_/{}/", id),
            "replies": ""
        }
    })
}

fn thread_json() -> Value {
    json!([
        {
            "kind": "Listing",
            "data": { "children": [{
                "kind": "t3",
                "data": {
                    "id": "1lvofdb",
                    "title": "Trump imposes 20% tariff on Philippines",
                    "selftext": "",
                    "author": "poster",
                    "score": 100,
                    "num_comments": 2,
                    "created_utc": 1752105600.0,
                    "subreddit": "Philippines",
                    "permalink": "/r/Philippines/comments/1lvofdb/trump_imposes/"
                }
            }] }
        },
        {
            "kind": "Listing",
            "data": { "children": [
                comment("c1", "This is terrible news for jollibee stock holders"),
                comment("c2", "[deleted]")
            ] }
        }
    ])
}

fn search_hit(id: &str, title: &str, body: &str, created: i64) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "title": title,
            "selftext": body,
            "author": "investor",
            "score": 12,
            "num_comments": 3,
            "created_utc": created,
            "subreddit": "phinvest",
            "permalink": format!("/r/phinvest/comments/{}/post/", id)
        }
    })
}

fn listing(children: Vec<Value>) -> Value {
    json!({ "kind": "Listing", "data": { "children": children } })
}

#[tokio::test]
async fn test_thread_with_deleted_comment() {
    let source = CannedSource::default().with_thread(thread_json());
    let collector = Collector::new(source, config(&[]));

    let analysis = collector.run().await.unwrap();

    assert_eq!(analysis.thread_count, 2);
    assert_eq!(analysis.skipped_requests, 0);
    assert_eq!(analysis.rows.len(), 2);
    assert!(analysis.rows.iter().all(|r| r.id != "c2"));
    assert!(analysis.rows.iter().all(|r| r.relevance_score == 0));

    let post = analysis.rows.iter().find(|r| r.item_type == ItemType::Post).unwrap();
    assert_eq!(post.score, 100);
    assert_eq!(post.date, "2025-07-10");
    for row in &analysis.rows {
        assert_eq!(SentimentLabel::from_score(row.combined_score), row.sentiment_label);
    }
}

#[tokio::test]
async fn test_reply_under_empty_comment_is_kept() {
    let reply = comment("c2", "URC shares held up despite the tariff");
    let mut parent = comment("c1", "");
    parent["data"]["replies"] = listing(vec![reply]);
    let mut thread = thread_json();
    thread[1]["data"]["children"] = json!([parent]);

    let source = CannedSource::default().with_thread(thread);
    let collector = Collector::new(source, config(&[]));

    let collection = collector.collect().await.unwrap();
    let ids: Vec<&str> = collection.thread_items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["1lvofdb", "c1", "c2"]);

    let analysis = collector.run().await.unwrap();
    let reply = analysis.rows.iter().find(|r| r.id == "c2").unwrap();
    assert_eq!(reply.level, 1);
    assert!(analysis.rows.iter().all(|r| r.id != "c1"));
}

#[tokio::test]
async fn test_search_gate_keeps_company_and_tariff_results() {
    let term = "JFC stock trump tariff";
    let source = CannedSource::default().with_thread(thread_json()).with_search(
        term,
        listing(vec![
            search_hit("s1", "JFC outlook amid the trade war", "", 1752200000),
            search_hit("s2", "JFC stock price update", "Nothing about trade here", 1752200000),
            search_hit("s3", "Weekend in Manila", "", 1752200000),
        ]),
    );
    let collector = Collector::new(source, config(&[term]));

    let analysis = collector.run().await.unwrap();
    let search: Vec<_> = analysis
        .rows
        .iter()
        .filter(|r| r.item_type == ItemType::SearchResult)
        .collect();

    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, "s1");
    assert_eq!(search[0].relevance_score, 5);
    assert_eq!(search[0].search_term.as_deref(), Some(term));
    assert_eq!(analysis.rows[0].id, "s1");
}

#[tokio::test]
async fn test_failed_requests_yield_empty_results() {
    let source = CannedSource::default();
    let collector = Collector::new(source, config(&["a", "b", "c"]));

    let analysis = collector.run().await.unwrap();

    assert!(analysis.rows.is_empty());
    assert_eq!(analysis.skipped_requests, 4);
    assert_eq!(collector.source().calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_malformed_thread_is_skipped() {
    let term = "philippine food companies 20% tariff";
    let source = CannedSource::default()
        .with_thread(json!({ "unexpected": true }))
        .with_search(
            term,
            listing(vec![search_hit(
                "s1",
                "Philippine exporters brace for 20% tariff",
                "",
                1752200000,
            )]),
        );
    let collector = Collector::new(source, config(&[term]));

    let collection = collector.collect().await.unwrap();
    assert!(collection.thread_items.is_empty());
    assert_eq!(collection.search_items.len(), 1);
    assert_eq!(collection.skipped_requests, 1);

    let err = collector.scrape_thread().await.unwrap_err();
    assert!(matches!(err, CoreError::Parse(ParseError::UnexpectedShape { .. })));
}

#[tokio::test]
async fn test_concurrent_search_keeps_term_order() {
    let terms = ["jollibee tariff", "URC tariff", "CNPF tariff"];
    let mut source = CannedSource::default();
    for (i, term) in terms.iter().enumerate() {
        source = source.with_search(
            term,
            listing(vec![search_hit(
                &format!("s{}", i),
                &format!("{} hits Philippine exports", term),
                "",
                1752200000,
            )]),
        );
    }
    let config = AppConfig {
        search_concurrency: 3,
        ..config(&terms)
    };
    let collector = Collector::new(source, config);

    let collection = collector.collect().await.unwrap();
    let ids: Vec<&str> = collection.search_items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["s0", "s1", "s2"]);
    assert_eq!(collection.skipped_requests, 1);
}

#[tokio::test]
async fn test_duplicate_search_hits_collapse() {
    let hit = search_hit("dup", "Jollibee shares slide on tariff news", "", 1752200000);
    let source = CannedSource::default()
        .with_search("first", listing(vec![hit.clone()]))
        .with_search("second", listing(vec![hit]));
    let collector = Collector::new(source, config(&["first", "second"]));

    let analysis = collector.run().await.unwrap();
    assert_eq!(analysis.search_count, 2);
    assert_eq!(analysis.rows.len(), 1);
    assert_eq!(analysis.rows[0].search_term.as_deref(), Some("first"));
}
