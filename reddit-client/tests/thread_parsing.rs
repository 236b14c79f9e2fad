use pulse_core::{ItemType, DELETED_MARKER};
use reddit_client::{parse_search, parse_thread, thread_id_from_url, Normalizer};
use serde_json::{json, Value};

fn comment(id: &str, body: &str, level_replies: Vec<Value>) -> Value {
    let replies = if level_replies.is_empty() {
        json!("")
    } else {
        json!({ "kind": "Listing", "data": { "children": level_replies } })
    };
    json!({
        "kind": "t1",
        "data": {
            "id": id,
            "body": body,
            "author": format!("user_{}", id),
            "score": 1,
            "created_utc": 1752110000.0,
            "subreddit": "Philippines",
            "link_id": "t3_1lvofdb",
            "permalink": format!("/r/Philippines/comments/1lvofdb/_/{}/", id),
            "replies": replies
        }
    })
}

fn thread(comments: Vec<Value>) -> Value {
    json!([
        {
            "kind": "Listing",
            "data": {
                "children": [{
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
                }]
            }
        },
        { "kind": "Listing", "data": { "children": comments } }
    ])
}

#[test]
fn test_submission_with_valid_and_deleted_comment() {
    let value = thread(vec![
        comment("c1", "This is bad for jollibee stock", vec![]),
        comment("c2", "[deleted]", vec![comment("c2a", "reply to deleted", vec![])]),
    ]);

    let parsed = parse_thread(value, &Normalizer::new("Philippines"), 4).unwrap();
    let items = parsed.into_items();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_type, ItemType::Post);
    assert_eq!(items[0].title, "Trump imposes 20% tariff on Philippines");
    assert_eq!(items[0].score, 100);
    assert_eq!(items[1].item_type, ItemType::Comment);
    assert_eq!(items[1].id, "c1");
    assert!(items.iter().all(|i| i.text != DELETED_MARKER));
    assert!(!items.iter().any(|i| i.id == "c2a"));
}

#[test]
fn test_depth_six_tree_is_cut_at_four() {
    let mut node = comment("l6", "level six", vec![]);
    for level in (0..6).rev() {
        node = comment(&format!("l{}", level), "nested reply", vec![node]);
    }

    let parsed = parse_thread(thread(vec![node]), &Normalizer::new("Philippines"), 4).unwrap();
    let levels: Vec<u32> = parsed.comments.iter().map(|c| c.level).collect();

    assert_eq!(levels, vec![0, 1, 2, 3, 4]);
    assert_eq!(parsed.comments[4].id, "l4");
}

#[test]
fn test_urls_are_unique_per_comment() {
    let parsed = parse_thread(
        thread(vec![
            comment("a", "first", vec![comment("b", "second", vec![])]),
            comment("c", "third", vec![]),
        ]),
        &Normalizer::new("Philippines"),
        4,
    )
    .unwrap();

    let mut urls: Vec<&str> = parsed.comments.iter().map(|c| c.url.as_str()).collect();
    urls.push(parsed.post.url.as_str());
    let total = urls.len();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), total);
}

#[test]
fn test_search_results_are_tagged() {
    let value = json!({
        "kind": "Listing",
        "data": {
            "children": [
                { "kind": "t3", "data": {
                    "id": "s1",
                    "title": "JFC and the trade war",
                    "selftext": "Thoughts on the outlook?",
                    "score": 12,
                    "num_comments": 4,
                    "created_utc": 1752200000,
                    "subreddit": "phinvest",
                    "permalink": "/r/phinvest/comments/s1/jfc/"
                } }
            ]
        }
    });

    let normalizer = Normalizer::new("Philippines");
    let items = parse_search(value, &normalizer, "JFC stock trump tariff").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type, ItemType::SearchResult);
    assert_eq!(items[0].search_term.as_deref(), Some("JFC stock trump tariff"));
    assert_eq!(items[0].num_comments, 4);
    assert_eq!(items[0].relevance_score, None);
}

#[test]
fn test_configured_thread_url() {
    let id = thread_id_from_url(
        "https://www.reddit.com/r/Philippines/comments/1lvofdb/trump_imposes_20_tariff_for_rate_for_philippines/",
    )
    .unwrap();
    assert_eq!(id, "1lvofdb");
}
