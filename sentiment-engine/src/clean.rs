//! Text cleanup applied before sentiment scoring.

use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+|www\S+").unwrap());
static MENTION_HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+|#\w+").unwrap());

/// Strip URLs, @mentions and #hashtags, then trim.
pub fn clean_text(text: &str) -> String {
    let without_urls = URL_REGEX.replace_all(text, "");
    let without_tags = MENTION_HASHTAG_REGEX.replace_all(&without_urls, "");
    without_tags.trim().to_string()
}

/// Split on whitespace, trimming surrounding punctuation from word tokens.
///
/// Tokens that would shrink to two characters or fewer keep their punctuation
/// so emoticons such as `:)` survive.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token.to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_urls() {
        assert_eq!(
            clean_text("read this https://example.com/a?b=c now"),
            "read this  now"
        );
        assert_eq!(clean_text("see www.pse.com.ph"), "see");
    }

    #[test]
    fn test_strips_mentions_and_hashtags() {
        assert_eq!(clean_text("@trader #JFC is up"), "is up");
    }

    #[test]
    fn test_only_noise_becomes_empty() {
        assert_eq!(clean_text("  http://x.y  #tag @user "), "");
    }

    #[test]
    fn test_split_tokens_keeps_emoticons() {
        assert_eq!(
            split_tokens("Great, news! :) ok"),
            vec!["Great", "news", ":)", "ok"]
        );
    }
}
