//! Lexical sentiment scoring and keyword relevance for Reddit text.

pub mod clean;
pub mod lexicon;
pub mod pattern;
pub mod relevance;
pub mod scorer;
pub mod vader;

pub use clean::clean_text;
pub use lexicon::{PolarityLexicon, SentimentLexicon, ValenceLexicon};
pub use pattern::PatternModel;
pub use relevance::{ContextFlags, RelevanceScorer};
pub use scorer::{LexicalModel, SentimentScorer, MIN_TEXT_CHARS};
pub use vader::{RuleScores, VaderModel};
