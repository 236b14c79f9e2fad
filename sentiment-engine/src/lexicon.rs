//! Sentiment lexicons
//!
//! - [`ValenceLexicon`]: word valences on a -4..4 scale with booster and
//!   negation tables, used by the rule-based model
//! - [`PolarityLexicon`]: adjective polarities on a -1..1 scale with
//!   intensifiers, used by the pattern model

use std::collections::HashMap;

/// Scaling applied by an incrementing booster word.
pub const BOOSTER_INCREMENT: f64 = 0.293;
/// Scaling applied by a dampening booster word.
pub const BOOSTER_DECREMENT: f64 = -0.293;

/// Lookup interface shared by both lexicons
pub trait SentimentLexicon {
    /// Score of a lowercase word, if present
    fn get_score(&self, word: &str) -> Option<f64>;

    fn contains(&self, word: &str) -> bool {
        self.get_score(word).is_some()
    }

    /// All scored words
    fn words(&self) -> Vec<&str>;
}

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

/// Word valences for the rule-based model.
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

impl ValenceLexicon {
    pub fn new() -> Self {
        let valences = [
            // general positive
            ("good", 1.9),
            ("great", 3.1),
            ("excellent", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("fantastic", 2.6),
            ("wonderful", 2.7),
            ("best", 3.2),
            ("better", 1.9),
            ("nice", 1.8),
            ("love", 3.2),
            ("loved", 2.9),
            ("like", 2.0),
            ("likes", 1.8),
            ("happy", 2.7),
            ("glad", 2.0),
            ("hope", 1.9),
            ("hopeful", 2.3),
            ("optimistic", 2.3),
            ("confident", 2.2),
            ("win", 2.8),
            ("winning", 2.4),
            ("success", 2.7),
            ("successful", 2.8),
            ("strong", 2.3),
            ("stronger", 1.7),
            ("safe", 1.9),
            ("support", 1.7),
            ("benefit", 2.0),
            ("benefits", 1.6),
            ("opportunity", 1.8),
            ("opportunities", 1.6),
            ("thanks", 1.9),
            ("thank", 1.5),
            ("fair", 1.3),
            ("fine", 0.8),
            ("ok", 1.2),
            ("okay", 0.9),
            ("yes", 1.7),
            ("agree", 1.5),
            ("interesting", 1.7),
            ("positive", 2.6),
            ("resilient", 1.2),
            ("recover", 1.4),
            ("recovery", 1.4),
            ("boost", 1.7),
            ("gain", 2.4),
            ("gains", 1.8),
            ("profit", 1.9),
            ("profits", 1.8),
            ("growth", 1.6),
            ("grow", 1.3),
            ("rally", 1.6),
            ("bullish", 1.8),
            ("undervalued", 0.9),
            ("cheap", 0.8),
            ("lol", 1.8),
            ("haha", 2.0),
            ("funny", 1.9),
            ("fun", 2.3),
            ("smart", 1.7),
            ("wise", 1.8),
            ("welcome", 2.0),
            ("lucky", 1.8),
            (":)", 2.0),
            (":d", 2.3),
            // general negative
            ("bad", -2.5),
            ("worse", -2.1),
            ("worst", -3.1),
            ("terrible", -2.1),
            ("horrible", -2.5),
            ("awful", -2.0),
            ("poor", -2.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("sad", -2.1),
            ("angry", -2.3),
            ("afraid", -2.0),
            ("fear", -2.2),
            ("fears", -1.8),
            ("worried", -1.2),
            ("worry", -1.9),
            ("concern", -1.2),
            ("concerns", -1.1),
            ("concerned", -1.3),
            ("problem", -1.7),
            ("problems", -1.7),
            ("crisis", -3.1),
            ("risk", -1.1),
            ("risks", -1.1),
            ("risky", -0.8),
            ("uncertain", -1.2),
            ("uncertainty", -1.4),
            ("loss", -1.3),
            ("losses", -1.7),
            ("lose", -1.7),
            ("losing", -1.6),
            ("lost", -1.3),
            ("fail", -2.5),
            ("failed", -2.3),
            ("failure", -2.3),
            ("weak", -1.9),
            ("weaker", -1.6),
            ("hurt", -2.4),
            ("hurts", -2.1),
            ("damage", -2.2),
            ("damaged", -1.9),
            ("harm", -2.5),
            ("pain", -2.3),
            ("kill", -3.7),
            ("killing", -3.4),
            ("crash", -1.7),
            ("crashed", -1.8),
            ("collapse", -2.2),
            ("decline", -1.3),
            ("declining", -1.4),
            ("drop", -1.1),
            ("dropped", -1.1),
            ("plunge", -1.8),
            ("bearish", -1.8),
            ("recession", -2.1),
            ("inflation", -1.0),
            ("expensive", -0.9),
            ("unfair", -2.1),
            ("stupid", -2.4),
            ("dumb", -2.3),
            ("idiot", -2.3),
            ("corrupt", -3.0),
            ("scam", -2.8),
            ("disaster", -3.1),
            ("threat", -2.4),
            ("threaten", -2.0),
            ("war", -2.9),
            ("punish", -2.4),
            ("penalty", -2.0),
            ("suffer", -2.1),
            ("struggle", -1.4),
            ("struggling", -1.5),
            ("no", -1.2),
            ("wrong", -2.1),
            ("sucks", -1.5),
            ("ugly", -2.3),
            (":(", -1.9),
        ];

        let boosters = [
            ("absolutely", BOOSTER_INCREMENT),
            ("amazingly", BOOSTER_INCREMENT),
            ("awfully", BOOSTER_INCREMENT),
            ("completely", BOOSTER_INCREMENT),
            ("considerably", BOOSTER_INCREMENT),
            ("decidedly", BOOSTER_INCREMENT),
            ("deeply", BOOSTER_INCREMENT),
            ("enormously", BOOSTER_INCREMENT),
            ("entirely", BOOSTER_INCREMENT),
            ("especially", BOOSTER_INCREMENT),
            ("exceptionally", BOOSTER_INCREMENT),
            ("extremely", BOOSTER_INCREMENT),
            ("fully", BOOSTER_INCREMENT),
            ("greatly", BOOSTER_INCREMENT),
            ("highly", BOOSTER_INCREMENT),
            ("hugely", BOOSTER_INCREMENT),
            ("incredibly", BOOSTER_INCREMENT),
            ("intensely", BOOSTER_INCREMENT),
            ("majorly", BOOSTER_INCREMENT),
            ("more", BOOSTER_INCREMENT),
            ("most", BOOSTER_INCREMENT),
            ("particularly", BOOSTER_INCREMENT),
            ("purely", BOOSTER_INCREMENT),
            ("quite", BOOSTER_INCREMENT),
            ("really", BOOSTER_INCREMENT),
            ("remarkably", BOOSTER_INCREMENT),
            ("so", BOOSTER_INCREMENT),
            ("substantially", BOOSTER_INCREMENT),
            ("thoroughly", BOOSTER_INCREMENT),
            ("totally", BOOSTER_INCREMENT),
            ("tremendously", BOOSTER_INCREMENT),
            ("unbelievably", BOOSTER_INCREMENT),
            ("unusually", BOOSTER_INCREMENT),
            ("utterly", BOOSTER_INCREMENT),
            ("very", BOOSTER_INCREMENT),
            ("almost", BOOSTER_DECREMENT),
            ("barely", BOOSTER_DECREMENT),
            ("hardly", BOOSTER_DECREMENT),
            ("less", BOOSTER_DECREMENT),
            ("little", BOOSTER_DECREMENT),
            ("marginally", BOOSTER_DECREMENT),
            ("occasionally", BOOSTER_DECREMENT),
            ("partly", BOOSTER_DECREMENT),
            ("scarcely", BOOSTER_DECREMENT),
            ("slightly", BOOSTER_DECREMENT),
            ("somewhat", BOOSTER_DECREMENT),
        ];

        Self {
            valences: valences
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            boosters: boosters
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            negations: NEGATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Booster scalar for a lowercase word
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// True for explicit negations and any `n't` contraction
    pub fn is_negation(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.negations.contains(&lower) || lower.contains("n't")
    }

    /// Add or override a word valence
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for ValenceLexicon {
    fn get_score(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    fn words(&self) -> Vec<&str> {
        self.valences.keys().map(|s| s.as_str()).collect()
    }
}

/// Adjective polarities for the pattern model.
#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    polarities: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl PolarityLexicon {
    pub fn new() -> Self {
        let polarities = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("fantastic", 0.4),
            ("wonderful", 1.0),
            ("best", 1.0),
            ("better", 0.5),
            ("nice", 0.6),
            ("happy", 0.8),
            ("glad", 0.5),
            ("hopeful", 0.5),
            ("optimistic", 0.5),
            ("positive", 0.23),
            ("strong", 0.43),
            ("stronger", 0.43),
            ("safe", 0.5),
            ("fair", 0.7),
            ("fine", 0.42),
            ("interesting", 0.5),
            ("smart", 0.21),
            ("wise", 0.7),
            ("lucky", 0.33),
            ("funny", 0.25),
            ("successful", 0.75),
            ("profitable", 0.5),
            ("cheap", 0.4),
            ("stable", 0.3),
            ("bullish", 0.5),
            ("high", 0.16),
            ("higher", 0.25),
            ("new", 0.14),
            ("big", 0.0),
            ("important", 0.4),
            ("real", 0.2),
            ("right", 0.29),
            ("sure", 0.5),
            ("true", 0.35),
            ("free", 0.4),
            ("welcome", 0.8),
            ("bad", -0.7),
            ("worse", -0.4),
            ("worst", -1.0),
            ("terrible", -1.0),
            ("horrible", -1.0),
            ("awful", -1.0),
            ("poor", -0.4),
            ("sad", -0.5),
            ("angry", -0.5),
            ("afraid", -0.6),
            ("worried", -0.3),
            ("uncertain", -0.21),
            ("risky", -0.5),
            ("weak", -0.38),
            ("weaker", -0.38),
            ("expensive", -0.5),
            ("unfair", -0.5),
            ("stupid", -0.8),
            ("dumb", -0.38),
            ("corrupt", -0.5),
            ("wrong", -0.5),
            ("ugly", -0.7),
            ("low", -0.1),
            ("lower", -0.1),
            ("hard", -0.29),
            ("difficult", -0.5),
            ("negative", -0.3),
            ("bearish", -0.5),
            ("serious", -0.33),
            ("dead", -0.2),
            ("crazy", -0.6),
            ("impossible", -0.67),
            (":)", 0.5),
            (":(", -0.75),
        ];

        let intensifiers = [
            ("very", 1.3),
            ("really", 1.2),
            ("extremely", 1.5),
            ("incredibly", 1.4),
            ("so", 1.2),
            ("too", 1.2),
            ("highly", 1.3),
            ("totally", 1.3),
            ("quite", 1.1),
            ("pretty", 1.1),
            ("super", 1.4),
            ("slightly", 0.7),
            ("somewhat", 0.8),
            ("barely", 0.6),
        ];

        Self {
            polarities: polarities
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            intensifiers: intensifiers
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            negations: ["not", "never", "no", "n't", "isnt", "isn't", "dont", "don't"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }
}

impl Default for PolarityLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for PolarityLexicon {
    fn get_score(&self, word: &str) -> Option<f64> {
        self.polarities.get(word).copied()
    }

    fn words(&self) -> Vec<&str> {
        self.polarities.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valence_lookup() {
        let lexicon = ValenceLexicon::new();
        assert_eq!(lexicon.get_score("great"), Some(3.1));
        assert!(lexicon.get_score("terrible").unwrap() < 0.0);
        assert!(!lexicon.contains("tariff"));
    }

    #[test]
    fn test_negation_detection() {
        let lexicon = ValenceLexicon::new();
        assert!(lexicon.is_negation("not"));
        assert!(lexicon.is_negation("Wouldn't"));
        assert!(lexicon.is_negation("shouldn't've"));
        assert!(!lexicon.is_negation("nothingness"));
    }

    #[test]
    fn test_add_word_overrides() {
        let mut lexicon = ValenceLexicon::new();
        lexicon.add_word("Tariff", -1.5);
        assert_eq!(lexicon.get_score("tariff"), Some(-1.5));
    }

    #[test]
    fn test_polarity_scale() {
        let lexicon = PolarityLexicon::new();
        for word in lexicon.words() {
            let score = lexicon.get_score(word).unwrap();
            assert!((-1.0..=1.0).contains(&score), "{} out of range", word);
        }
        assert_eq!(lexicon.intensity("very"), Some(1.3));
    }
}
