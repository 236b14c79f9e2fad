//! Rule-based valence model in the style of VADER.
//!
//! Each token receives a valence from [`ValenceLexicon`], adjusted for
//! capitalization, preceding boosters, preceding negations and a contrastive
//! "but". The summed valence plus punctuation emphasis is squashed into a
//! compound score in [-1, 1]; positive/negative/neutral proportions sum to 1.

use crate::clean::split_tokens;
use crate::lexicon::{SentimentLexicon, ValenceLexicon};
use crate::scorer::LexicalModel;
use pulse_core::SentimentError;

/// Emphasis added for an ALL CAPS sentiment word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier for a negated valence.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant approximating the maximum expected valence sum.
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_EXCLAMATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Default)]
pub struct VaderModel {
    lexicon: ValenceLexicon,
}

impl VaderModel {
    pub fn new() -> Self {
        Self {
            lexicon: ValenceLexicon::new(),
        }
    }

    pub fn with_lexicon(mut self, lexicon: ValenceLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn polarity_scores(&self, text: &str) -> Result<RuleScores, SentimentError> {
        let tokens = split_tokens(text);
        if tokens.is_empty() {
            return Err(SentimentError::EmptyTokenStream);
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differential = has_caps_differential(&tokens);

        let mut sentiments = Vec::with_capacity(tokens.len());
        for (i, lower) in lowered.iter().enumerate() {
            if self.lexicon.booster(lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            if lower == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
                sentiments.push(0.0);
                continue;
            }

            sentiments.push(self.token_valence(i, &tokens, &lowered, caps_differential));
        }

        apply_but_rule(&lowered, &mut sentiments);

        let emphasis = punctuation_emphasis(text);
        let scores = self.aggregate(&sentiments, emphasis);

        for (model, value) in [
            ("compound", scores.compound),
            ("positive", scores.positive),
            ("negative", scores.negative),
            ("neutral", scores.neutral),
        ] {
            if !value.is_finite() {
                return Err(SentimentError::NonFiniteScore {
                    model: format!("vader.{}", model),
                });
            }
        }

        Ok(scores)
    }

    fn token_valence(
        &self,
        i: usize,
        tokens: &[String],
        lowered: &[String],
        caps_differential: bool,
    ) -> f64 {
        let Some(mut valence) = self.lexicon.get_score(&lowered[i]) else {
            return 0.0;
        };

        if caps_differential && is_all_caps(&tokens[i]) {
            valence += CAPS_INCREMENT * valence.signum();
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let preceding = &lowered[i - distance];
            if self.lexicon.contains(preceding) {
                continue;
            }

            if let Some(scalar) = self.lexicon.booster(preceding) {
                let mut boost = scalar * valence.signum();
                if caps_differential && is_all_caps(&tokens[i - distance]) {
                    boost += CAPS_INCREMENT * valence.signum();
                }
                boost *= match distance {
                    2 => 0.95,
                    3 => 0.9,
                    _ => 1.0,
                };
                valence += boost;
            }

            valence = self.negation_check(valence, lowered, i, distance);
        }

        valence
    }

    fn negation_check(&self, valence: f64, lowered: &[String], i: usize, distance: usize) -> f64 {
        let preceding = &lowered[i - distance];
        if distance >= 2
            && preceding == "never"
            && matches!(lowered[i - 1].as_str(), "so" | "this")
        {
            return valence * 1.25;
        }
        if self.lexicon.is_negation(preceding) {
            return valence * NEGATION_SCALAR;
        }
        valence
    }

    fn aggregate(&self, sentiments: &[f64], emphasis: f64) -> RuleScores {
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let mut positive_sum = 0.0;
        let mut negative_sum = 0.0;
        let mut neutral_count = 0.0;
        for &s in sentiments {
            if s > 0.0 {
                // +1 compensates for neutral words counted as 1
                positive_sum += s + 1.0;
            } else if s < 0.0 {
                negative_sum += s - 1.0;
            } else {
                neutral_count += 1.0;
            }
        }

        if positive_sum > negative_sum.abs() {
            positive_sum += emphasis;
        } else if positive_sum < negative_sum.abs() {
            negative_sum -= emphasis;
        }

        let total = positive_sum + negative_sum.abs() + neutral_count;
        if total == 0.0 {
            return RuleScores {
                compound,
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
            };
        }

        RuleScores {
            compound,
            positive: (positive_sum / total).abs(),
            negative: (negative_sum / total).abs(),
            neutral: (neutral_count / total).abs(),
        }
    }
}

impl LexicalModel for VaderModel {
    type Output = RuleScores;

    fn name(&self) -> &'static str {
        "vader"
    }

    fn analyze(&self, text: &str) -> Result<RuleScores, SentimentError> {
        self.polarity_scores(text)
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic())
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

/// True when some, but not all, tokens are ALL CAPS.
fn has_caps_differential(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Words before "but" count half, words after it count one and a half.
fn apply_but_rule(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < but_index {
            *sentiment *= 0.5;
        } else if i > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => 0.96,
    };

    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}
