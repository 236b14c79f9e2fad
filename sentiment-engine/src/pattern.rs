//! Adjective-averaging polarity model.
//!
//! Scores every lexicon adjective, scaling it by a directly preceding
//! intensifier and flipping it at half strength when a negation occurs within
//! the two words before it. The polarity is the mean of those assessments.

use crate::clean::split_tokens;
use crate::lexicon::{PolarityLexicon, SentimentLexicon};
use crate::scorer::LexicalModel;
use pulse_core::SentimentError;

const NEGATION_FACTOR: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct PatternModel {
    lexicon: PolarityLexicon,
}

impl PatternModel {
    pub fn new() -> Self {
        Self {
            lexicon: PolarityLexicon::new(),
        }
    }

    pub fn with_lexicon(mut self, lexicon: PolarityLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let words: Vec<String> = split_tokens(text)
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect();
        if words.is_empty() {
            return Err(SentimentError::EmptyTokenStream);
        }

        let mut assessments = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(mut score) = self.lexicon.get_score(word) else {
                continue;
            };

            let mut modifier_start = i;
            if i > 0 {
                if let Some(intensity) = self.lexicon.intensity(&words[i - 1]) {
                    score *= intensity;
                    modifier_start = i - 1;
                }
            }

            let window_start = modifier_start.saturating_sub(NEGATION_WINDOW);
            if words[window_start..modifier_start]
                .iter()
                .any(|w| self.lexicon.is_negation(w) || w.ends_with("n't"))
            {
                score *= NEGATION_FACTOR;
            }

            assessments.push(score);
        }

        if assessments.is_empty() {
            return Ok(0.0);
        }

        let polarity = assessments.iter().sum::<f64>() / assessments.len() as f64;
        if !polarity.is_finite() {
            return Err(SentimentError::NonFiniteScore {
                model: "pattern".to_string(),
            });
        }

        Ok(polarity.clamp(-1.0, 1.0))
    }
}

impl LexicalModel for PatternModel {
    type Output = f64;

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn analyze(&self, text: &str) -> Result<f64, SentimentError> {
        self.polarity(text)
    }
}
