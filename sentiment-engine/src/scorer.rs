use crate::clean::clean_text;
use crate::pattern::PatternModel;
use crate::vader::{RuleScores, VaderModel};
use pulse_core::{round_to, SentimentError, SentimentLabel, SentimentRecord};
use tracing::debug;

/// Text shorter than this, after trimming, is not scored.
pub const MIN_TEXT_CHARS: usize = 5;
const SCORE_DECIMALS: i32 = 4;

/// A lexicon-driven sentiment model.
pub trait LexicalModel {
    type Output;

    fn name(&self) -> &'static str;

    fn analyze(&self, text: &str) -> Result<Self::Output, SentimentError>;
}

/// Blends a rule-based model and a pattern model into one [`SentimentRecord`].
///
/// Scoring never fails: short, empty or unscorable text yields
/// [`SentimentRecord::neutral`].
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer<R = VaderModel, P = PatternModel> {
    rule_model: R,
    pattern_model: P,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self::with_models(VaderModel::new(), PatternModel::new())
    }
}

impl<R, P> SentimentScorer<R, P>
where
    R: LexicalModel<Output = RuleScores>,
    P: LexicalModel<Output = f64>,
{
    pub fn with_models(rule_model: R, pattern_model: P) -> Self {
        Self {
            rule_model,
            pattern_model,
        }
    }

    pub fn score(&self, text: &str) -> SentimentRecord {
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return SentimentRecord::neutral();
        }

        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return SentimentRecord::neutral();
        }

        match self.try_score(&cleaned) {
            Ok(record) => record,
            Err(e) => {
                debug!("Falling back to neutral sentiment: {}", e);
                SentimentRecord::neutral()
            }
        }
    }

    pub fn score_batch(&self, texts: &[String]) -> Vec<SentimentRecord> {
        texts.iter().map(|t| self.score(t)).collect()
    }

    fn try_score(&self, cleaned: &str) -> Result<SentimentRecord, SentimentError> {
        let rule: RuleScores = self.rule_model.analyze(cleaned)?;
        let polarity = self.pattern_model.analyze(cleaned)?;

        let combined_score = round_to((rule.compound + polarity) / 2.0, SCORE_DECIMALS);
        debug!(
            "{} compound {:.4}, {} polarity {:.4}, combined {:.4}",
            self.rule_model.name(),
            rule.compound,
            self.pattern_model.name(),
            polarity,
            combined_score
        );

        Ok(SentimentRecord {
            compound: round_to(rule.compound, SCORE_DECIMALS),
            positive: round_to(rule.positive, SCORE_DECIMALS),
            negative: round_to(rule.negative, SCORE_DECIMALS),
            neutral: round_to(rule.neutral, SCORE_DECIMALS),
            polarity: round_to(polarity, SCORE_DECIMALS),
            combined_score,
            label: SentimentLabel::from_score(combined_score),
            text_length: cleaned.chars().count(),
        })
    }
}
