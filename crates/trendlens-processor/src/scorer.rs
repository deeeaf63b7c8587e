//! Lexicon-based polarity/subjectivity scorer for post titles and captions.

use std::collections::HashMap;

use trendlens_core::{LexiconEntry, ScoringConfig, SentimentResult};

use crate::error::ProcessorError;
use crate::text::clean_text;

/// Built-in word weights as `(word, polarity, subjectivity)`.
///
/// Polarity in `[-1.0, 1.0]`, subjectivity in `[0.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64, f64)] = &[
    // Positive signals
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("brilliant", 0.9, 1.0),
    ("cool", 0.35, 0.65),
    ("cute", 0.5, 1.0),
    ("delicious", 1.0, 1.0),
    ("enjoy", 0.4, 0.5),
    ("epic", 0.5, 0.6),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.3, 0.8),
    ("fantastic", 0.4, 0.9),
    ("favorite", 0.5, 1.0),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.4),
    ("incredible", 0.9, 0.9),
    ("inspiring", 0.5, 0.6),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("recommend", 0.4, 0.5),
    ("success", 0.6, 0.5),
    ("win", 0.8, 0.4),
    ("wonderful", 1.0, 1.0),
    // Negative signals
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("crash", -0.5, 0.3),
    ("dangerous", -0.6, 0.9),
    ("disappointing", -0.6, 0.7),
    ("disaster", -0.8, 0.6),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("fake", -0.5, 1.0),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("scam", -0.8, 0.7),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("useless", -0.5, 0.2),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

/// Words that flip (and dampen) the polarity of the hit that follows.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "doesnt", "didnt", "isnt", "wasnt", "cant", "wont", "aint",
];

/// Words that strengthen the hit that follows.
const INTENSIFIERS: &[&str] = &["very", "really", "so", "extremely", "super", "totally"];

const NEGATION_FACTOR: f64 = -0.5;
const INTENSIFIER_FACTOR: f64 = 1.3;
/// How many modifier words before a hit are considered.
const MODIFIER_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy)]
struct WordWeight {
    polarity: f64,
    subjectivity: f64,
}

/// Deterministic bag-of-words sentiment scorer.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: HashMap<String, WordWeight>,
    threshold: f64,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(std::iter::empty(), ScoringConfig::default().sentiment_threshold)
    }
}

impl SentimentScorer {
    /// Built-in lexicon extended (or overridden) by `extra`.
    ///
    /// `extra` is not validated here; see [`ScoringConfig::validate`].
    #[must_use]
    pub fn new(extra: impl IntoIterator<Item = LexiconEntry>, threshold: f64) -> Self {
        let mut lexicon: HashMap<String, WordWeight> = LEXICON
            .iter()
            .map(|&(word, polarity, subjectivity)| {
                (
                    word.to_string(),
                    WordWeight {
                        polarity,
                        subjectivity,
                    },
                )
            })
            .collect();

        for entry in extra {
            lexicon.insert(
                entry.word.trim().to_lowercase(),
                WordWeight {
                    polarity: entry.polarity,
                    subjectivity: entry.subjectivity,
                },
            );
        }

        Self { lexicon, threshold }
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.extra_lexicon.iter().cloned(), config.sentiment_threshold)
    }

    /// Score `text`, substituting the neutral reading on any failure.
    #[must_use]
    pub fn analyze(&self, text: &str) -> SentimentResult {
        self.try_analyze(text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "sentiment fell back to neutral");
            SentimentResult::neutral()
        })
    }

    /// Score `text` against the lexicon.
    ///
    /// Polarity is the mean of matched word polarities (after negation and
    /// intensifier adjustments), subjectivity the mean of their
    /// subjectivities. Text without lexicon words scores `0.0 / 0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Sentiment`] if the lexicon yields a
    /// non-finite score.
    pub fn try_analyze(&self, text: &str) -> Result<SentimentResult, ProcessorError> {
        // Contractions collapse to a single token ("don't" -> "dont") so the
        // negator list can see them.
        let normalized = clean_text(&text.replace(['\'', '\u{2019}'], "")).to_lowercase();
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        let mut polarity_sum = 0.0_f64;
        let mut subjectivity_sum = 0.0_f64;
        let mut hits = 0_u32;

        for (idx, token) in tokens.iter().enumerate() {
            let Some(weight) = self.lexicon.get(*token) else {
                continue;
            };

            let mut polarity = weight.polarity;
            for prev in tokens[..idx].iter().rev().take(MODIFIER_WINDOW) {
                if NEGATORS.contains(prev) {
                    polarity *= NEGATION_FACTOR;
                } else if INTENSIFIERS.contains(prev) {
                    polarity *= INTENSIFIER_FACTOR;
                } else {
                    break;
                }
            }

            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += weight.subjectivity;
            hits += 1;
        }

        if hits == 0 {
            return Ok(SentimentResult::neutral());
        }

        let denom = f64::from(hits);
        let polarity = polarity_sum / denom;
        let subjectivity = subjectivity_sum / denom;

        if !polarity.is_finite() || !subjectivity.is_finite() {
            return Err(ProcessorError::Sentiment(format!(
                "non-finite score (polarity {polarity}, subjectivity {subjectivity})"
            )));
        }

        Ok(SentimentResult::from_scores(
            polarity.clamp(-1.0, 1.0),
            subjectivity.clamp(0.0, 1.0),
            self.threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use trendlens_core::SentimentLabel;

    use super::*;

    fn scorer() -> SentimentScorer {
        SentimentScorer::default()
    }

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(scorer().analyze(""), SentimentResult::neutral());
    }

    #[test]
    fn whitespace_only_is_neutral() {
        assert_eq!(scorer().analyze("   "), SentimentResult::neutral());
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(
            scorer().analyze("the quick brown fox"),
            SentimentResult::neutral()
        );
    }

    #[test]
    fn positive_keyword_is_positive() {
        let result = scorer().analyze("this video is great");
        assert!((result.polarity - 0.8).abs() < 1e-9, "got {result:?}");
        assert!((result.subjectivity - 0.75).abs() < 1e-9);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!((result.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn negative_keyword_is_negative() {
        let result = scorer().analyze("worst upload ever");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!((result.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_text_averages_hits() {
        // great (0.8) + bad (-0.7) => 0.05, inside the neutral band
        let result = scorer().analyze("great idea, bad execution");
        assert!((result.polarity - 0.05).abs() < 1e-9, "got {result:?}");
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn negation_flips_and_dampens() {
        let result = scorer().analyze("this is not good");
        assert!((result.polarity - (-0.35)).abs() < 1e-9, "got {result:?}");
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[test]
    fn contraction_negates() {
        let result = scorer().analyze("I don't love it");
        assert!((result.polarity - (-0.25)).abs() < 1e-9, "got {result:?}");
    }

    #[test]
    fn intensifier_strengthens_and_clamps() {
        let result = scorer().analyze("really good");
        assert!((result.polarity - 0.91).abs() < 1e-9, "got {result:?}");

        let result = scorer().analyze("so awesome");
        assert!((result.polarity - 1.0).abs() < 1e-9, "got {result:?}");
    }

    #[test]
    fn modifier_window_stops_at_plain_words() {
        // "not" is separated from "good" by a non-modifier word.
        let result = scorer().analyze("not a good");
        assert!((result.polarity - 0.7).abs() < 1e-9, "got {result:?}");
    }

    #[test]
    fn punctuation_and_urls_are_ignored() {
        let result = scorer().analyze("Great!!! https://great.example/bad");
        assert!((result.polarity - 0.8).abs() < 1e-9, "got {result:?}");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            scorer().analyze("AMAZING").label,
            SentimentLabel::Positive
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let text = "Epic win, but the ending was boring";
        assert_eq!(scorer().analyze(text), scorer().analyze(text));
    }

    #[test]
    fn extra_lexicon_overrides_builtin() {
        let extra = vec![LexiconEntry {
            word: "Sick".to_string(),
            polarity: 0.7,
            subjectivity: 0.8,
        }];
        let scorer = SentimentScorer::new(extra, 0.1);
        assert_eq!(scorer.analyze("sick trick").label, SentimentLabel::Positive);
    }

    #[test]
    fn non_finite_lexicon_is_an_error_and_degrades_to_neutral() {
        let extra = vec![LexiconEntry {
            word: "glitch".to_string(),
            polarity: f64::NAN,
            subjectivity: 0.5,
        }];
        let scorer = SentimentScorer::new(extra, 0.1);
        assert!(matches!(
            scorer.try_analyze("glitch"),
            Err(ProcessorError::Sentiment(_))
        ));
        assert_eq!(scorer.analyze("glitch"), SentimentResult::neutral());
    }

    #[test]
    fn polarity_and_subjectivity_stay_in_range() {
        let text = "awesome perfect excellent wonderful best incredible brilliant";
        let result = scorer().analyze(text);
        assert!((-1.0..=1.0).contains(&result.polarity));
        assert!((0.0..=1.0).contains(&result.subjectivity));
    }
}
