//! Sentiment scoring abstraction and the built-in lexicon scorer.
//!
//! Defines the [`SentimentScorer`] trait that the query pipeline depends on,
//! and [`LexiconScorer`], a deterministic valence-lexicon implementation used
//! by the server binary. Any other scorer (a stub in tests, a model-backed
//! scorer) can be injected in its place via `Arc<dyn SentimentScorer>`.
//!
//! # Scoring rules
//!
//! [`LexiconScorer`] assigns each word a valence from a built-in lexicon and
//! then adjusts it:
//!
//! - **Boosters / dampeners** ("very", "slightly", ...) within three words
//!   before push the valence away from / toward zero, with less effect the
//!   further away they are.
//! - **Negation** ("not", "never", "-n't", ...) within three words before
//!   flips and shrinks the valence (× −0.74).
//! - **ALL CAPS** words in otherwise mixed-case text gain emphasis.
//! - **"but"** halves the weight of words before it and raises the weight of
//!   words after it by half.
//! - **Exclamation marks** (up to four) and repeated question marks add
//!   emphasis in the direction of the overall sum.
//!
//! The summed valence `s` is normalized to `compound = s / sqrt(s² + 15)`.
//! `pos` / `neg` / `neu` are the shares of positive, negative and neutral
//! words.

use std::collections::{HashMap, HashSet};

use crate::models::SentimentScore;

/// Scores the polarity of a piece of text.
///
/// Implementations must be deterministic and side-effect free: the query
/// pipeline calls [`score`](Self::score) from concurrent requests without
/// synchronization.
pub trait SentimentScorer: Send + Sync {
    /// Short identifier used in logs (e.g. `"lexicon"`).
    fn name(&self) -> &str;
    /// Compute the polarity of `text`.
    fn score(&self, text: &str) -> SentimentScore;
}

const BOOST_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Word valences on a −4..+4 scale.
const LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clean", 1.7),
    ("comfortable", 1.5),
    ("cozy", 1.9),
    ("delicious", 2.7),
    ("delightful", 2.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("fabulous", 2.4),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("perfectly", 2.4),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("polite", 1.5),
    ("recommend", 1.5),
    ("recommended", 1.6),
    ("superb", 3.1),
    ("tasty", 2.1),
    ("thanks", 1.9),
    ("welcoming", 2.0),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("yum", 2.2),
    ("yummy", 2.4),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bland", -1.0),
    ("boring", -1.3),
    ("broken", -1.8),
    ("burnt", -1.4),
    ("complain", -1.8),
    ("dirty", -1.9),
    ("disappointed", -2.2),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dreadful", -2.7),
    ("expensive", -0.8),
    ("gross", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("inedible", -2.1),
    ("lousy", -2.5),
    ("mediocre", -1.0),
    ("mess", -1.5),
    ("nasty", -2.6),
    ("overpriced", -1.4),
    ("pathetic", -2.4),
    ("poor", -2.1),
    ("problem", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("sick", -2.3),
    ("slow", -0.9),
    ("stale", -1.4),
    ("terrible", -2.1),
    ("unfortunately", -1.4),
    ("unhappy", -1.8),
    ("unpleasant", -2.1),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOSTERS: &[&str] = &[
    "absolutely",
    "amazingly",
    "completely",
    "deeply",
    "especially",
    "exceptionally",
    "extremely",
    "highly",
    "hugely",
    "incredibly",
    "most",
    "really",
    "so",
    "super",
    "totally",
    "truly",
    "very",
];

const DAMPENERS: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "less",
    "marginally",
    "mostly",
    "partly",
    "slightly",
    "somewhat",
];

const NEGATIONS: &[&str] = &[
    "ain't", "aint", "cannot", "neither", "never", "no", "none", "nope", "nor", "not", "nothing",
    "nowhere", "without",
];

/// Deterministic valence-lexicon sentiment scorer.
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashSet<&'static str>,
    dampeners: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            dampeners: DAMPENERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.contains("n't")
    }

    /// Booster/dampener adjustment for a modifier word, signed to match `valence`.
    fn modifier_boost(&self, token: &str, word: &str, valence: f64, caps_differ: bool) -> f64 {
        let mut boost = if self.boosters.contains(word) {
            BOOST_INCREMENT
        } else if self.dampeners.contains(word) {
            -BOOST_INCREMENT
        } else {
            return 0.0;
        };
        if valence < 0.0 {
            boost = -boost;
        }
        if caps_differ && is_all_caps(token) {
            boost += CAPS_INCREMENT * valence.signum();
        }
        boost
    }

    /// Valence of the token at `i`, adjusted by emphasis and its left context.
    fn token_valence(&self, tokens: &[&str], words: &[String], i: usize, caps_differ: bool) -> f64 {
        let Some(&base) = self.lexicon.get(words[i].as_str()) else {
            return 0.0;
        };
        let mut valence = base;
        if caps_differ && is_all_caps(tokens[i]) {
            valence += CAPS_INCREMENT * valence.signum();
        }

        let mut negated = false;
        for distance in 1..=3usize {
            if distance > i {
                break;
            }
            let j = i - distance;
            let boost = self.modifier_boost(tokens[j], &words[j], valence, caps_differ);
            let decay = match distance {
                1 => 1.0,
                2 => 0.95,
                _ => 0.9,
            };
            valence += boost * decay;
            negated |= self.is_negation(&words[j]);
        }
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> SentimentScore {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return SentimentScore::default();
        }
        let words: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
        let caps_differ = caps > 0 && caps < tokens.len();

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| {
                if self.boosters.contains(words[i].as_str())
                    || self.dampeners.contains(words[i].as_str())
                {
                    0.0
                } else {
                    self.token_valence(&tokens, &words, i, caps_differ)
                }
            })
            .collect();

        if let Some(but) = words.iter().position(|w| w == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but {
                    *s *= 0.5;
                } else if i > but {
                    *s *= 1.5;
                }
            }
        }

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        // Every token contributes at least 1.0, so `total` is positive here.
        let total = pos_sum + neg_sum.abs() + neu_count;
        SentimentScore {
            neg: round_to(neg_sum.abs() / total, 3),
            neu: round_to(neu_count / total, 3),
            pos: round_to(pos_sum / total, 3),
            compound: round_to(compound, 4),
        }
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
