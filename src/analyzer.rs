// src/analyzer.rs
//! Targeted lexicon scorer.
//!
//! `analyze` walks the token stream once: each polarized token may be scaled
//! by an intensifier/diminisher in the immediately preceding position and
//! sign-flipped by a negator found within a fixed backward window. Mention
//! detection (full name substring or surname token) feeds both the
//! confidence bonus and the attribution cascade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::{Lexicon, CLAUSE_BOUNDARIES, NEGATION_WINDOW};
use crate::text::{normalize, tokenize};

/// Deadband around zero: |avg| must clear it for a non-neutral label.
const LABEL_DEADBAND: f64 = 0.2;

/// Sentiment label derived from the averaged polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }

    /// positive <-> negative; neutral has no opposite.
    pub fn opposite(self) -> Self {
        match self {
            Label::Positive => Label::Negative,
            Label::Negative => Label::Positive,
            Label::Neutral => Label::Neutral,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one `analyze` call. `hits == 0` implies `score == 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: Label,
    /// Signed average polarity over contributing tokens, rounded to 4 places.
    pub score: f64,
    /// In [0, 1], rounded to 3 places.
    pub confidence: f64,
    /// Count of tokens that contributed non-zero polarity.
    pub hits: usize,
    /// Whether any supplied target-name variant occurs in the text.
    pub mentioned: bool,
}

impl SentimentResult {
    /// Determinate = at least one polarized hit and a non-neutral label.
    pub fn is_determinate(&self) -> bool {
        self.hits > 0 && self.label != Label::Neutral
    }
}

pub(crate) fn round_to(x: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (x * factor).round() / factor
}

/// Scorer over an injected, immutable lexicon. Cheap to clone and safe to
/// share read-only across worker threads.
#[derive(Debug, Clone)]
pub struct TargetedAnalyzer {
    lexicon: Lexicon,
}

impl TargetedAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Analyzer over the built-in Portuguese lexicon.
    pub fn default_pt() -> Self {
        Self::new(Lexicon::builtin_pt().clone())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score `text` for the person described by `target_names` (full name
    /// plus derived variants such as the surname). Never fails: empty or
    /// unscorable text yields the documented neutral defaults.
    pub fn analyze(&self, text: &str, target_names: &[String]) -> SentimentResult {
        let toks = tokenize(text);
        if toks.is_empty() {
            return SentimentResult {
                label: Label::Neutral,
                score: 0.0,
                confidence: 0.2,
                hits: 0,
                mentioned: false,
            };
        }

        let mentioned = target_mentioned(&toks, target_names);

        let mut sum = 0.0;
        let mut hits = 0usize;
        for i in 0..toks.len() {
            let mut pol = self.lexicon.polarity(&toks[i]);
            if pol == 0.0 {
                continue;
            }

            // Modulation comes only from the single preceding token. With a
            // validated lexicon the two lookups are mutually exclusive.
            let mut mult = 1.0;
            if i > 0 {
                let prev = toks[i - 1].as_str();
                if let Some(m) = self.lexicon.intensifiers.get(prev) {
                    mult *= m;
                }
                if let Some(m) = self.lexicon.diminishers.get(prev) {
                    mult *= m;
                }
            }

            if self.negated_before(&toks, i) {
                pol = -pol;
            }

            sum += pol * mult;
            hits += 1;
        }

        if hits == 0 {
            let confidence = if mentioned { (0.3 + 0.2f64).min(1.0) } else { 0.3 };
            return SentimentResult {
                label: Label::Neutral,
                score: 0.0,
                confidence,
                hits: 0,
                mentioned,
            };
        }

        let avg = sum / hits as f64;
        let label = if avg > LABEL_DEADBAND {
            Label::Positive
        } else if avg < -LABEL_DEADBAND {
            Label::Negative
        } else {
            Label::Neutral
        };

        let mut confidence = (0.5 + avg.abs().min(0.5)).min(1.0);
        if mentioned {
            confidence = (confidence + 0.15).min(1.0);
        }

        SentimentResult {
            label,
            score: round_to(avg, 4),
            confidence: round_to(confidence, 3),
            hits,
            mentioned,
        }
    }

    /// Negator within `NEGATION_WINDOW` tokens before `i`; a clause-boundary
    /// token encountered first closes the scope.
    fn negated_before(&self, toks: &[String], i: usize) -> bool {
        let mut steps = 0;
        let mut j = i;
        while j > 0 && steps < NEGATION_WINDOW {
            j -= 1;
            let t = toks[j].as_str();
            if self.lexicon.is_negator(t) {
                return true;
            }
            if CLAUSE_BOUNDARIES.contains(&t) {
                return false;
            }
            steps += 1;
        }
        false
    }
}

/// Mention check against already-tokenized text: the normalized full name as
/// a substring of the joined tokens, or the name's last component (surname)
/// as a token. Short-circuits on the first match.
fn target_mentioned(toks: &[String], target_names: &[String]) -> bool {
    if target_names.is_empty() {
        return false;
    }
    let flat = toks.join(" ");
    for name in target_names {
        let nt = normalize(name);
        if nt.is_empty() {
            continue;
        }
        if flat.contains(&nt) {
            return true;
        }
        if let Some(surname) = nt.rsplit(' ').next() {
            if toks.iter().any(|t| t == surname) {
                return true;
            }
        }
    }
    false
}
