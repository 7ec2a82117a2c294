// src/lexicon.rs
//! Polarity lexicon: word strengths plus negators, intensifiers and
//! diminishers. Constructed once, validated, never mutated.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Negation scope: how many tokens back the scorer looks for a negator.
pub const NEGATION_WINDOW: usize = 3;

/// Tokens that close a negation scope early (accent-stripped forms of
/// "mas", "porém", "só").
pub const CLAUSE_BOUNDARIES: &[&str] = &["mas", "porem", "so"];

static BUILTIN_PT: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../lexicon_pt.toml");
    Lexicon::from_toml_str(raw).expect("valid built-in lexicon")
});

/// Immutable scoring tables. Keys must be in the tokenizer's normalized form
/// (accent-free, lowercase); lookups are exact.
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    pub positive: HashMap<String, f64>,
    pub negative: HashMap<String, f64>,
    pub negators: Vec<String>,
    pub intensifiers: HashMap<String, f64>,
    pub diminishers: HashMap<String, f64>,
}

impl Lexicon {
    /// The Portuguese lexicon embedded in the binary.
    pub fn builtin_pt() -> &'static Lexicon {
        &BUILTIN_PT
    }

    /// Parse and validate a lexicon from TOML text.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let lex: Lexicon = toml::from_str(raw).context("failed to parse lexicon TOML")?;
        lex.validate()?;
        Ok(lex)
    }

    /// Load a lexicon override from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read lexicon at {}", path.as_ref().display()))?;
        Self::from_toml_str(&raw)
    }

    /// Rejects lexicons the scorer cannot interpret consistently. The
    /// positive/negative tables must be disjoint so polarity lookup stays a
    /// plain two-map probe.
    fn validate(&self) -> anyhow::Result<()> {
        for word in self.positive.keys() {
            if self.negative.contains_key(word) {
                bail!("lexicon word `{word}` appears in both positive and negative tables");
            }
        }
        for (word, strength) in &self.positive {
            if *strength <= 0.0 {
                bail!("positive strength for `{word}` must be > 0, got {strength}");
            }
        }
        for (word, strength) in &self.negative {
            if *strength >= 0.0 {
                bail!("negative strength for `{word}` must be < 0, got {strength}");
            }
        }
        for (word, mult) in &self.intensifiers {
            if *mult <= 1.0 {
                bail!("intensifier multiplier for `{word}` must be > 1, got {mult}");
            }
        }
        for (word, mult) in &self.diminishers {
            if *mult <= 0.0 || *mult >= 1.0 {
                bail!("diminisher multiplier for `{word}` must be in (0, 1), got {mult}");
            }
        }
        Ok(())
    }

    /// Signed polarity for a token (0.0 when absent from both tables).
    pub(crate) fn polarity(&self, term: &str) -> f64 {
        if let Some(s) = self.positive.get(term) {
            return *s;
        }
        if let Some(s) = self.negative.get(term) {
            return *s;
        }
        0.0
    }

    pub(crate) fn is_negator(&self, term: &str) -> bool {
        self.negators.iter().any(|n| n == term)
    }
}
