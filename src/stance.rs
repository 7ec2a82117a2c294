// src/stance.rs
//! Article-reference and agree/disagree detection over normalized text.
//!
//! The phrase lists are ordered data, not code: disagreement is checked
//! before agreement because several disagreement phrases are negated
//! agreement forms ("nao concordo" contains "concordo") and would otherwise
//! false-positive as agreement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// Phrases that anchor a comment to the article itself ("farol" is the
/// news site the scraper targets).
const ARTICLE_REFERENCE_PHRASES: &[&str] = &[
    "materia",
    "noticia",
    "reportagem",
    "esta materia",
    "essa materia",
    "esta noticia",
    "essa noticia",
    "esta reportagem",
    "essa reportagem",
    "a materia",
    "a noticia",
    "a reportagem",
    "no farol",
    "do farol",
];

/// Checked first: negated agreement, falsehood claims, "fake news".
const DISAGREE_PHRASES: &[&str] = &[
    "discordo",
    "nao concordo",
    "mentira",
    "e mentira",
    "isso e mentira",
    "fake news",
    "fake",
    "nao e verdade",
    "falso",
    "nao confere",
    "improcedente",
    "nao procede",
    "errado",
    "nada a ver",
];

const AGREE_PHRASES: &[&str] = &[
    "concordo",
    "concorda",
    "verdade",
    "e verdade",
    "isso e verdade",
    "confere",
    "procedente",
    "ta certo",
    "esta certo",
    "correto",
    "isso mesmo",
    "bem dito",
];

/// A comment's explicit position toward the article it responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Agrees,
    Disagrees,
    Unclear,
}

impl Stance {
    pub fn as_str(self) -> &'static str {
        match self {
            Stance::Agrees => "agrees",
            Stance::Disagrees => "disagrees",
            Stance::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when the comment explicitly talks about the article/news/report.
pub fn references_article(text: &str) -> bool {
    let t = normalize(text);
    ARTICLE_REFERENCE_PHRASES.iter().any(|p| t.contains(p))
}

/// Disagreement patterns take precedence over agreement patterns.
pub fn detect_stance(text: &str) -> Stance {
    let t = normalize(text);
    if DISAGREE_PHRASES.iter().any(|p| t.contains(p)) {
        return Stance::Disagrees;
    }
    if AGREE_PHRASES.iter().any(|p| t.contains(p)) {
        return Stance::Agrees;
    }
    Stance::Unclear
}
