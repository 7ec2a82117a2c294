// src/text.rs
//! Text normalization primitives shared by the scorer and the phrase detectors.
//!
//! Everything downstream (lexicon keys, mention checks, stance phrases)
//! assumes the accent-stripped, lowercased form produced here.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// \w covers letters (incl. extended Latin), digits and underscore; (?u) enables Unicode
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\w+").expect("word regex"));

/// NFKD-decompose and drop combining marks ("ótimo" -> "otimo").
fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Accent-free, lowercased, single-spaced, trimmed form of `text`.
/// Total function: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    strip_accents(text)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word tokens after accent stripping and lowercasing; punctuation and
/// whitespace act as separators and are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    let flat = strip_accents(text).to_lowercase();
    WORD_RE
        .find_iter(&flat)
        .map(|m| m.as_str().to_string())
        .collect()
}
