// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analyzer;
pub mod attribution;
pub mod config;
pub mod lexicon;
pub mod report;
pub mod stance;
pub mod store;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::{Label, SentimentResult, TargetedAnalyzer};
pub use crate::attribution::{derive_final, AttributionDecision, Origin};
pub use crate::lexicon::Lexicon;
pub use crate::stance::{detect_stance, references_article, Stance};
