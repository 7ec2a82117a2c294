// src/attribution.rs
//! Final-label cascade: decides whose opinion a comment expresses about a
//! person and with which sentiment. Rules are tried in order; the first
//! match wins.
//!
//! A comment that never names the person can still count toward that
//! person's tally, but only when it is anchored to the article and either
//! states an explicit stance or carries its own determinate tone to combine
//! with the article's known sentiment about the person.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyzer::{round_to, Label, SentimentResult};
use crate::stance::Stance;

/// Which cascade rule produced the final label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    DirectComment,
    NewsAlignmentStance,
    NewsAlignment,
    Undetermined,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::DirectComment => "direct_comment",
            Origin::NewsAlignmentStance => "news_alignment_stance",
            Origin::NewsAlignment => "news_alignment",
            Origin::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final per-(comment, person) verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionDecision {
    pub label: Label,
    pub confidence: f64,
    pub origin: Origin,
}

fn undetermined(comment_confidence: f64) -> AttributionDecision {
    AttributionDecision {
        label: Label::Neutral,
        confidence: (comment_confidence * 0.5).clamp(0.25, 0.5),
        origin: Origin::Undetermined,
    }
}

/// Derive the final sentiment for one comment about one person.
///
/// `article` is the article's own sentiment toward the same person; `None`
/// means the article carried no usable signal and routes through the
/// undetermined rules, never an error.
pub fn derive_final(
    comment: &SentimentResult,
    article: Option<&SentimentResult>,
    mentioned: bool,
    references_article: bool,
    stance: Stance,
) -> AttributionDecision {
    // 1) The comment names the person: its own sentiment stands.
    if mentioned {
        return AttributionDecision {
            label: comment.label,
            confidence: comment.confidence,
            origin: Origin::DirectComment,
        };
    }

    // 2) Not anchored to the article either: unrelated chatter.
    if !references_article {
        return undetermined(comment.confidence);
    }

    if let Some(article) = article {
        if article.is_determinate() {
            match stance {
                // 3a) Explicit stance toward the article.
                Stance::Agrees | Stance::Disagrees => {
                    let label = if stance == Stance::Agrees {
                        article.label
                    } else {
                        article.label.opposite()
                    };
                    let confidence = round_to((0.6 + 0.4 * article.confidence).min(1.0), 3);
                    return AttributionDecision {
                        label,
                        confidence,
                        origin: Origin::NewsAlignmentStance,
                    };
                }
                // 3b) No stance: align the comment's own tone with the
                // article's position on the person.
                Stance::Unclear => {
                    if comment.is_determinate() {
                        let label = if article.label == Label::Positive {
                            comment.label
                        } else {
                            comment.label.opposite()
                        };
                        let confidence = round_to(
                            (0.5 + (article.confidence + comment.confidence) / 2.0).min(1.0),
                            3,
                        );
                        return AttributionDecision {
                            label,
                            confidence,
                            origin: Origin::NewsAlignment,
                        };
                    }
                }
            }
        }
    }

    // 4) No usable signal.
    undetermined(comment.confidence)
}
