// src/report.rs
//! Report assembly: one sentiment row per (comment, person), plus the
//! per-person aggregate. The article-level sentiment is computed once per
//! (article, person) pair and reused across that article's comments.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::analyzer::{Label, SentimentResult, TargetedAnalyzer};
use crate::attribution::{derive_final, Origin};
use crate::stance::{detect_stance, references_article, Stance};
use crate::store::{ArticleRow, CommentRow};
use crate::text::normalize;

/// Tag identifying the scoring method in every output row.
pub const METHOD_TAG: &str = "lexicon_v1";
/// Lexicon/report version tag.
pub const LEXICON_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DETAILED_REPORT_FILE: &str = "comment_sentiment_by_person.csv";
pub const SUMMARY_REPORT_FILE: &str = "person_sentiment_summary.csv";

/// One detailed report row. Scores and confidences are pre-formatted so the
/// CSV matches the documented precision (4 and 3 decimal places).
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReportRow {
    pub person_id: i64,
    pub person_name: String,
    pub comment_key: String,
    pub article_url: String,
    pub comment_time: String,
    // comment-level analysis
    pub comment_label: Label,
    pub comment_score: String,
    pub comment_confidence: String,
    pub comment_hits: usize,
    pub target_mentioned: u8,
    pub references_article: u8,
    pub stance: Stance,
    // article-level analysis against the same person
    pub article_label: Label,
    pub article_score: String,
    pub article_confidence: String,
    pub article_hits: usize,
    // derived final verdict
    pub final_label: Label,
    pub final_confidence: String,
    pub origin: Origin,
    // metadata
    pub method: &'static str,
    pub version: &'static str,
}

/// Per-person aggregate over the detailed rows.
#[derive(Debug, Clone, Serialize)]
pub struct PersonSummaryRow {
    pub person_id: i64,
    pub person_name: String,
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub pct_positive: String,
    pub pct_negative: String,
    pub pct_neutral: String,
    pub pct_direct_mention: String,
}

/// Target variants for a person: the full name plus its normalized last
/// component (surname).
pub fn target_variants(person_name: &str) -> Vec<String> {
    let mut variants = vec![person_name.to_string()];
    if let Some(surname) = normalize(person_name).rsplit(' ').next() {
        if !surname.is_empty() {
            variants.push(surname.to_string());
        }
    }
    variants
}

/// One article-level result per (article_url, person_id), scored over
/// title + body with the person as target.
pub fn article_sentiments(
    analyzer: &TargetedAnalyzer,
    articles: &[ArticleRow],
) -> HashMap<(String, i64), SentimentResult> {
    let mut map = HashMap::new();
    for article in articles {
        let variants = target_variants(&article.person_name);
        let text = format!(
            "{}\n\n{}",
            article.title.as_deref().unwrap_or(""),
            article.body.as_deref().unwrap_or("")
        );
        let res = analyzer.analyze(&text, &variants);
        map.insert((article.article_url.clone(), article.person_id), res);
    }
    map
}

/// Build the detailed rows: comment analysis, reference/stance detection and
/// the attribution cascade against the precomputed article sentiment.
pub fn build_rows(
    analyzer: &TargetedAnalyzer,
    articles: &[ArticleRow],
    comments: &[CommentRow],
) -> Vec<SentimentReportRow> {
    let article_map = article_sentiments(analyzer, articles);

    comments
        .iter()
        .map(|comment| {
            let variants = target_variants(&comment.person_name);
            let content = comment.content.as_deref().unwrap_or("");

            let res = analyzer.analyze(content, &variants);
            let article_res = article_map.get(&(comment.article_url.clone(), comment.person_id));
            let referenced = references_article(content);
            let stance = detect_stance(content);
            let decision = derive_final(&res, article_res, res.mentioned, referenced, stance);

            SentimentReportRow {
                person_id: comment.person_id,
                person_name: comment.person_name.clone(),
                comment_key: comment.comment_key.clone(),
                article_url: comment.article_url.clone(),
                comment_time: comment.comment_time.clone().unwrap_or_default(),
                comment_label: res.label,
                comment_score: format!("{:.4}", res.score),
                comment_confidence: format!("{:.3}", res.confidence),
                comment_hits: res.hits,
                target_mentioned: res.mentioned as u8,
                references_article: referenced as u8,
                stance,
                article_label: article_res.map_or(Label::Neutral, |a| a.label),
                article_score: format!("{:.4}", article_res.map_or(0.0, |a| a.score)),
                article_confidence: format!("{:.3}", article_res.map_or(0.3, |a| a.confidence)),
                article_hits: article_res.map_or(0, |a| a.hits),
                final_label: decision.label,
                final_confidence: format!("{:.3}", decision.confidence),
                origin: decision.origin,
                method: METHOD_TAG,
                version: LEXICON_VERSION,
            }
        })
        .collect()
}

/// Group the detailed rows by person: label counts, their percentages and
/// the share of rows with a direct mention. Sorted by total descending,
/// then person name.
pub fn aggregate_by_person(rows: &[SentimentReportRow]) -> Vec<PersonSummaryRow> {
    struct Tally {
        name: String,
        positive: usize,
        negative: usize,
        neutral: usize,
        mentions: usize,
        total: usize,
    }

    let mut tallies: HashMap<i64, Tally> = HashMap::new();
    for row in rows {
        let t = tallies.entry(row.person_id).or_insert_with(|| Tally {
            name: row.person_name.clone(),
            positive: 0,
            negative: 0,
            neutral: 0,
            mentions: 0,
            total: 0,
        });
        match row.final_label {
            Label::Positive => t.positive += 1,
            Label::Negative => t.negative += 1,
            Label::Neutral => t.neutral += 1,
        }
        if row.target_mentioned == 1 {
            t.mentions += 1;
        }
        t.total += 1;
    }

    let mut out: Vec<PersonSummaryRow> = tallies
        .into_iter()
        .map(|(person_id, t)| {
            // Floor the denominator at 1 so empty groups cannot divide by zero.
            let denom = (t.total.max(1)) as f64;
            PersonSummaryRow {
                person_id,
                person_name: t.name,
                total: t.total,
                positive: t.positive,
                negative: t.negative,
                neutral: t.neutral,
                pct_positive: format!("{:.3}", t.positive as f64 / denom),
                pct_negative: format!("{:.3}", t.negative as f64 / denom),
                pct_neutral: format!("{:.3}", t.neutral as f64 / denom),
                pct_direct_mention: format!("{:.3}", t.mentions as f64 / denom),
            }
        })
        .collect();

    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.person_name.cmp(&b.person_name)));
    out
}

fn write_csv<T: Serialize>(rows: &[T], out_path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = out_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report dir {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Run the full report: detailed rows plus the per-person aggregate, both
/// written as CSV under `out_dir`.
pub fn generate_reports(
    analyzer: &TargetedAnalyzer,
    articles: &[ArticleRow],
    comments: &[CommentRow],
    out_dir: &Path,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let rows = build_rows(analyzer, articles, comments);
    let summary = aggregate_by_person(&rows);

    let detailed_path = out_dir.join(DETAILED_REPORT_FILE);
    write_csv(&rows, &detailed_path)?;
    let summary_path = out_dir.join(SUMMARY_REPORT_FILE);
    write_csv(&summary, &summary_path)?;

    info!(
        rows = rows.len(),
        people = summary.len(),
        detailed = %detailed_path.display(),
        summary = %summary_path.display(),
        "sentiment reports written"
    );
    Ok((detailed_path, summary_path))
}
