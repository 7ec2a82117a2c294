//! Report runner: loads the configuration, opens the scraped database
//! read-only and writes the detailed + aggregate sentiment CSVs.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use farol_sentiment_analyzer::analyzer::TargetedAnalyzer;
use farol_sentiment_analyzer::config::Config;
use farol_sentiment_analyzer::lexicon::Lexicon;
use farol_sentiment_analyzer::report;
use farol_sentiment_analyzer::store::Store;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env();
    info!(
        db = %cfg.db_path.display(),
        out = %cfg.report_dir.display(),
        "generating sentiment reports"
    );

    let analyzer = match &cfg.lexicon_path {
        Some(path) => {
            info!(lexicon = %path.display(), "using lexicon override");
            TargetedAnalyzer::new(Lexicon::from_path(path)?)
        }
        None => TargetedAnalyzer::default_pt(),
    };

    let store = Store::open_read_only(&cfg.db_path)?;
    let articles = store.articles()?;
    let comments = store.comments()?;

    let (detailed, summary) =
        report::generate_reports(&analyzer, &articles, &comments, &cfg.report_dir)?;
    info!(detailed = %detailed.display(), summary = %summary.display(), "done");
    Ok(())
}
