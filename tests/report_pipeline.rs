// tests/report_pipeline.rs
//
// Full pipeline over an in-memory database: seed the scraper schema, run
// the report assembler and check the CSV output round.

use std::fs;

use farol_sentiment_analyzer::report::{
    self, DETAILED_REPORT_FILE, SUMMARY_REPORT_FILE,
};
use farol_sentiment_analyzer::store::Store;
use farol_sentiment_analyzer::TargetedAnalyzer;

const SCHEMA: &str = r#"
    CREATE TABLE artigos (
        url TEXT PRIMARY KEY,
        title TEXT,
        body TEXT,
        date TEXT,
        matched_names TEXT,
        scraped_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE pessoas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        name_norm TEXT NOT NULL UNIQUE
    );
    CREATE TABLE artigos_pessoas (
        article_url TEXT NOT NULL,
        person_id INTEGER NOT NULL,
        PRIMARY KEY(article_url, person_id)
    );
    CREATE TABLE comentarios (
        comment_key TEXT PRIMARY KEY,
        article_url TEXT NOT NULL,
        comment_id TEXT,
        author TEXT,
        time_text TEXT,
        time_iso TEXT,
        content TEXT,
        permalink TEXT
    );
"#;

fn seeded_store() -> Store {
    let store = Store::open_in_memory().expect("in-memory store");
    let conn = store.connection();
    conn.execute_batch(SCHEMA).expect("schema");
    conn.execute_batch(
        r#"
        INSERT INTO artigos (url, title, body, scraped_at) VALUES
          ('https://farol.example/a1',
           'Silva acertou de novo',
           'O prefeito Silva é muito competente e honesto.',
           '2024-05-01');
        INSERT INTO pessoas (id, name, name_norm) VALUES (1, 'João Silva', 'joao silva');
        INSERT INTO artigos_pessoas (article_url, person_id) VALUES ('https://farol.example/a1', 1);
        INSERT INTO comentarios (comment_key, article_url, author, time_iso, content) VALUES
          ('c1', 'https://farol.example/a1', 'ana', '2024-05-02T10:00:00Z', 'o silva é ótimo'),
          ('c2', 'https://farol.example/a1', 'bia', '2024-05-02T11:00:00Z', 'não concordo com a matéria'),
          ('c3', 'https://farol.example/a1', 'caio', '2024-05-02T12:00:00Z', 'bom dia a todos');
        "#,
    )
    .expect("seed rows");
    store
}

#[test]
fn reports_are_written_and_parse_back() {
    let store = seeded_store();
    let articles = store.articles().expect("articles");
    let comments = store.comments().expect("comments");
    assert_eq!(articles.len(), 1);
    assert_eq!(comments.len(), 3);

    let out_dir = std::env::temp_dir().join(format!(
        "farol-report-test-{}",
        std::process::id()
    ));
    let analyzer = TargetedAnalyzer::default_pt();
    let (detailed, summary) =
        report::generate_reports(&analyzer, &articles, &comments, &out_dir)
            .expect("generate reports");
    assert_eq!(detailed.file_name().unwrap().to_str(), Some(DETAILED_REPORT_FILE));
    assert_eq!(summary.file_name().unwrap().to_str(), Some(SUMMARY_REPORT_FILE));

    let mut reader = csv::Reader::from_path(&detailed).expect("read detailed csv");
    let headers = reader.headers().expect("headers").clone();
    for col in [
        "person_id",
        "person_name",
        "comment_key",
        "article_url",
        "comment_time",
        "comment_label",
        "comment_score",
        "comment_confidence",
        "comment_hits",
        "target_mentioned",
        "references_article",
        "stance",
        "article_label",
        "article_score",
        "article_confidence",
        "article_hits",
        "final_label",
        "final_confidence",
        "origin",
        "method",
        "version",
    ] {
        assert!(
            headers.iter().any(|h| h == col),
            "missing column {col}, headers: {headers:?}"
        );
    }

    let records: Vec<csv::StringRecord> =
        reader.records().collect::<Result<_, _>>().expect("records");
    assert_eq!(records.len(), 3);

    let col = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let by_key = |key: &str| {
        records
            .iter()
            .find(|r| &r[col("comment_key")] == key)
            .unwrap()
    };

    // Direct mention: comment's own sentiment stands.
    let c1 = by_key("c1");
    assert_eq!(&c1[col("origin")], "direct_comment");
    assert_eq!(&c1[col("final_label")], "positive");
    assert_eq!(&c1[col("target_mentioned")], "1");
    assert_eq!(&c1[col("method")], "lexicon_v1");

    // Explicit disagreement with a positive article inverts its label.
    let c2 = by_key("c2");
    assert_eq!(&c2[col("stance")], "disagrees");
    assert_eq!(&c2[col("references_article")], "1");
    assert_eq!(&c2[col("origin")], "news_alignment_stance");
    assert_eq!(&c2[col("final_label")], "negative");
    assert_eq!(&c2[col("article_label")], "positive");

    // Unanchored chatter stays undetermined.
    let c3 = by_key("c3");
    assert_eq!(&c3[col("origin")], "undetermined");
    assert_eq!(&c3[col("final_label")], "neutral");

    // Aggregate: one person, three rows, one negative / one positive / one neutral.
    let mut reader = csv::Reader::from_path(&summary).expect("read summary csv");
    let sheaders = reader.headers().expect("headers").clone();
    let srecords: Vec<csv::StringRecord> =
        reader.records().collect::<Result<_, _>>().expect("records");
    assert_eq!(srecords.len(), 1);
    let scol = |name: &str| sheaders.iter().position(|h| h == name).unwrap();
    let s = &srecords[0];
    assert_eq!(&s[scol("person_name")], "João Silva");
    assert_eq!(&s[scol("total")], "3");
    assert_eq!(&s[scol("positive")], "1");
    assert_eq!(&s[scol("negative")], "1");
    assert_eq!(&s[scol("neutral")], "1");
    assert_eq!(&s[scol("pct_direct_mention")], "0.333");

    fs::remove_dir_all(&out_dir).ok();
}
