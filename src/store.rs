// src/store.rs
//! Read-only access to the scraper's SQLite database.
//!
//! The schema belongs to the collection pipeline; this crate only joins
//! articles, cited people and comments into the flat rows the report
//! assembler consumes.

use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};

/// A comment joined to one person cited by its article.
#[derive(Debug, Clone)]
pub struct CommentRow {
    pub person_id: i64,
    pub person_name: String,
    pub article_url: String,
    /// `time_iso` when available, otherwise the raw scraped time text.
    pub comment_time: Option<String>,
    pub comment_key: String,
    pub author: Option<String>,
    pub content: Option<String>,
}

/// An article paired with one person it cites.
#[derive(Debug, Clone)]
pub struct ArticleRow {
    pub person_id: i64,
    pub person_name: String,
    pub article_url: String,
    pub title: Option<String>,
    pub body: Option<String>,
}

const COMMENT_QUERY: &str = r#"
SELECT
  p.id,
  p.name,
  a.url,
  COALESCE(c.time_iso, c.time_text),
  c.comment_key,
  c.author,
  c.content
FROM artigos a
JOIN artigos_pessoas ap ON ap.article_url = a.url
JOIN pessoas p ON p.id = ap.person_id
JOIN comentarios c ON c.article_url = a.url
ORDER BY p.name, a.scraped_at DESC
"#;

const ARTICLE_QUERY: &str = r#"
SELECT
  p.id,
  p.name,
  a.url,
  a.title,
  a.body
FROM artigos a
JOIN artigos_pessoas ap ON ap.article_url = a.url
JOIN pessoas p ON p.id = ap.person_id
ORDER BY a.scraped_at DESC
"#;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the database read-only; report generation never writes back,
    /// and read-only mode avoids creating WAL/journal files next to the db.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open database at {}", path.as_ref().display()))?;
        Ok(Self { conn })
    }

    /// In-memory handle for tests and ad-hoc pipelines.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Raw connection, e.g. for tests that seed data.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// All (comment, person) pairs, ordered by person name then article
    /// scrape time descending.
    pub fn comments(&self) -> anyhow::Result<Vec<CommentRow>> {
        let mut stmt = self.conn.prepare(COMMENT_QUERY)?;
        let rows = stmt.query_map([], |r| {
            Ok(CommentRow {
                person_id: r.get(0)?,
                person_name: r.get(1)?,
                article_url: r.get(2)?,
                comment_time: r.get(3)?,
                comment_key: r.get(4)?,
                author: r.get(5)?,
                content: r.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to read comment rows")
    }

    /// All (article, person) pairs, newest scrape first.
    pub fn articles(&self) -> anyhow::Result<Vec<ArticleRow>> {
        let mut stmt = self.conn.prepare(ARTICLE_QUERY)?;
        let rows = stmt.query_map([], |r| {
            Ok(ArticleRow {
                person_id: r.get(0)?,
                person_name: r.get(1)?,
                article_url: r.get(2)?,
                title: r.get(3)?,
                body: r.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("failed to read article rows")
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::seeded_store;

    #[test]
    fn comments_join_people_through_articles() {
        let store = seeded_store();
        let conn = store.connection();
        conn.execute_batch(
            r#"
            INSERT INTO artigos (url, title, body, scraped_at)
              VALUES ('https://farol.example/a1', 'Prefeito acertou', 'corpo', '2024-05-01');
            INSERT INTO pessoas (id, name, name_norm) VALUES (1, 'João Silva', 'joao silva');
            INSERT INTO artigos_pessoas (article_url, person_id)
              VALUES ('https://farol.example/a1', 1);
            INSERT INTO comentarios (comment_key, article_url, author, time_text, time_iso, content)
              VALUES ('c1', 'https://farol.example/a1', 'ana', 'ontem', NULL, 'concordo');
            INSERT INTO comentarios (comment_key, article_url, author, time_text, time_iso, content)
              VALUES ('c2', 'https://farol.example/a1', 'bia', 'hoje', '2024-05-02T10:00:00Z', 'mentira');
            "#,
        )
        .expect("seed rows");

        let comments = store.comments().expect("comments");
        assert_eq!(comments.len(), 2);
        assert!(comments.iter().all(|c| c.person_name == "João Silva"));

        // COALESCE prefers time_iso, falls back to time_text
        let c1 = comments.iter().find(|c| c.comment_key == "c1").unwrap();
        assert_eq!(c1.comment_time.as_deref(), Some("ontem"));
        let c2 = comments.iter().find(|c| c.comment_key == "c2").unwrap();
        assert_eq!(c2.comment_time.as_deref(), Some("2024-05-02T10:00:00Z"));

        let articles = store.articles().expect("articles");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].person_id, 1);
        assert_eq!(articles[0].title.as_deref(), Some("Prefeito acertou"));
    }

    #[test]
    fn empty_store_yields_no_rows() {
        let store = seeded_store();
        assert!(store.comments().expect("comments").is_empty());
        assert!(store.articles().expect("articles").is_empty());
    }
}
