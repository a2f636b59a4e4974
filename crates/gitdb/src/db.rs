//! Commit index storage

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Pool, Row, Sqlite};
use types::Commit;

/// SQLite-backed commit index
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

/// Aggregate statistics over the index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub commits: i64,
    pub authors: i64,
    pub newest: Option<DateTime<Utc>>,
    pub oldest: Option<DateTime<Utc>>,
}

impl Database {
    /// Open (or create) the index database
    pub async fn open(path: &Path, wal: bool) -> Result<Self> {
        let pool = SqlitePool::connect_with(
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(if wal {
                    sqlx::sqlite::SqliteJournalMode::Wal
                } else {
                    sqlx::sqlite::SqliteJournalMode::Delete
                }),
        )
        .await
        .context("Failed to open index database")?;

        Ok(Self { pool })
    }

    /// In-memory database for testing
    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePool::connect(":memory:")
            .await
            .context("Failed to create in-memory database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Create tables and indexes
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS commits (
                hash TEXT PRIMARY KEY,
                author_name TEXT NOT NULL,
                author_email TEXT NOT NULL,
                authored_at TEXT NOT NULL,
                summary TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create commits table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_commits_authored_at ON commits(authored_at)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create authored_at index")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_commits_author ON commits(author_name)")
            .execute(&self.pool)
            .await
            .context("Failed to create author index")?;

        Ok(())
    }

    /// Insert commits, skipping hashes already indexed
    ///
    /// Returns how many rows were new; re-indexing the same repository is
    /// idempotent.
    pub async fn insert_commits(&self, commits: &[Commit]) -> Result<u64> {
        let mut inserted = 0;
        for commit in commits {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO commits \
                 (hash, author_name, author_email, authored_at, summary) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&commit.hash)
            .bind(&commit.author_name)
            .bind(&commit.author_email)
            // stored as UTC RFC 3339 so lexical order is chronological
            .bind(commit.authored_at.to_rfc3339())
            .bind(&commit.summary)
            .execute(&self.pool)
            .await
            .context("Failed to insert commit")?;

            inserted += result.rows_affected();
        }

        tracing::debug!(inserted, total = commits.len(), "commits indexed");
        Ok(inserted)
    }

    /// Most recently authored commits
    pub async fn recent(&self, limit: u32) -> Result<Vec<Commit>> {
        let rows = sqlx::query(
            "SELECT hash, author_name, author_email, authored_at, summary \
             FROM commits ORDER BY authored_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query recent commits")?;

        rows.iter().map(row_to_commit).collect()
    }

    /// Commits whose summary or author matches `term`
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<Commit>> {
        let pattern = format!("%{}%", term);
        let rows = sqlx::query(
            "SELECT hash, author_name, author_email, authored_at, summary \
             FROM commits WHERE summary LIKE ?1 OR author_name LIKE ?1 \
             ORDER BY authored_at DESC LIMIT ?2",
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to search commits")?;

        rows.iter().map(row_to_commit).collect()
    }

    /// Aggregate statistics for the index
    pub async fn stats(&self) -> Result<IndexStats> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS commits, COUNT(DISTINCT author_email) AS authors, \
             MAX(authored_at) AS newest, MIN(authored_at) AS oldest FROM commits",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to query index stats")?;

        let newest: Option<String> = row.get("newest");
        let oldest: Option<String> = row.get("oldest");

        Ok(IndexStats {
            commits: row.get("commits"),
            authors: row.get("authors"),
            newest: parse_timestamp(newest)?,
            oldest: parse_timestamp(oldest)?,
        })
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_commit(row: &sqlx::sqlite::SqliteRow) -> Result<Commit> {
    let authored_at: String = row.get("authored_at");
    Ok(Commit {
        hash: row.get("hash"),
        author_name: row.get("author_name"),
        author_email: row.get("author_email"),
        authored_at: DateTime::parse_from_rfc3339(&authored_at)
            .with_context(|| format!("Invalid timestamp in index: {}", authored_at))?
            .with_timezone(&Utc),
        summary: row.get("summary"),
    })
}

fn parse_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(value) => Ok(Some(
            DateTime::parse_from_rfc3339(&value)
                .with_context(|| format!("Invalid timestamp in index: {}", value))?
                .with_timezone(&Utc),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(hash: &str, author: &str, day: u32, summary: &str) -> Commit {
        Commit {
            hash: hash.to_string(),
            author_name: author.to_string(),
            author_email: format!("{}@devkit.dev", author.to_lowercase()),
            authored_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            summary: summary.to_string(),
        }
    }

    #[tokio::test]
    async fn reindexing_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        let commits = vec![
            commit("aaa", "Ada", 1, "initial commit"),
            commit("bbb", "Ada", 2, "add loader"),
        ];

        assert_eq!(db.insert_commits(&commits).await.unwrap(), 2);
        assert_eq!(db.insert_commits(&commits).await.unwrap(), 0);

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.commits, 2);
    }

    #[tokio::test]
    async fn recent_orders_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        db.insert_commits(&[
            commit("aaa", "Ada", 1, "oldest"),
            commit("ccc", "Cal", 3, "newest"),
            commit("bbb", "Bea", 2, "middle"),
        ])
        .await
        .unwrap();

        let recent = db.recent(2).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].summary, "newest");
        assert_eq!(recent[1].summary, "middle");
    }

    #[tokio::test]
    async fn search_matches_summary_and_author() {
        let db = Database::open_in_memory().await.unwrap();
        db.insert_commits(&[
            commit("aaa", "Ada", 1, "fix loader merge order"),
            commit("bbb", "Bea", 2, "update docs"),
            commit("ccc", "Loader", 3, "bump deps"),
        ])
        .await
        .unwrap();

        let matches = db.search("loader", 10).await.unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().any(|c| c.hash == "aaa"));
        assert!(matches.iter().any(|c| c.hash == "ccc"));
    }

    #[tokio::test]
    async fn stats_on_an_empty_index() {
        let db = Database::open_in_memory().await.unwrap();

        let stats = db.stats().await.unwrap();

        assert_eq!(stats.commits, 0);
        assert_eq!(stats.authors, 0);
        assert_eq!(stats.newest, None);
        assert_eq!(stats.oldest, None);
    }

    #[tokio::test]
    async fn stats_tracks_author_and_date_ranges() {
        let db = Database::open_in_memory().await.unwrap();
        db.insert_commits(&[
            commit("aaa", "Ada", 1, "oldest"),
            commit("bbb", "Ada", 2, "middle"),
            commit("ccc", "Cal", 3, "newest"),
        ])
        .await
        .unwrap();

        let stats = db.stats().await.unwrap();

        assert_eq!(stats.commits, 3);
        assert_eq!(stats.authors, 2);
        assert_eq!(
            stats.newest,
            Some(Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap())
        );
        assert_eq!(
            stats.oldest,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
    }
}
