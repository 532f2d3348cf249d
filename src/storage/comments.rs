//! SQLite persistence for comments and their classification audit trail.
//!
//! [`CommentStore`] keeps only the database path; each operation opens its
//! own short-lived connection. There is no pooling, retry, or timeout
//! handling.

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// A validated comment ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub product_id: String,
    pub user_id: String,
    pub user_comment: String,
}

pub struct CommentStore {
    db_path: PathBuf,
}

impl CommentStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Create the comment and audit tables if they do not exist yet.
    pub fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = self.open()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS product_comment (
                idprodcomment INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id    TEXT NOT NULL,
                user_id       TEXT NOT NULL,
                user_comment  TEXT NOT NULL,
                date_comment  TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS audit_product_comment (
                idaudit        INTEGER PRIMARY KEY AUTOINCREMENT,
                idprodcomment  INTEGER NOT NULL
                               REFERENCES product_comment(idprodcomment),
                product_id     TEXT NOT NULL,
                user_id        TEXT NOT NULL,
                user_comment   TEXT NOT NULL,
                classification TEXT NOT NULL,
                rating         INTEGER NOT NULL,
                date_audit     TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Insert the comment row, then the audit row reusing its generated id.
    ///
    /// Two sequential statements, not a transaction: the audit row's
    /// reference is guaranteed by insertion order only. Returns the
    /// generated comment id.
    pub fn record_classification(
        &self,
        comment: &NewComment,
        classification: &str,
        rating: u8,
        date: &str,
    ) -> Result<i64, StorageError> {
        let conn = self.open()?;

        conn.execute(
            "INSERT INTO product_comment (product_id, user_id, user_comment, date_comment)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                comment.product_id,
                comment.user_id,
                comment.user_comment,
                date
            ],
        )?;
        let idprodcomment = conn.last_insert_rowid();

        info!(idprodcomment, product_id = %comment.product_id, "Comment row stored");

        conn.execute(
            "INSERT INTO audit_product_comment
             (idprodcomment, product_id, user_id, user_comment, classification, rating, date_audit)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                idprodcomment,
                comment.product_id,
                comment.user_id,
                comment.user_comment,
                classification,
                rating,
                date
            ],
        )?;

        info!(idprodcomment, classification, rating, "Audit row stored");

        Ok(idprodcomment)
    }

    /// Total number of stored comments, for the health endpoint.
    pub fn count_comments(&self) -> Result<usize, StorageError> {
        let conn = self.open()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM product_comment", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn open(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.db_path)?)
    }
}
