use sql_middleware::SqlMiddlewareDbError;
use thiserror::Error;

/// SQLSTATE reported by Postgres when a relation is missing. Used as the
/// machine-readable code for [`StoreError::RelationMissing`] on every backend.
pub const RELATION_MISSING_CODE: &str = "42P01";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("relation \"{table}\" does not exist")]
    RelationMissing { table: String },
    #[error("query error: {0}")]
    Query(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    /// Stable, machine-readable error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Config(_) => "config",
            StoreError::RelationMissing { .. } => RELATION_MISSING_CODE,
            StoreError::Query(_) => "query",
            StoreError::Transport(_) => "transport",
        }
    }

    #[must_use]
    pub fn is_relation_missing(&self) -> bool {
        matches!(self, StoreError::RelationMissing { .. })
    }

    /// Classify a database error raised while working on `table`.
    #[must_use]
    pub fn from_db(table: &str, err: &SqlMiddlewareDbError) -> Self {
        Self::classify(table, &err.to_string())
    }

    #[must_use]
    pub fn classify(table: &str, message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("no such table")
            || lower.contains(RELATION_MISSING_CODE)
            || (lower.contains("relation") && lower.contains("does not exist"))
        {
            StoreError::RelationMissing {
                table: table.to_string(),
            }
        } else if lower.contains("pool")
            || lower.contains("connection")
            || lower.contains("timed out")
        {
            StoreError::Transport(message.to_string())
        } else {
            StoreError::Query(message.to_string())
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Config(e.to_string())
    }
}
