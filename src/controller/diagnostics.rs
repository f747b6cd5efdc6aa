use serde::Serialize;
use std::collections::BTreeMap;

use crate::args::CleanArgs;
use crate::error::StoreError;
use crate::model::Course;
use crate::store::{ColumnInfo, CourseQuery, RowRange, RowStore};

pub const SAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Course>>,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            data: None,
        }
    }

    fn fail(message: impl Into<String>, error: &StoreError) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(format!("[{}] {error}", error.code())),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticsReport {
    /// Whether each required setting is present.
    pub config: BTreeMap<String, bool>,
    pub client_initialized: bool,
    pub connection_test: CheckResult,
    pub table_test: CheckResult,
    pub query_test: CheckResult,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableInfo {
    pub exists: bool,
    pub row_count: i64,
    pub sample: Vec<Course>,
    pub schema: Option<Vec<ColumnInfo>>,
}

pub async fn run_diagnostics(args: &CleanArgs, store: &dyn RowStore) -> DiagnosticsReport {
    let table = store.table().to_string();
    let config = BTreeMap::from([
        ("DB_NAME".to_string(), !args.db_name.trim().is_empty()),
        ("CSV_URL".to_string(), args.csv_url.is_some()),
    ]);

    log::info!("Testing connection...");
    let connection_test = match store.count().await {
        Ok(_) => CheckResult::pass("Successfully connected to the database"),
        Err(e) if e.is_relation_missing() => {
            CheckResult::pass("Connected to the database, but the table is missing")
        }
        Err(e) => {
            log::error!("Connection test error: {e}");
            CheckResult::fail("Failed to connect to the database", &e)
        }
    };

    log::info!("Testing table existence...");
    let table_test = match store.count().await {
        Ok(_) => CheckResult::pass(format!("Found '{table}' table")),
        Err(e) if e.is_relation_missing() => {
            CheckResult::fail(format!("The '{table}' table does not exist"), &e)
        }
        Err(e) => {
            log::error!("Table test error: {e}");
            CheckResult::fail("Failed to check tables", &e)
        }
    };

    log::info!("Testing query on {table} table...");
    let first = CourseQuery::all().range(RowRange { offset: 0, limit: 1 });
    let query_test = match (store.query(&first).await, store.count().await) {
        (Ok(rows), Ok(count)) => CheckResult {
            data: Some(rows),
            ..CheckResult::pass(format!(
                "Successfully queried '{table}' table. Found {count} total rows."
            ))
        },
        (Err(e), _) | (_, Err(e)) => {
            log::error!("Query test error: {e}");
            CheckResult::fail(format!("Failed to query '{table}' table"), &e)
        }
    };

    DiagnosticsReport {
        config,
        client_initialized: true,
        connection_test,
        table_test,
        query_test,
    }
}

/// Existence, size, a few sample rows and the column layout of the table.
///
/// # Errors
///
/// Will return `Err` if the table exists but counting or sampling it fails
pub async fn check_table_data(store: &dyn RowStore) -> Result<TableInfo, StoreError> {
    let schema = match store.describe().await {
        Ok(columns) => Some(columns),
        Err(e) if e.is_relation_missing() => {
            return Ok(TableInfo {
                exists: false,
                row_count: 0,
                sample: vec![],
                schema: None,
            });
        }
        Err(e) => {
            log::warn!("Schema lookup failed, inferring from sample rows: {e}");
            None
        }
    };

    let row_count = store
        .count()
        .await
        .map_err(|e| StoreError::Query(format!("Error getting row count: {e}")))?;
    let sample = store
        .query(&CourseQuery::all().range(RowRange {
            offset: 0,
            limit: SAMPLE_ROWS,
        }))
        .await
        .map_err(|e| StoreError::Query(format!("Error getting sample data: {e}")))?;
    let schema = schema.or_else(|| sample.first().map(infer_schema));

    Ok(TableInfo {
        exists: true,
        row_count,
        sample,
        schema,
    })
}

fn infer_schema(course: &Course) -> Vec<ColumnInfo> {
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(course) else {
        return vec![];
    };
    fields
        .into_iter()
        .map(|(column, value)| {
            let data_type = match value {
                serde_json::Value::String(_) => "string",
                serde_json::Value::Number(_) => "number",
                serde_json::Value::Bool(_) => "boolean",
                _ => "object",
            };
            ColumnInfo {
                column,
                data_type: data_type.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Args, CleanArgs};
    use crate::store::fake::{FakeRowStore, course};
    use clap::Parser;
    use std::sync::atomic::Ordering;

    fn args() -> CleanArgs {
        CleanArgs::new(Args::parse_from(["rusty-golf-rankings", "--db-name", "courses.db"]))
    }

    #[tokio::test]
    async fn healthy_store_passes_every_check() {
        let store = FakeRowStore::new(vec![course("Oakmont", Some(3), Some(4))]);
        let report = run_diagnostics(&args(), &store).await;
        assert_eq!(report.config.get("DB_NAME"), Some(&true));
        assert_eq!(report.config.get("CSV_URL"), Some(&false));
        assert!(report.connection_test.success);
        assert!(report.table_test.success);
        assert!(report.query_test.message.contains("Found 1 total rows"));
        assert_eq!(report.query_test.data.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn failing_queries_are_reported() {
        let store = FakeRowStore::new(vec![]);
        store.fail_queries.store(true, Ordering::SeqCst);
        let report = run_diagnostics(&args(), &store).await;
        assert!(!report.query_test.success);
        assert!(report.query_test.error.unwrap().starts_with("[query]"));
    }

    #[tokio::test]
    async fn table_info_samples_five_rows() {
        let store = FakeRowStore::new(
            (0..8)
                .map(|i| course(&format!("Club {i}"), None, None))
                .collect(),
        );
        let info = check_table_data(&store).await.unwrap();
        assert!(info.exists);
        assert_eq!(info.row_count, 8);
        assert_eq!(info.sample.len(), SAMPLE_ROWS);
        assert_eq!(info.schema.unwrap()[0].column, "id");
    }

    #[test]
    fn schema_is_inferred_from_a_row() {
        let row = Course {
            id: 1,
            info: course("Shinnecock", Some(2), None),
        };
        let schema = infer_schema(&row);
        let id = schema.iter().find(|c| c.column == "id").unwrap();
        assert_eq!(id.data_type, "number");
        let mag = schema.iter().find(|c| c.column == "golf_mag_rating").unwrap();
        assert_eq!(mag.data_type, "object");
        assert_eq!(schema.len(), 14);
    }
}
