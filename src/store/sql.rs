use async_trait::async_trait;
use sql_middleware::middleware::{ConfigAndPool, CustomDbRow, DatabaseType, RowValues};

use super::{COURSES_TABLE, ColumnInfo, CourseQuery, Filter, RowStore};
use crate::error::StoreError;
use crate::model::{COURSE_COLUMNS, Course, CourseInfo};

/// Placeholder style of the backing database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    #[must_use]
    pub fn from_db_type(db_type: &DatabaseType) -> Self {
        if *db_type == DatabaseType::Postgres {
            Dialect::Postgres
        } else {
            Dialect::Sqlite
        }
    }

    /// Positional placeholder for the n-th (1-based) parameter.
    fn placeholder(self, n: usize) -> String {
        match self {
            Dialect::Postgres => format!("${n}"),
            Dialect::Sqlite => format!("?{n}"),
        }
    }
}

fn where_clause(dialect: Dialect, filter: &Filter, params: &mut Vec<RowValues>) -> String {
    match filter {
        Filter::All => String::new(),
        Filter::Id(id) => {
            params.push(RowValues::Int(*id));
            format!(" WHERE id = {}", dialect.placeholder(params.len()))
        }
        Filter::ClubName(name) => {
            params.push(RowValues::Text(name.clone()));
            format!(" WHERE club_name = {}", dialect.placeholder(params.len()))
        }
    }
}

fn select_sql(
    dialect: Dialect,
    table: &str,
    query: &CourseQuery,
    params: &mut Vec<RowValues>,
) -> String {
    let mut sql = format!("SELECT id, {} FROM {table}", COURSE_COLUMNS.join(", "));
    sql.push_str(&where_clause(dialect, &query.filter, params));

    // column names come from SortColumn, never from request text
    match query
        .order
        .and_then(|o| o.column.store_column().map(|c| (o, c)))
    {
        Some((order, column)) => {
            if order.nulls_last {
                sql.push_str(&format!(" ORDER BY ({column} IS NULL), "));
            } else {
                sql.push_str(" ORDER BY ");
            }
            sql.push_str(&format!("{column} {}, id ASC", order.direction.as_sql()));
        }
        None => sql.push_str(" ORDER BY id ASC"),
    }

    if let Some(range) = query.range {
        params.push(RowValues::Int(i64::try_from(range.limit).unwrap_or(i64::MAX)));
        let limit = dialect.placeholder(params.len());
        params.push(RowValues::Int(i64::try_from(range.offset).unwrap_or(i64::MAX)));
        let offset = dialect.placeholder(params.len());
        sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
    }
    sql
}

fn insert_sql(
    dialect: Dialect,
    table: &str,
    courses: &[CourseInfo],
    params: &mut Vec<RowValues>,
) -> String {
    let mut tuples = Vec::with_capacity(courses.len());
    for course in courses {
        let start = params.len();
        params.extend(course_params(course));
        let holders: Vec<String> = (start + 1..=params.len())
            .map(|n| dialect.placeholder(n))
            .collect();
        tuples.push(format!("({})", holders.join(", ")));
    }
    format!(
        "INSERT INTO {table} ({}) VALUES {}",
        COURSE_COLUMNS.join(", "),
        tuples.join(", ")
    )
}

/// Row store backed by a sql-middleware pool, SQLite or Postgres.
#[derive(Clone)]
pub struct SqlRowStore {
    config_and_pool: ConfigAndPool,
    dialect: Dialect,
    table: String,
}

impl SqlRowStore {
    #[must_use]
    pub fn new(config_and_pool: ConfigAndPool, db_type: &DatabaseType) -> Self {
        Self::with_table(config_and_pool, db_type, COURSES_TABLE)
    }

    #[must_use]
    pub fn with_table(
        config_and_pool: ConfigAndPool,
        db_type: &DatabaseType,
        table: impl Into<String>,
    ) -> Self {
        Self {
            config_and_pool,
            dialect: Dialect::from_db_type(db_type),
            table: table.into(),
        }
    }

    #[must_use]
    pub fn config_and_pool(&self) -> &ConfigAndPool {
        &self.config_and_pool
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn select(
        &self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<Vec<CustomDbRow>, StoreError> {
        let mut conn = self
            .config_and_pool
            .get_connection()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let result = conn
            .query(sql)
            .params(params)
            .select()
            .await
            .map_err(|e| StoreError::from_db(&self.table, &e))?;
        Ok(result.results)
    }

    async fn dml(&self, sql: &str, params: &[RowValues]) -> Result<usize, StoreError> {
        let mut conn = self
            .config_and_pool
            .get_connection()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        conn.query(sql)
            .params(params)
            .dml()
            .await
            .map_err(|e| StoreError::from_db(&self.table, &e))
    }
}

fn text(s: &str) -> RowValues {
    RowValues::Text(s.to_string())
}

/// Zero is stored as NULL so nulls-last ordering agrees with consensus.
fn rating(r: Option<i64>) -> RowValues {
    r.filter(|r| *r != 0).map_or(RowValues::Null, RowValues::Int)
}

fn course_params(course: &CourseInfo) -> Vec<RowValues> {
    vec![
        text(&course.club_name),
        text(&course.course_name),
        text(&course.designer),
        text(&course.year_built),
        text(&course.access),
        rating(course.golf_digest_rating),
        rating(course.golf_mag_rating),
        text(&course.city),
        text(&course.state_or_region),
        text(&course.country),
        text(&course.redesigns),
        text(&course.restorations),
        text(&course.description),
    ]
}

fn get_string(row: &CustomDbRow, field: &str) -> String {
    row.get(field)
        .and_then(|v| v.as_text())
        .unwrap_or_default()
        .to_string()
}

fn get_opt_int(row: &CustomDbRow, field: &str) -> Option<i64> {
    row.get(field).and_then(|v| v.as_int()).copied()
}

fn row_to_course(row: &CustomDbRow) -> Result<Course, StoreError> {
    let id = get_opt_int(row, "id").ok_or_else(|| StoreError::Query("row without id".into()))?;
    Ok(Course {
        id,
        info: CourseInfo {
            club_name: get_string(row, "club_name"),
            course_name: get_string(row, "course_name"),
            designer: get_string(row, "designer"),
            year_built: get_string(row, "year_built"),
            access: get_string(row, "access"),
            golf_digest_rating: get_opt_int(row, "golf_digest_rating"),
            golf_mag_rating: get_opt_int(row, "golf_mag_rating"),
            city: get_string(row, "city"),
            state_or_region: get_string(row, "state_or_region"),
            country: get_string(row, "country"),
            redesigns: get_string(row, "redesigns"),
            restorations: get_string(row, "restorations"),
            description: get_string(row, "description"),
        },
    })
}

#[async_trait]
impl RowStore for SqlRowStore {
    fn table(&self) -> &str {
        &self.table
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) AS cnt FROM {}", self.table);
        let rows = self.select(&sql, &[]).await?;
        Ok(rows.first().and_then(|r| get_opt_int(r, "cnt")).unwrap_or(0))
    }

    async fn query(&self, query: &CourseQuery) -> Result<Vec<Course>, StoreError> {
        let mut params = vec![];
        let sql = select_sql(self.dialect, &self.table, query, &mut params);
        log::debug!("row store query: {sql}");
        self.select(&sql, &params)
            .await?
            .iter()
            .map(row_to_course)
            .collect()
    }

    async fn insert(&self, courses: &[CourseInfo]) -> Result<usize, StoreError> {
        if courses.is_empty() {
            return Ok(0);
        }
        let mut params = vec![];
        let sql = insert_sql(self.dialect, &self.table, courses, &mut params);
        self.dml(&sql, &params).await
    }

    async fn delete(&self, filter: &Filter) -> Result<usize, StoreError> {
        let mut params = vec![];
        let sql = format!(
            "DELETE FROM {}{}",
            self.table,
            where_clause(self.dialect, filter, &mut params)
        );
        self.dml(&sql, &params).await
    }

    async fn describe(&self) -> Result<Vec<ColumnInfo>, StoreError> {
        let sql = if self.dialect == Dialect::Postgres {
            "SELECT column_name AS column_name, data_type AS data_type \
             FROM information_schema.columns WHERE table_name = $1 ORDER BY ordinal_position"
        } else {
            "SELECT name AS column_name, type AS data_type FROM pragma_table_info(?1)"
        };
        let rows = self.select(sql, &[text(&self.table)]).await?;
        if rows.is_empty() {
            return Err(StoreError::RelationMissing {
                table: self.table.clone(),
            });
        }
        Ok(rows
            .iter()
            .map(|row| ColumnInfo {
                column: get_string(row, "column_name"),
                data_type: get_string(row, "data_type"),
            })
            .collect())
    }
}
