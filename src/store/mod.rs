use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreError;
use crate::model::{Course, CourseId, CourseInfo, SortColumn, SortDirection};

pub mod sql;

#[cfg(test)]
pub(crate) mod fake;

pub use sql::SqlRowStore;

pub const COURSES_TABLE: &str = "golf_courses";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Id(CourseId),
    ClubName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: SortColumn,
    pub direction: SortDirection,
    pub nulls_last: bool,
}

impl OrderBy {
    /// Order on a native column, `None` for derived columns.
    #[must_use]
    pub fn native(column: SortColumn, direction: SortDirection) -> Option<Self> {
        column.is_native().then_some(Self {
            column,
            direction,
            nulls_last: column.nulls_last(),
        })
    }
}

/// Half-open row window: `offset..offset + limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub offset: usize,
    pub limit: usize,
}

impl RowRange {
    #[must_use]
    pub fn page(page: usize, page_size: usize) -> Self {
        Self {
            offset: page * page_size,
            limit: page_size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub filter: Filter,
    pub order: Option<OrderBy>,
    pub range: Option<RowRange>,
}

impl CourseQuery {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ordered(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn range(mut self, range: RowRange) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnInfo {
    pub column: String,
    pub data_type: String,
}

/// The tabular service the rankings table reads from and the importer writes to.
///
/// Without an explicit order, rows come back in id order. Under an explicit
/// order, ties fall back to id order so row windows are stable.
#[async_trait]
pub trait RowStore: Send + Sync {
    fn table(&self) -> &str;
    async fn count(&self) -> Result<i64, StoreError>;
    async fn query(&self, query: &CourseQuery) -> Result<Vec<Course>, StoreError>;
    async fn insert(&self, courses: &[CourseInfo]) -> Result<usize, StoreError>;
    async fn delete(&self, filter: &Filter) -> Result<usize, StoreError>;
    async fn describe(&self) -> Result<Vec<ColumnInfo>, StoreError>;
}
