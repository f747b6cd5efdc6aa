use crate::model::{RankedCourse, SortDirection, SortState};
use crate::store::{CourseQuery, OrderBy, RowRange};

/// How a sort is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPlan {
    /// The store orders and windows the rows; one page per round-trip.
    Pushdown(OrderBy),
    /// The store hands over every row once; ordering and paging happen here.
    Materialize(SortDirection),
}

impl SortPlan {
    #[must_use]
    pub fn for_sort(sort: SortState) -> Self {
        match OrderBy::native(sort.column, sort.direction) {
            Some(order) => SortPlan::Pushdown(order),
            None => SortPlan::Materialize(sort.direction),
        }
    }

    #[must_use]
    pub fn is_materialized(self) -> bool {
        matches!(self, SortPlan::Materialize(_))
    }

    /// Store query for `page`. Materialized plans ignore the page and fetch all rows.
    #[must_use]
    pub fn query(self, page: usize, page_size: usize) -> CourseQuery {
        match self {
            SortPlan::Pushdown(order) => CourseQuery::all()
                .ordered(order)
                .range(RowRange::page(page, page_size)),
            SortPlan::Materialize(_) => CourseQuery::all(),
        }
    }
}

/// Stable sort on consensus; equal values keep fetch order.
pub fn sort_by_consensus(rows: &mut [RankedCourse], direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = a.consensus.total_cmp(&b.consensus);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
