use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};

use super::{ColumnInfo, CourseQuery, Filter, RowStore};
use crate::error::StoreError;
use crate::model::{COURSE_COLUMNS, Course, CourseInfo, SortColumn, SortDirection};

/// In-memory row store with the same ordering contract as the SQL store.
pub struct FakeRowStore {
    rows: Mutex<Vec<Course>>,
    next_id: AtomicUsize,
    pub queries: AtomicUsize,
    pub fail_queries: AtomicBool,
    pub fail_inserts: AtomicBool,
}

impl FakeRowStore {
    pub fn new(rows: Vec<CourseInfo>) -> Self {
        let store = Self {
            rows: Mutex::new(vec![]),
            next_id: AtomicUsize::new(1),
            queries: AtomicUsize::new(0),
            fail_queries: AtomicBool::new(false),
            fail_inserts: AtomicBool::new(false),
        };
        store.push(rows);
        store
    }

    fn push(&self, rows: Vec<CourseInfo>) -> usize {
        let mut guard = self.rows.lock().unwrap();
        let n = rows.len();
        for mut info in rows {
            info.golf_digest_rating = info.golf_digest_rating.filter(|r| *r != 0);
            info.golf_mag_rating = info.golf_mag_rating.filter(|r| *r != 0);
            let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst) as i64;
            guard.push(Course { id, info });
        }
        n
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(AtomicOrdering::SeqCst)
    }
}

pub fn course(club: &str, digest: Option<i64>, mag: Option<i64>) -> CourseInfo {
    CourseInfo {
        club_name: club.to_string(),
        golf_digest_rating: digest,
        golf_mag_rating: mag,
        ..CourseInfo::default()
    }
}

fn matches(filter: &Filter, course: &Course) -> bool {
    match filter {
        Filter::All => true,
        Filter::Id(id) => course.id == *id,
        Filter::ClubName(name) => &course.info.club_name == name,
    }
}

fn compare(column: SortColumn, nulls_last: bool, a: &Course, b: &Course) -> (Ordering, bool) {
    let rating = |c: &Course| match column {
        SortColumn::GolfDigestRating => c.info.golf_digest_rating,
        _ => c.info.golf_mag_rating,
    };
    match column {
        SortColumn::ClubName => (a.info.club_name.cmp(&b.info.club_name), false),
        SortColumn::City => (a.info.city.cmp(&b.info.city), false),
        SortColumn::GolfDigestRating | SortColumn::GolfMagRating => {
            match (rating(a), rating(b)) {
                (Some(x), Some(y)) => (x.cmp(&y), false),
                // null placement ignores direction when nulls_last is set
                (None, Some(_)) if nulls_last => (Ordering::Greater, true),
                (Some(_), None) if nulls_last => (Ordering::Less, true),
                (x, y) => (x.cmp(&y), false),
            }
        }
        SortColumn::ConsensusRanking => (Ordering::Equal, false),
    }
}

#[async_trait]
impl RowStore for FakeRowStore {
    fn table(&self) -> &str {
        "golf_courses"
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn query(&self, query: &CourseQuery) -> Result<Vec<Course>, StoreError> {
        self.queries.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_queries.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Query("injected failure".into()));
        }
        let mut rows: Vec<Course> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches(&query.filter, c))
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let (ord, fixed) = compare(order.column, order.nulls_last, a, b);
                if fixed || order.direction == SortDirection::Asc {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(range) = query.range {
            rows = rows.into_iter().skip(range.offset).take(range.limit).collect();
        }
        Ok(rows)
    }

    async fn insert(&self, courses: &[CourseInfo]) -> Result<usize, StoreError> {
        if self.fail_inserts.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Query("injected insert failure".into()));
        }
        Ok(self.push(courses.to_vec()))
    }

    async fn delete(&self, filter: &Filter) -> Result<usize, StoreError> {
        let mut guard = self.rows.lock().unwrap();
        let before = guard.len();
        guard.retain(|c| !matches(filter, c));
        Ok(before - guard.len())
    }

    async fn describe(&self) -> Result<Vec<ColumnInfo>, StoreError> {
        Ok(std::iter::once("id")
            .chain(COURSE_COLUMNS)
            .map(|c| ColumnInfo {
                column: c.to_string(),
                data_type: "text".to_string(),
            })
            .collect())
    }
}
