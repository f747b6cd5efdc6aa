use super::consensus::{RankedCourse, display_consensus};
use super::course::display_rating;

/// Free-text filter over already loaded rows.
///
/// Case-insensitive substring match; a row matches when any of its rendered
/// values contains the trimmed query. An empty query matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFilter {
    raw: String,
    needle: String,
}

impl GlobalFilter {
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            raw: query.to_string(),
            needle: query.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn matches(&self, row: &RankedCourse) -> bool {
        if self.is_empty() {
            return true;
        }
        rendered_values(row)
            .iter()
            .any(|value| value.to_lowercase().contains(&self.needle))
    }

    pub fn apply<'a>(&'a self, rows: &'a [RankedCourse]) -> impl Iterator<Item = &'a RankedCourse> {
        rows.iter().filter(move |row| self.matches(row))
    }
}

fn rendered_values(row: &RankedCourse) -> Vec<String> {
    let info = &row.course.info;
    vec![
        info.club_name.clone(),
        info.course_name.clone(),
        info.city.clone(),
        info.state_or_region.clone(),
        info.country.clone(),
        info.designer.clone(),
        info.year_built.clone(),
        info.access.clone(),
        display_rating(info.golf_digest_rating),
        display_rating(info.golf_mag_rating),
        display_consensus(row.consensus),
        info.redesigns.clone(),
        info.restorations.clone(),
        info.description.clone(),
    ]
}
