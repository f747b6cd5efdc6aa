use serde::{Deserialize, Serialize};

pub type CourseId = i64;

/// Columns of a course record as stored, minus the store-assigned id.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CourseInfo {
    pub club_name: String,
    pub course_name: String,
    pub designer: String,
    pub year_built: String,
    pub access: String,
    pub golf_digest_rating: Option<i64>,
    pub golf_mag_rating: Option<i64>,
    pub city: String,
    pub state_or_region: String,
    pub country: String,
    pub redesigns: String,
    pub restorations: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    pub id: CourseId,
    #[serde(flatten)]
    pub info: CourseInfo,
}

/// Store column names in insert order. `id` is excluded since the store assigns it.
pub const COURSE_COLUMNS: [&str; 13] = [
    "club_name",
    "course_name",
    "designer",
    "year_built",
    "access",
    "golf_digest_rating",
    "golf_mag_rating",
    "city",
    "state_or_region",
    "country",
    "redesigns",
    "restorations",
    "description",
];

pub const NOT_AVAILABLE: &str = "N/A";

#[must_use]
pub fn display_rating(rating: Option<i64>) -> String {
    match rating {
        Some(r) if r != 0 => r.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[must_use]
pub fn display_or_na(s: &str) -> &str {
    if s.trim().is_empty() { NOT_AVAILABLE } else { s }
}

impl CourseInfo {
    /// "City, Region", omitting whichever part is blank.
    #[must_use]
    pub fn location(&self) -> String {
        let city = self.city.trim();
        let region = self.state_or_region.trim();
        match (city.is_empty(), region.is_empty()) {
            (false, false) => format!("{city}, {region}"),
            (false, true) => city.to_string(),
            (true, false) => region.to_string(),
            (true, true) => String::new(),
        }
    }

    #[must_use]
    pub fn has_modifications(&self) -> bool {
        !self.redesigns.trim().is_empty() || !self.restorations.trim().is_empty()
    }
}
