use serde::Serialize;

use super::course::{Course, CourseId, NOT_AVAILABLE};

/// Consensus of the two publisher ratings.
///
/// Both present: mean rounded to one decimal. One present: that value.
/// Neither: `0.0`. A rating of zero counts as absent.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn consensus_ranking(golf_digest: Option<i64>, golf_mag: Option<i64>) -> f64 {
    let digest = golf_digest.filter(|r| *r != 0);
    let mag = golf_mag.filter(|r| *r != 0);
    match (digest, mag) {
        (Some(a), Some(b)) => ((a + b) as f64 / 2.0 * 10.0).round() / 10.0,
        (Some(a), None) | (None, Some(a)) => a as f64,
        (None, None) => 0.0,
    }
}

#[must_use]
pub fn display_consensus(consensus: f64) -> String {
    if consensus == 0.0 {
        NOT_AVAILABLE.to_string()
    } else {
        format!("{consensus:.1}")
    }
}

/// A course as the table controller holds it: the stored record plus the
/// derived consensus value, which never goes back to the store.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RankedCourse {
    #[serde(flatten)]
    pub course: Course,
    #[serde(rename = "consensus_ranking")]
    pub consensus: f64,
}

impl RankedCourse {
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.course.id
    }
}

impl From<Course> for RankedCourse {
    fn from(course: Course) -> Self {
        let consensus =
            consensus_ranking(course.info.golf_digest_rating, course.info.golf_mag_rating);
        Self { course, consensus }
    }
}
