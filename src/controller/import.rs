use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::CourseInfo;
use crate::store::{Filter, RowStore};

pub const IMPORT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ImportReport {
    fn ok(count: usize) -> Self {
        Self {
            success: true,
            message: "Data imported successfully!".to_string(),
            details: None,
            count: Some(count),
        }
    }

    fn failed(details: String) -> Self {
        Self {
            success: false,
            message: "Failed to import data".to_string(),
            details: Some(details),
            count: None,
        }
    }
}

/// Fetches the CSV at `url` and replaces the store's contents with it.
pub async fn import_from_url(store: &dyn RowStore, url: &str) -> ImportReport {
    match fetch_csv(url).await {
        Ok(text) => import_csv_text(store, &text).await,
        Err(e) => {
            log::error!("Import error: {e}");
            ImportReport::failed(e.to_string())
        }
    }
}

async fn fetch_csv(url: &str) -> Result<String, StoreError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Transport(format!(
            "Failed to fetch CSV: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )));
    }
    Ok(response.text().await?)
}

pub async fn import_csv_text(store: &dyn RowStore, text: &str) -> ImportReport {
    let courses = match parse_courses(text) {
        Ok(courses) => courses,
        Err(e) => {
            log::error!("Import error: {e}");
            return ImportReport::failed(format!("Error parsing CSV: {e}"));
        }
    };
    log::info!("Parsed {} rows from CSV", courses.len());
    match load(store, &courses).await {
        Ok(count) => ImportReport::ok(count),
        Err(e) => {
            log::error!("Import error: {e}");
            ImportReport::failed(e)
        }
    }
}

async fn load(store: &dyn RowStore, courses: &[CourseInfo]) -> Result<usize, String> {
    let existing = store.count().await.map_err(|e| e.to_string())?;
    if existing > 0 {
        let removed = store.delete(&Filter::All).await.map_err(|e| e.to_string())?;
        log::info!("Cleared {removed} existing rows");
    }

    let mut inserted = 0;
    for (i, batch) in courses.chunks(IMPORT_BATCH_SIZE).enumerate() {
        let n = i + 1;
        store
            .insert(batch)
            .await
            .map_err(|e| format!("Error inserting batch {n}: {e}"))?;
        inserted += batch.len();
        log::info!("Inserted batch {n} ({inserted}/{} rows)", courses.len());
    }
    Ok(inserted)
}

/// Parses CSV text into course records, dropping rows without a club name.
///
/// # Errors
///
/// Will return `Err` if the text is not well-formed CSV
pub fn parse_courses(text: &str) -> Result<Vec<CourseInfo>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let keys: Vec<String> = reader.headers()?.iter().map(header_key).collect();

    let mut courses = vec![];
    for record in reader.records() {
        let record = record?;
        let mut course = CourseInfo::default();
        for (key, value) in keys.iter().zip(record.iter()) {
            assign(&mut course, key, value);
        }
        if !course.club_name.is_empty() {
            courses.push(course);
        }
    }
    Ok(courses)
}

/// Field name for a header cell: lowercased with whitespace runs joined by `_`.
/// Any header mentioning a redesign or restoration maps to the notes columns.
#[must_use]
pub fn header_key(header: &str) -> String {
    let lower = header.trim().to_lowercase();
    if lower.contains("redesign") {
        return "redesigns".to_string();
    }
    if lower.contains("restoration") {
        return "restorations".to_string();
    }
    lower.split_whitespace().collect::<Vec<_>>().join("_")
}

fn assign(course: &mut CourseInfo, key: &str, value: &str) {
    let value = value.to_string();
    match key {
        "club_name" => course.club_name = value,
        "course_name" => course.course_name = value,
        "designer" => course.designer = value,
        "year_built" => course.year_built = value,
        "access" => course.access = value,
        "city" => course.city = value,
        "state_or_region" | "state" | "region" => course.state_or_region = value,
        "country" => course.country = value,
        "redesigns" => course.redesigns = value,
        "restorations" => course.restorations = value,
        "description" => course.description = value,
        k if k.contains("digest") => course.golf_digest_rating = parse_rating(&value),
        k if k.contains("golf_mag") || k.contains("magazine") => {
            course.golf_mag_rating = parse_rating(&value);
        }
        _ => {}
    }
}

/// Leading integer digits of a cell; blank, zero, or non-numeric is absent.
#[must_use]
pub fn parse_rating(cell: &str) -> Option<i64> {
    let digits: String = cell
        .trim()
        .trim_start_matches('#')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<i64>().ok().filter(|r| *r != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CourseQuery;
    use crate::store::fake::{FakeRowStore, course};
    use std::sync::atomic::Ordering;

    const SAMPLE: &str = "Club Name,Course Name,Golf Digest Rating,Golf Mag Rating,City,Redesign(s),Restoration(s)\r\n\
Pine Valley GC,,1,1,Pine Valley,,\r\n\
,Orphan,5,5,Nowhere,,\r\n\
\"Merion GC\",East,\"7\",N/A,Ardmore,\"Flynn, 1930\",Hanse\r\n";

    #[test]
    fn headers_are_snake_cased_with_note_aliases() {
        assert_eq!(header_key("Club  Name"), "club_name");
        assert_eq!(header_key("Redesign(s)"), "redesigns");
        assert_eq!(header_key("RESTORATIONS by"), "restorations");
        assert_eq!(header_key(" Year Built "), "year_built");
    }

    #[test]
    fn rows_without_club_name_are_dropped() {
        let courses = parse_courses(SAMPLE).unwrap();
        let names: Vec<&str> = courses.iter().map(|c| c.club_name.as_str()).collect();
        assert_eq!(names, vec!["Pine Valley GC", "Merion GC"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let courses = parse_courses(SAMPLE).unwrap();
        let merion = &courses[1];
        assert_eq!(merion.redesigns, "Flynn, 1930");
        assert_eq!(merion.restorations, "Hanse");
        assert_eq!(merion.golf_digest_rating, Some(7));
        assert_eq!(merion.golf_mag_rating, None);
        assert_eq!(merion.city, "Ardmore");
    }

    #[test]
    fn ratings_take_leading_digits() {
        assert_eq!(parse_rating("12"), Some(12));
        assert_eq!(parse_rating(" 45 (T)"), Some(45));
        assert_eq!(parse_rating("#3"), Some(3));
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating(""), None);
    }

    #[test]
    fn doubled_quotes_and_blank_lines() {
        let courses =
            parse_courses("Club Name,Description\n\n\"The \"\"Big\"\" Club\",\"two\nlines\"\n,,\n").unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].club_name, "The \"Big\" Club");
        assert_eq!(courses[0].description, "two\nlines");
    }

    #[test]
    fn short_rows_fill_what_they_have() {
        let courses = parse_courses("Club Name,City,Country\nBandon Dunes,Bandon\n").unwrap();
        assert_eq!(courses[0].city, "Bandon");
        assert_eq!(courses[0].country, "");
        assert!(parse_courses("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn import_replaces_existing_rows_in_batches() {
        let store = FakeRowStore::new(vec![course("Old Club", None, None)]);
        let mut csv = String::from("Club Name,City\n");
        for i in 0..120 {
            csv.push_str(&format!("Club {i},Town\n"));
        }
        let report = import_csv_text(&store, &csv).await;
        assert!(report.success, "{report:?}");
        assert_eq!(report.count, Some(120));
        assert_eq!(store.count().await.unwrap(), 120);

        let rows = store.query(&CourseQuery::all()).await.unwrap();
        assert!(rows.iter().all(|c| c.info.club_name != "Old Club"));
    }

    #[tokio::test]
    async fn failed_batch_aborts_with_its_number() {
        let store = FakeRowStore::new(vec![]);
        store.fail_inserts.store(true, Ordering::SeqCst);
        let report = import_csv_text(&store, "Club Name\nA\nB\n").await;
        assert!(!report.success);
        assert_eq!(report.message, "Failed to import data");
        assert!(report.details.unwrap().starts_with("Error inserting batch 1:"));
        assert_eq!(report.count, None);
    }
}
