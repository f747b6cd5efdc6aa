use rusty_golf_rankings::controller::import::import_csv_text;
use rusty_golf_rankings::store::{CourseQuery, RowStore};

mod common;
use common::{course, seeded_context};

const CSV: &str = "Club Name,Course Name,Designer,Golf Digest Rating,Golf Mag Rating,City,State or Region,Country,Redesign(s),Restoration(s),Description\n\
Augusta National GC,,\"MacKenzie, Jones\",1,2,Augusta,GA,USA,\"Fazio, 2006\",,Home of the Masters\n\
,Nameless,,3,3,,,,,,\n\
Pine Valley GC,,Crump,2,1,Pine Valley,NJ,USA,,Hanse,\n";

#[tokio::test]
async fn csv_import_replaces_table() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = seeded_context(&[course("Stale Club", Some(99), None)]).await?;

    let report = import_csv_text(&ctx.store, CSV).await;
    assert!(report.success, "{report:?}");
    assert_eq!(report.count, Some(2));
    assert_eq!(ctx.store.count().await?, 2);

    let rows = ctx.store.query(&CourseQuery::all()).await?;
    let augusta = &rows[0].info;
    assert_eq!(augusta.club_name, "Augusta National GC");
    assert_eq!(augusta.designer, "MacKenzie, Jones");
    assert_eq!(augusta.redesigns, "Fazio, 2006");
    assert_eq!(augusta.state_or_region, "GA");
    assert_eq!(augusta.golf_mag_rating, Some(2));
    assert_eq!(rows[1].info.restorations, "Hanse");
    assert!(rows.iter().all(|c| c.info.club_name != "Stale Club"));
    Ok(())
}

#[tokio::test]
async fn large_import_spans_batches() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = seeded_context(&[]).await?;
    let mut csv = String::from("Club Name,Golf Digest Rating\r\n");
    for i in 1..=130 {
        csv.push_str(&format!("Club {i},{i}\r\n"));
    }
    let report = import_csv_text(&ctx.store, &csv).await;
    assert_eq!(report.count, Some(130));
    assert_eq!(ctx.store.count().await?, 130);
    Ok(())
}
