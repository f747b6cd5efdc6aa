use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use rusty_golf_rankings::model::{CourseId, SortColumn, SortDirection, SortState};
use rusty_golf_rankings::mvu::runtime::{TableHandle, run_table};
use rusty_golf_rankings::mvu::table::{Deps, Msg, PAGE_SIZE, TableModel};

mod common;
use common::{forty_five_courses, seeded_context};

fn handle(sort: SortState) -> TableHandle {
    Arc::new(Mutex::new(TableModel::new(sort)))
}

#[tokio::test]
async fn forty_five_rows_page_with_nulls_at_the_tail() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = seeded_context(&forty_five_courses()).await?;
    let deps = Deps { store: &ctx.store };
    let view = handle(SortState::new(SortColumn::GolfDigestRating, SortDirection::Asc));

    run_table(&view, Msg::PageLoad, deps).await;
    {
        let model = view.lock().await;
        assert_eq!(model.loaded.len(), PAGE_SIZE);
        assert!(model.loaded.iter().all(|r| r.course.info.golf_digest_rating.is_some()));
        assert!(model.has_more);
    }

    run_table(&view, Msg::LoadMore, deps).await;
    run_table(&view, Msg::LoadMore, deps).await;

    let model = view.lock().await;
    assert_eq!(model.loaded.len(), 45);
    assert!(!model.has_more);
    assert_eq!(model.page, 2);

    let third_page = &model.loaded[40..];
    assert_eq!(third_page.len(), 5);
    let nulls = third_page
        .iter()
        .filter(|r| r.course.info.golf_digest_rating.is_none())
        .count();
    assert_eq!(nulls, 3);

    let digests: Vec<i64> = model.loaded[..42]
        .iter()
        .filter_map(|r| r.course.info.golf_digest_rating)
        .collect();
    assert_eq!(digests.len(), 42);
    assert!(digests.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[tokio::test]
async fn pages_never_duplicate_or_skip() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = seeded_context(&forty_five_courses()).await?;
    let deps = Deps { store: &ctx.store };

    for sort in [
        SortState::new(SortColumn::City, SortDirection::Asc),
        SortState::new(SortColumn::ClubName, SortDirection::Desc),
        SortState::new(SortColumn::GolfMagRating, SortDirection::Desc),
    ] {
        let view = handle(sort);
        run_table(&view, Msg::PageLoad, deps).await;
        for _ in 0..5 {
            run_table(&view, Msg::LoadMore, deps).await;
        }
        let model = view.lock().await;
        let ids: Vec<CourseId> = model.loaded.iter().map(|r| r.id()).collect();
        let unique: HashSet<CourseId> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 45, "{sort:?}");
        assert_eq!(unique.len(), 45, "{sort:?}");
    }
    Ok(())
}

#[tokio::test]
async fn direction_toggle_never_unsorts() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = seeded_context(&forty_five_courses()).await?;
    let deps = Deps { store: &ctx.store };
    let view = handle(SortState::new(SortColumn::ClubName, SortDirection::Asc));
    run_table(&view, Msg::PageLoad, deps).await;
    let first: Vec<CourseId> = view.lock().await.loaded.iter().map(|r| r.id()).collect();

    run_table(&view, Msg::SortClicked(SortColumn::ClubName), deps).await;
    assert_eq!(view.lock().await.sort.direction, SortDirection::Desc);
    run_table(&view, Msg::SortClicked(SortColumn::ClubName), deps).await;

    let model = view.lock().await;
    assert_eq!(model.sort, SortState::new(SortColumn::ClubName, SortDirection::Asc));
    let again: Vec<CourseId> = model.loaded.iter().map(|r| r.id()).collect();
    assert_eq!(first, again);
    Ok(())
}
