#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use rusty_golf_rankings::SQLITE_SCHEMA;
use rusty_golf_rankings::args::CleanArgs;
use rusty_golf_rankings::model::CourseInfo;
use rusty_golf_rankings::store::{RowStore, SqlRowStore};
use sql_middleware::SqlMiddlewareDbError;
use sql_middleware::middleware::{ConfigAndPool, DatabaseType, SqliteOptions};

pub struct TestContext {
    pub config_and_pool: ConfigAndPool,
    pub store: SqlRowStore,
    pub args: CleanArgs,
}

fn unique_db_name() -> String {
    format!(
        "file:test_db_{}?mode=memory&cache=shared",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time went backwards")
            .as_nanos()
    )
}

/// Fresh in-memory sqlite database. The schema is created when `with_schema` is set.
pub async fn setup_test_context(
    with_schema: bool,
) -> Result<TestContext, Box<dyn std::error::Error>> {
    let db_name = unique_db_name();
    let config_and_pool = ConfigAndPool::new_sqlite(SqliteOptions::new(db_name.clone())).await?;
    if with_schema {
        execute_batch(&config_and_pool, SQLITE_SCHEMA).await?;
    }

    let args = CleanArgs {
        db_type: DatabaseType::Sqlite,
        db_host: None,
        db_port: None,
        db_user: None,
        db_password: None,
        db_name,
        db_startup_script: None,
        combined_sql_script: String::new(),
        init_schema: with_schema,
        csv_url: None,
        import_on_startup: false,
        bind: "127.0.0.1:0".to_string(),
        log_level: log::LevelFilter::Off,
    };
    let store = SqlRowStore::new(config_and_pool.clone(), &DatabaseType::Sqlite);

    Ok(TestContext {
        config_and_pool,
        store,
        args,
    })
}

pub async fn seeded_context(
    courses: &[CourseInfo],
) -> Result<TestContext, Box<dyn std::error::Error>> {
    let ctx = setup_test_context(true).await?;
    for chunk in courses.chunks(50) {
        ctx.store.insert(chunk).await?;
    }
    Ok(ctx)
}

async fn execute_batch(
    config_and_pool: &ConfigAndPool,
    sql: &str,
) -> Result<(), SqlMiddlewareDbError> {
    let mut conn = config_and_pool.get_connection().await?;
    conn.execute_batch(sql).await
}

pub fn course(club: &str, digest: Option<i64>, mag: Option<i64>) -> CourseInfo {
    CourseInfo {
        club_name: club.to_string(),
        golf_digest_rating: digest,
        golf_mag_rating: mag,
        ..CourseInfo::default()
    }
}

/// 45 courses; digest rating = position for all but the three listed last,
/// which have none.
pub fn forty_five_courses() -> Vec<CourseInfo> {
    (1..=45)
        .map(|i| {
            let digest = if [7, 19, 33].contains(&i) { None } else { Some(i) };
            let mut c = course(&format!("Club {i:02}"), digest, Some(46 - i));
            c.city = format!("City {}", i % 4);
            c
        })
        .collect()
}
