use rusty_golf_rankings::args::{self, CleanArgs};
use rusty_golf_rankings::controller::http_handlers::{
    AppState, check_data, debug, filter, health, import_page, import_run, index, load_more, sort,
    toggle,
};
use rusty_golf_rankings::controller::import::import_from_url;
use rusty_golf_rankings::controller::registry::ViewRegistry;
use rusty_golf_rankings::store::{RowStore, SqlRowStore};
use rusty_golf_rankings::{POSTGRES_SCHEMA, SQLITE_SCHEMA};
use sql_middleware::middleware::{
    ConfigAndPool, DatabaseType, PgConfig, PostgresOptions, SqliteOptions,
};

use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks()?;
    init_logging(args.log_level)?;
    let args = CleanArgs::new(args);

    let config_and_pool = init_config_and_pool(&args).await?;
    run_startup_tasks(&args, &config_and_pool).await?;

    let store = SqlRowStore::new(config_and_pool, &args.db_type);
    if args.import_on_startup {
        if let Some(url) = &args.csv_url {
            let report = import_from_url(&store, url).await;
            if !report.success {
                log::error!(
                    "Startup import failed: {}",
                    report.details.unwrap_or_default()
                );
            }
        }
    }

    let bind = args.bind.clone();
    let state = Data::new(AppState {
        store: Arc::new(store) as Arc<dyn RowStore>,
        registry: ViewRegistry::new(),
        args,
    });
    log::info!("Listening on {bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .route("/courses/more", web::get().to(load_more))
            .route("/courses/sort", web::get().to(sort))
            .route("/courses/toggle", web::get().to(toggle))
            .route("/courses/filter", web::get().to(filter))
            .route("/import", web::get().to(import_page))
            .route("/import", web::post().to(import_run))
            .route("/debug", web::get().to(debug))
            .route("/check-data", web::get().to(check_data))
            .route("/health", web::get().to(health))
            .service(Files::new("/static", "./static"))
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}

fn init_logging(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("tokio_postgres")
        .add_filter_ignore_str("rustls")
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)?;
    Ok(())
}

async fn init_config_and_pool(
    args: &CleanArgs,
) -> Result<ConfigAndPool, Box<dyn std::error::Error>> {
    if args.db_type == DatabaseType::Postgres {
        let mut postgres_config = PgConfig::new();
        postgres_config.dbname = Some(args.db_name.clone());
        postgres_config.host.clone_from(&args.db_host);
        postgres_config.port = args.db_port;
        postgres_config.user.clone_from(&args.db_user);
        postgres_config.password.clone_from(&args.db_password);

        let postgres_options = PostgresOptions::new(postgres_config);
        Ok(ConfigAndPool::new_postgres(postgres_options).await?)
    } else {
        let sqlite_options = SqliteOptions::new(args.db_name.clone());
        Ok(ConfigAndPool::new_sqlite(sqlite_options).await?)
    }
}

async fn run_startup_tasks(
    args: &CleanArgs,
    config_and_pool: &ConfigAndPool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut script = String::new();
    if args.init_schema {
        script.push_str(if args.db_type == DatabaseType::Postgres {
            POSTGRES_SCHEMA
        } else {
            SQLITE_SCHEMA
        });
        script.push('\n');
    }
    script.push_str(&args.combined_sql_script);
    if script.trim().is_empty() {
        return Ok(());
    }

    log::info!("Running startup sql");
    let mut conn = config_and_pool.get_connection().await?;
    conn.execute_batch(&script).await?;
    Ok(())
}
