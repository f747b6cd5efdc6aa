use clap::Parser;
use log::LevelFilter;
use sql_middleware::middleware::DatabaseType;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database type: sqlite or postgres
    #[arg(
        short = 'd',
        long,
        env = "DB_TYPE",
        value_name = "DATABASE_TYPE",
        default_value = "Sqlite",
        value_parser = clap::value_parser!(DatabaseType)
    )]
    pub db_type: DatabaseType,
    // Only necessary for postgres.
    #[arg(long, env = "DB_HOST", value_name = "DATABASE_HOST", default_value = "localhost")]
    pub db_host: Option<String>,
    #[arg(
        short = 'p',
        long,
        env = "DB_PORT",
        value_name = "DATABASE_PORT",
        default_value = "5432"
    )]
    pub db_port: Option<u16>,
    #[arg(
        short = 'u',
        long,
        env = "DB_USER",
        value_name = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub db_user: Option<String>,
    /// Password, or the path of a file holding it.
    #[arg(short = 'w', long, env = "DB_PASSWORD", value_name = "DATABASE_PASSWORD")]
    pub db_password: Option<String>,

    /// For postgres, the name of the database. For sqlite, the filename.
    #[arg(short = 'n', long, env = "DB_NAME", value_name = "DATABASE_NAME")]
    pub db_name: String,
    /// `;`-separated sql files run on startup, after the bundled schema.
    #[arg(
        long,
        env = "DB_STARTUP_SCRIPT",
        value_name = "DATABASE_STARTUP_SCRIPT",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub db_startup_script: Option<String>,
    /// Create the rankings table if it does not exist.
    #[arg(long, env = "INIT_SCHEMA")]
    pub init_schema: bool,

    /// Where the importer fetches the rankings CSV from.
    #[arg(
        long,
        env = "CSV_URL",
        value_name = "CSV_URL",
        value_parser = crate::args::validation::check_url
    )]
    pub csv_url: Option<String>,
    /// Replace the table contents from `--csv-url` before serving.
    #[arg(long, env = "IMPORT_ON_STARTUP")]
    pub import_on_startup: bool,

    #[arg(long, env = "BIND_ADDR", value_name = "ADDR", default_value = "0.0.0.0:8081")]
    pub bind: String,
    #[arg(long, env = "LOG_LEVEL", value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_type: DatabaseType,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: String,
    pub db_startup_script: Option<String>,
    pub combined_sql_script: String,
    pub init_schema: bool,
    pub csv_url: Option<String>,
    pub import_on_startup: bool,
    pub bind: String,
    pub log_level: LevelFilter,
}
