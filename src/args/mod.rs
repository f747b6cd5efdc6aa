use clap::Parser;
use std::fs;

pub mod database;
pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

/// Loads `.env`, parses the command line and validates it. Startup scripts
/// are read later by [`CleanArgs::new`], once logging is up.
///
/// # Errors
///
/// Will return `Err` if the arguments are invalid
pub fn args_checks() -> Result<Args, String> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(format!("Failed to load .env: {e}"));
        }
    }
    let mut args = Args::parse();
    args.validate()?;
    Ok(args)
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let mut combined_sql_script = String::new();
        if let Some(db_startup_script) = &args.db_startup_script {
            for file in db_startup_script.split(';').map(str::trim) {
                if file.is_empty() {
                    continue;
                }
                match fs::read_to_string(file) {
                    Ok(script) => {
                        combined_sql_script.push_str(&script);
                        combined_sql_script.push('\n');
                    }
                    Err(e) => {
                        log::warn!("Failed to read SQL startup script '{file}': {e}");
                    }
                }
            }
        }
        CleanArgs {
            db_type: args.db_type,
            db_host: args.db_host,
            db_port: args.db_port,
            db_user: args.db_user,
            db_password: args.db_password,
            db_name: args.db_name,
            db_startup_script: args.db_startup_script,
            combined_sql_script,
            init_schema: args.init_schema,
            csv_url: args.csv_url,
            import_on_startup: args.import_on_startup,
            bind: args.bind,
            log_level: args.log_level,
        }
    }
}
