use super::types::Args;
use sql_middleware::middleware::DatabaseType;

const SECRETS_LOCATIONS: [&str; 2] = ["/secrets/db_password", "/run/secrets/db_password"];

impl Args {
    /// Check database settings and resolve a password given as a secrets file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the database configuration is invalid
    pub fn validate(&mut self) -> Result<(), String> {
        if self.import_on_startup && self.csv_url.is_none() {
            return Err("--import-on-startup needs --csv-url".to_string());
        }
        if self.db_type != DatabaseType::Postgres {
            return Ok(());
        }
        if self.db_user.as_deref().is_none_or(str::is_empty) {
            return Err("Postgres user is required".to_string());
        }
        if self.db_host.as_deref().is_none_or(str::is_empty) {
            return Err("Postgres host is required".to_string());
        }
        if self.db_port.is_none() {
            return Err("Postgres port is required".to_string());
        }
        let Some(password) = self.db_password.as_deref() else {
            return Err("Postgres password is required".to_string());
        };
        if SECRETS_LOCATIONS.contains(&password) || std::path::Path::new(password).is_file() {
            let contents = std::fs::read_to_string(password)
                .map_err(|e| format!("Cannot read password file '{password}': {e}"))?;
            self.db_password = Some(contents.trim().to_string());
        }
        Ok(())
    }
}
