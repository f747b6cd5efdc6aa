pub mod args;
pub mod error;
pub mod model;
pub mod store;
pub mod controller {
    pub mod diagnostics;
    pub mod http_handlers;
    pub mod import;
    pub mod registry;
}
pub mod mvu {
    pub mod plan;
    pub mod runtime;
    pub mod table;
}
pub mod view {
    pub mod diagnostics;
    pub mod import;
    pub mod index;
    pub mod table;
}

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

pub const SQLITE_SCHEMA: &str = include_str!("sql/schema/sqlite/00_golf_courses.sql");
pub const POSTGRES_SCHEMA: &str = include_str!("sql/schema/postgres/00_golf_courses.sql");

pub use error::StoreError;
pub use store::{RowStore, SqlRowStore};
