use maud::{Markup, html};

use crate::controller::diagnostics::{CheckResult, DiagnosticsReport, TableInfo};
use crate::model::{Course, display_rating};
use crate::view::index::render_head;

fn status(ok: bool) -> Markup {
    html! {
        @if ok { span class="ok" { "\u{2713}" } } @else { span class="fail" { "\u{2717}" } }
    }
}

fn check(title: &str, result: &CheckResult) -> Markup {
    html! {
        section class="check" {
            h3 { (status(result.success)) " " (title) }
            p { (result.message) }
            @if let Some(error) = &result.error {
                pre { (error) }
            }
            @if let Some(rows) = result.data.as_ref().filter(|r| !r.is_empty()) {
                pre { (serde_json::to_string_pretty(rows).unwrap_or_default()) }
            }
        }
    }
}

#[must_use]
pub fn render_debug_page(report: &DiagnosticsReport) -> Markup {
    html! {
        (maud::DOCTYPE)
        html {
            (render_head("Database Debug"))
            body {
                main class="container" {
                    h1 { "Database Debug" }
                    section class="check" {
                        h3 { "Configuration" }
                        ul {
                            @for (name, present) in &report.config {
                                li { (status(*present)) " " code { (name) } }
                            }
                        }
                        p { (status(report.client_initialized)) " Client initialized" }
                    }
                    (check("Connection Test", &report.connection_test))
                    (check("Table Test", &report.table_test))
                    (check("Query Test", &report.query_test))
                    a href="/debug" { "Run Diagnostics Again" }
                }
            }
        }
    }
}

fn sample_table(rows: &[Course]) -> Markup {
    html! {
        table class="styled-table" {
            thead {
                tr { th { "ID" } th { "Club Name" } th { "Course Name" } th { "Golf Digest" } th { "Golf Mag" } }
            }
            tbody {
                @for row in rows {
                    tr {
                        td { (row.id) }
                        td { (row.info.club_name) }
                        td { (row.info.course_name) }
                        td { (display_rating(row.info.golf_digest_rating)) }
                        td { (display_rating(row.info.golf_mag_rating)) }
                    }
                }
            }
        }
    }
}

fn table_details(table: &str, info: &TableInfo) -> Markup {
    html! {
        section {
            h3 { "Table Status" }
            p { (status(true)) " Table '" (table) "' exists with " (info.row_count) " rows" }
        }
        @if let Some(schema) = &info.schema {
            section {
                h3 { "Table Schema" }
                table class="styled-table" {
                    thead { tr { th { "Column" } th { "Data Type" } } }
                    tbody {
                        @for column in schema {
                            tr { td { (column.column) } td { (column.data_type) } }
                        }
                    }
                }
            }
        }
        section {
            h3 { "Sample Data" }
            @if info.sample.is_empty() {
                p { "No data found in the table. Import some rows first." }
                a href="/import" { "Go to Import Page" }
            } @else {
                (sample_table(&info.sample))
            }
        }
    }
}

/// Table inspection page. `error` is shown instead when the lookup failed.
#[must_use]
pub fn render_check_data_page(table: &str, info: Result<&TableInfo, &str>) -> Markup {
    html! {
        (maud::DOCTYPE)
        html {
            (render_head("Check Table Data"))
            body {
                main class="container" {
                    h1 { "Check Table Data" }
                    @match info {
                        Err(error) => {
                            div class="alert error" { h3 { "Error" } p { (error) } }
                        }
                        Ok(info) => {
                            @if !info.exists {
                                div class="alert error" {
                                    h3 { "Table Not Found" }
                                    p { "The '" (table) "' table does not exist. Start the server with --init-schema to create it." }
                                }
                            } @else {
                                (table_details(table, info))
                            }
                        }
                    }
                    a href="/" { "Back to Rankings" }
                }
            }
        }
    }
}
