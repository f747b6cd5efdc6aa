use maud::{Markup, html};

use crate::controller::import::ImportReport;
use crate::view::index::render_head;

fn render_result(report: &ImportReport) -> Markup {
    html! {
        div id="import-result" class=(if report.success { "alert success" } else { "alert error" }) {
            h3 { (if report.success { "Success" } else { "Error" }) }
            p { (report.message) }
            @if let Some(count) = report.count {
                p { "Imported " (count) " rows." }
            }
            @if let Some(details) = &report.details {
                pre { (details) }
            }
            @if report.success {
                a href="/" { "Go to Golf Courses Table" }
            }
        }
    }
}

/// Import page. `report` is the outcome of a run, if one just happened.
#[must_use]
pub fn render_import_page(csv_url: Option<&str>, report: Option<&ImportReport>) -> Markup {
    html! {
        (maud::DOCTYPE)
        html {
            (render_head("Import CSV Data"))
            body {
                main class="container" {
                    h1 { "Import CSV Data" }
                    @match csv_url {
                        Some(url) => {
                            p { "Source: " code { (url) } }
                            p { "This will:" }
                            ol {
                                li { "Fetch the CSV file from the configured URL" }
                                li { "Parse the CSV data" }
                                li { "Clear any existing data in the rankings table" }
                                li { "Insert the parsed data in batches" }
                            }
                            form hx-post="/import" hx-target="#import-result" hx-swap="outerHTML" {
                                button type="submit" { "Import Data" }
                                img alt="Importing..." class="htmx-indicator" width="24" src="https://htmx.org//img/bars.svg" {}
                            }
                        }
                        None => {
                            p class="alert error" { "No CSV source configured. Start the server with --csv-url." }
                        }
                    }
                    @match report {
                        Some(report) => (render_result(report)),
                        None => div id="import-result" {},
                    }
                }
            }
        }
    }
}

/// Fragment swapped in after `POST /import`.
#[must_use]
pub fn render_import_result(report: &ImportReport) -> Markup {
    render_result(report)
}
