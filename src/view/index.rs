use maud::{Markup, html};

use crate::HTMX_PATH;
use crate::mvu::table::TableModel;
use crate::view::table::render_table;

pub const INDEX_TITLE: &str = "Golf Course Rankings";

pub fn render_head(title: &str) -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="static/rankings.css";
            title { (title) }
            script src=(HTMX_PATH) defer {}
        }
    }
}

#[must_use]
pub fn render_index_template(view_id: &str, model: &TableModel) -> Markup {
    html! {
        (maud::DOCTYPE)
        html {
            (render_head(INDEX_TITLE))
            body {
                main class="container" {
                    h1 { (INDEX_TITLE) }
                    nav class="links" {
                        a href="/import" { "Import" }
                        a href="/check-data" { "Check data" }
                        a href="/debug" { "Debug" }
                    }
                    div class="search" {
                        input type="search" name="q" placeholder="Search all columns..."
                            value=(model.filter.query())
                            hx-get=(format!("courses/filter?view={view_id}"))
                            hx-trigger="keyup changed delay:300ms, search"
                            hx-target="#courses-table" hx-swap="outerHTML";
                    }
                    (render_table(view_id, model))
                }
            }
        }
    }
}
