use maud::{Markup, html};

use crate::model::{
    RankedCourse, SortColumn, SortDirection, display_consensus, display_or_na, display_rating,
};
use crate::mvu::table::TableModel;

const COLUMN_COUNT: usize = SortColumn::ALL.len();

fn arrow(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "\u{2191}",
        SortDirection::Desc => "\u{2193}",
    }
}

fn header_cell(view_id: &str, model: &TableModel, column: SortColumn) -> Markup {
    let ranking = column.nulls_last() || column == SortColumn::ConsensusRanking;
    html! {
        @if column == SortColumn::City {
            th class="location-col" {}
        } @else {
            th class=(if ranking { "sortable ranking-col" } else { "sortable" })
                hx-get=(format!("courses/sort?view={view_id}&column={column}"))
                hx-target="#courses-table" hx-swap="outerHTML" {
                span class="header-text" { (column.header()) }
                @if let Some(direction) = model.sort.direction_for(column) {
                    span class="sort-arrow" { (arrow(direction)) }
                }
            }
        }
    }
}

fn detail(label: &str, value: &str) -> Markup {
    html! {
        p { span class="detail-label" { (label) ":" } " " (display_or_na(value)) }
    }
}

/// One course: its main row plus, when expanded, the detail row.
#[must_use]
pub fn render_course(view_id: &str, row: &RankedCourse, expanded: bool) -> Markup {
    let info = &row.course.info;
    html! {
        tbody class="course" id=(format!("course-{}", row.id())) {
            tr class=(if expanded { "course-row expanded" } else { "course-row" })
                hx-get=(format!("courses/toggle?view={view_id}&id={}", row.id()))
                hx-target="closest tbody" hx-swap="outerHTML" {
                td class="club" {
                    strong { (info.club_name) }
                    @if !info.course_name.is_empty() {
                        " " span class="muted" { "(" (info.course_name) ")" }
                    }
                }
                td class="location-col muted" { (info.location()) }
                td class="ranking-col" { (display_rating(info.golf_digest_rating)) }
                td class="ranking-col" { (display_rating(info.golf_mag_rating)) }
                td class="ranking-col consensus" { (display_consensus(row.consensus)) }
            }
            @if expanded {
                tr class="detail-row" {
                    td colspan=(COLUMN_COUNT) {
                        div class="details" {
                            div {
                                h3 { "Course Details" }
                                (detail("Designer", &info.designer))
                                (detail("Year Built", &info.year_built))
                                (detail("Access", &info.access))
                            }
                            div {
                                h3 { "Location" }
                                (detail("City", &info.city))
                                (detail("State/Region", &info.state_or_region))
                                (detail("Country", &info.country))
                            }
                            @if info.has_modifications() {
                                div class="wide" {
                                    h3 { "Modifications" }
                                    @if !info.redesigns.is_empty() {
                                        p { span class="detail-label" { "Redesigns:" } " " span class="badge" { (info.redesigns) } }
                                    }
                                    @if !info.restorations.is_empty() {
                                        p { span class="detail-label" { "Restorations:" } " " span class="badge" { (info.restorations) } }
                                    }
                                }
                            }
                            @if !info.description.is_empty() {
                                div class="wide" {
                                    h3 { "Description" }
                                    p class="muted" { (info.description) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Trailing row that asks for the next page when scrolled into view.
#[must_use]
pub fn render_sentinel(view_id: &str, model: &TableModel) -> Markup {
    html! {
        tbody id="sentinel" {
            @if model.has_more && model.loaded.is_empty() && model.last_error.is_some() {
                tr hx-get=(format!("courses/more?view={view_id}"))
                    hx-trigger="click" hx-target="#sentinel" hx-swap="outerHTML" {
                    td colspan=(COLUMN_COUNT) class="status error" {
                        "Failed to load courses. Click to retry."
                    }
                }
            } @else if model.has_more {
                tr hx-get=(format!("courses/more?view={view_id}"))
                    hx-trigger="revealed" hx-target="#sentinel" hx-swap="outerHTML" {
                    td colspan=(COLUMN_COUNT) class="status" {
                        img alt="Loading more..." class="htmx-indicator" width="24" src="https://htmx.org//img/bars.svg" {}
                        span { "Loading more..." }
                    }
                }
            } @else if !model.loaded.is_empty() {
                tr {
                    td colspan=(COLUMN_COUNT) class="status muted" { "All courses loaded" }
                }
            }
        }
    }
}

/// Rows appended since `from`, followed by a fresh sentinel.
#[must_use]
pub fn render_more(view_id: &str, model: &TableModel, from: usize) -> Markup {
    html! {
        @for row in model.visible_rows_from(from) {
            (render_course(view_id, row, model.is_expanded(row.id())))
        }
        (render_sentinel(view_id, model))
    }
}

#[must_use]
pub fn render_table(view_id: &str, model: &TableModel) -> Markup {
    let rows: Vec<&RankedCourse> = model.visible_rows().collect();
    html! {
        div id="courses-table" class="table-wrapper" {
            table class="styled-table" {
                thead {
                    tr class="sticky-header" {
                        @for column in SortColumn::ALL {
                            (header_cell(view_id, model, column))
                        }
                    }
                }
                @if rows.is_empty() && !model.has_more {
                    tbody {
                        tr { td colspan=(COLUMN_COUNT) class="status" { "No results found." } }
                    }
                } @else {
                    @for row in &rows {
                        (render_course(view_id, row, model.is_expanded(row.id())))
                    }
                    (render_sentinel(view_id, model))
                }
            }
        }
    }
}
