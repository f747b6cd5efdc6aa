use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use maud::Markup;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::args::CleanArgs;
use crate::controller::diagnostics::{check_table_data, run_diagnostics};
use crate::controller::import::import_from_url;
use crate::controller::registry::ViewRegistry;
use crate::model::{CourseId, RankedCourse, SortColumn, SortState};
use crate::mvu::runtime::{TableHandle, run_table};
use crate::mvu::table::{Deps, Msg, TableModel};
use crate::store::RowStore;
use crate::view::diagnostics::{render_check_data_page, render_debug_page};
use crate::view::import::{render_import_page, render_import_result};
use crate::view::index::render_index_template;
use crate::view::table::{render_course, render_more, render_table};

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub registry: ViewRegistry,
    pub args: CleanArgs,
}

impl AppState {
    fn deps(&self) -> Deps<'_> {
        Deps {
            store: self.store.as_ref(),
        }
    }
}

type Query = web::Query<HashMap<String, String>>;

fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map_or("", |s| s.trim())
}

fn wants_json(query: &HashMap<String, String>) -> bool {
    match get_param_str(query, "json") {
        "1" => true,
        "0" | "" => false,
        other => other.parse().unwrap_or(false),
    }
}

fn html(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": message}))
}

async fn lookup_view(
    query: &HashMap<String, String>,
    state: &AppState,
) -> Result<(String, TableHandle), HttpResponse> {
    let view_id = get_param_str(query, "view");
    if view_id.is_empty() {
        return Err(bad_request("view parameter is required"));
    }
    match state.registry.get(view_id).await {
        Some(handle) => Ok((view_id.to_string(), handle)),
        None => Err(HttpResponse::Gone()
            .json(json!({"error": format!("view '{view_id}' has expired, reload the page")}))),
    }
}

fn snapshot<'a>(
    view_id: &str,
    model: &TableModel,
    rows: impl Iterator<Item = &'a RankedCourse>,
) -> serde_json::Value {
    let rows: Vec<&RankedCourse> = rows.collect();
    json!({
        "view": view_id,
        "sort": model.sort,
        "filter": model.filter.query(),
        "has_more": model.has_more,
        "loaded": model.loaded.len(),
        "rows": rows,
    })
}

pub async fn index(query: Query, state: Data<AppState>) -> impl Responder {
    let (view_id, handle) = state.registry.create(SortState::default()).await;
    run_table(&handle, Msg::PageLoad, state.deps()).await;

    let model = handle.lock().await;
    if wants_json(&query) {
        HttpResponse::Ok().json(snapshot(&view_id, &model, model.visible_rows()))
    } else {
        html(render_index_template(&view_id, &model))
    }
}

pub async fn load_more(query: Query, state: Data<AppState>) -> impl Responder {
    let (view_id, handle) = match lookup_view(&query, &state).await {
        Ok(found) => found,
        Err(response) => return response,
    };
    let (before, epoch) = {
        let model = handle.lock().await;
        (model.loaded.len(), model.epoch)
    };
    run_table(&handle, Msg::LoadMore, state.deps()).await;

    let model = handle.lock().await;
    // a sort change in between replaced the rows; nothing to append
    let from = if model.epoch == epoch {
        before
    } else {
        model.loaded.len()
    };
    if wants_json(&query) {
        HttpResponse::Ok().json(snapshot(&view_id, &model, model.visible_rows_from(from)))
    } else {
        html(render_more(&view_id, &model, from))
    }
}

pub async fn sort(query: Query, state: Data<AppState>) -> impl Responder {
    let (view_id, handle) = match lookup_view(&query, &state).await {
        Ok(found) => found,
        Err(response) => return response,
    };
    let column: SortColumn = match get_param_str(&query, "column").parse() {
        Ok(column) => column,
        Err(e) => return bad_request(&e),
    };
    run_table(&handle, Msg::SortClicked(column), state.deps()).await;

    let model = handle.lock().await;
    if wants_json(&query) {
        HttpResponse::Ok().json(snapshot(&view_id, &model, model.visible_rows()))
    } else {
        html(render_table(&view_id, &model))
    }
}

pub async fn toggle(query: Query, state: Data<AppState>) -> impl Responder {
    let (view_id, handle) = match lookup_view(&query, &state).await {
        Ok(found) => found,
        Err(response) => return response,
    };
    let id: CourseId = match get_param_str(&query, "id").parse() {
        Ok(id) => id,
        Err(_) => return bad_request("id parameter is required"),
    };
    run_table(&handle, Msg::ToggleRow(id), state.deps()).await;

    let model = handle.lock().await;
    let Some(row) = model.find(id) else {
        return HttpResponse::NotFound().json(json!({"error": format!("course {id} is not loaded")}));
    };
    if wants_json(&query) {
        HttpResponse::Ok().json(json!({"id": id, "expanded": model.is_expanded(id), "row": row}))
    } else {
        html(render_course(&view_id, row, model.is_expanded(id)))
    }
}

pub async fn filter(query: Query, state: Data<AppState>) -> impl Responder {
    let (view_id, handle) = match lookup_view(&query, &state).await {
        Ok(found) => found,
        Err(response) => return response,
    };
    let text = query.get("q").cloned().unwrap_or_default();
    run_table(&handle, Msg::FilterChanged(text), state.deps()).await;

    let model = handle.lock().await;
    if wants_json(&query) {
        HttpResponse::Ok().json(snapshot(&view_id, &model, model.visible_rows()))
    } else {
        html(render_table(&view_id, &model))
    }
}

pub async fn import_page(state: Data<AppState>) -> impl Responder {
    html(render_import_page(state.args.csv_url.as_deref(), None))
}

pub async fn import_run(query: Query, state: Data<AppState>) -> impl Responder {
    let Some(url) = state.args.csv_url.as_deref() else {
        return bad_request("no csv url configured");
    };
    let report = import_from_url(state.store.as_ref(), url).await;
    if wants_json(&query) {
        HttpResponse::Ok().json(report)
    } else {
        html(render_import_result(&report))
    }
}

pub async fn debug(query: Query, state: Data<AppState>) -> impl Responder {
    let report = run_diagnostics(&state.args, state.store.as_ref()).await;
    if wants_json(&query) {
        HttpResponse::Ok().json(report)
    } else {
        html(render_debug_page(&report))
    }
}

pub async fn check_data(query: Query, state: Data<AppState>) -> impl Responder {
    let table = state.store.table().to_string();
    match check_table_data(state.store.as_ref()).await {
        Ok(info) if wants_json(&query) => HttpResponse::Ok().json(info),
        Ok(info) => html(render_check_data_page(&table, Ok(&info))),
        Err(e) if wants_json(&query) => {
            HttpResponse::InternalServerError().json(json!({"error": e.to_string(), "code": e.code()}))
        }
        Err(e) => html(render_check_data_page(&table, Err(&e.to_string()))),
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}
