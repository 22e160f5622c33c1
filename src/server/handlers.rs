use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::AppState;
use super::error::UiError;
use super::session::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::error::MedFinderError;
use crate::render;

const PDF_CONTENT_DISPOSITION: &str = "attachment; filename=\"prescription.pdf\"";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub(crate) struct SearchForm {
    pub formula: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub session: Option<Uuid>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenderForm {
    pub session: Uuid,
    pub selected: usize,
}

#[derive(Debug, Serialize)]
struct PageEntry {
    index: usize,
    label: String,
}

#[derive(Debug, Serialize)]
struct PageContext {
    session: Option<String>,
    query: String,
    limit: usize,
    min_limit: usize,
    max_limit: usize,
    searched: bool,
    entries: Vec<PageEntry>,
    selected: Option<usize>,
    dump: Option<String>,
    rendered: bool,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            session: None,
            query: String::new(),
            limit: DEFAULT_LIMIT,
            min_limit: MIN_LIMIT,
            max_limit: MAX_LIMIT,
            searched: false,
            entries: Vec::new(),
            selected: None,
            dump: None,
            rendered: false,
        }
    }
}

fn page(state: &AppState, ctx: &PageContext) -> Result<Html<String>, UiError> {
    let tmpl = state
        .templates
        .get_template("index.html")
        .map_err(MedFinderError::Template)?;
    let html = tmpl.render(ctx).map_err(MedFinderError::Template)?;
    Ok(Html(html))
}

pub(crate) async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, UiError> {
    page(&state, &PageContext::default())
}

pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, UiError> {
    let formula = form.formula;
    if formula.trim().is_empty() {
        // A blank formula does not trigger a lookup.
        return page(&state, &PageContext::default());
    }

    let limit = form.limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let records = state.rxnorm.search(&formula, limit).await;
    debug!(query = %formula, limit, found = records.len(), "lookup complete");

    let id = form.session.unwrap_or_else(Uuid::new_v4);
    let mut session = state.sessions.entry(id).or_default();
    session.reset_for_query(&formula, limit, records);

    let dump = if session.records.is_empty() {
        None
    } else {
        Some(render::json::to_pretty(&session.records)?)
    };
    let ctx = PageContext {
        session: Some(id.to_string()),
        query: formula,
        limit,
        searched: true,
        entries: session
            .records
            .iter()
            .enumerate()
            .map(|(index, r)| PageEntry {
                index,
                label: r.label(),
            })
            .collect(),
        selected: None,
        dump,
        rendered: false,
        ..PageContext::default()
    };
    drop(session);
    state.evict_stale_sessions();

    page(&state, &ctx)
}

pub(crate) async fn render_prescription(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RenderForm>,
) -> Result<Html<String>, UiError> {
    let mut session = state
        .sessions
        .get_mut(&form.session)
        .ok_or_else(|| UiError::NotFound("session".to_string()))?;

    let record = session
        .records
        .get(form.selected)
        .cloned()
        .ok_or_else(|| UiError::BadRequest(format!("no record at index {}", form.selected)))?;

    let pdf = render::pdf::prescription_pdf(&record)?;
    session.selected = Some(form.selected);
    session.pdf = Some(pdf);
    session.touch();

    let ctx = PageContext {
        session: Some(form.session.to_string()),
        query: session.query.clone(),
        limit: session.limit.clamp(MIN_LIMIT, MAX_LIMIT),
        searched: true,
        entries: session
            .records
            .iter()
            .enumerate()
            .map(|(index, r)| PageEntry {
                index,
                label: r.label(),
            })
            .collect(),
        selected: Some(form.selected),
        dump: Some(render::json::to_pretty(&session.records)?),
        rendered: true,
        ..PageContext::default()
    };
    drop(session);

    page(&state, &ctx)
}

pub(crate) async fn download(
    State(state): State<Arc<AppState>>,
    Path(session): Path<Uuid>,
) -> Result<Response, UiError> {
    let mut entry = state
        .sessions
        .get_mut(&session)
        .ok_or_else(|| UiError::NotFound("session".to_string()))?;
    entry.touch();
    let pdf = entry
        .pdf
        .clone()
        .ok_or_else(|| UiError::NotFound("rendered prescription".to_string()))?;
    drop(entry);

    Ok((
        [
            (header::CONTENT_TYPE, PDF_MIME),
            (header::CONTENT_DISPOSITION, PDF_CONTENT_DISPOSITION),
        ],
        pdf,
    )
        .into_response())
}
