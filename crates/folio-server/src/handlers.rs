//! Page handlers
//!
//! Positional indices in paths come straight from the links rendered on the
//! home page. The edit form submits by stable id so that an index shift
//! between fetching and submitting cannot redirect the edit to another project.

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use folio_core::Error;
use folio_core::projects::{ProjectDraft, TechnologySet};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::{AppError, AppState, views};

/// Fields posted by the create and edit forms
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    #[serde(rename = "project-name")]
    pub name: String,
    #[serde(rename = "date-start")]
    pub start_date: String,
    #[serde(rename = "date-end")]
    pub end_date: String,
    #[serde(rename = "project-description")]
    pub description: String,
    pub nodejs: Option<String>,
    pub reactjs: Option<String>,
    pub nextjs: Option<String>,
    pub typescript: Option<String>,
}

impl From<ProjectForm> for ProjectDraft {
    fn from(form: ProjectForm) -> Self {
        ProjectDraft {
            name: form.name,
            start_date: form.start_date,
            end_date: form.end_date,
            description: form.description,
            technologies: TechnologySet::from_markers([
                form.nodejs,
                form.reactjs,
                form.nextjs,
                form.typescript,
            ]),
        }
    }
}

/// Parse a positional index from a path segment; anything else is not found
pub fn parse_index(raw: &str) -> Result<usize, AppError> {
    raw.parse::<usize>()
        .map_err(|_| AppError(Error::ProjectNotFound(raw.to_string())))
}

/// Decode a submitted form, reporting an unreadable body as a form error
fn form_draft(form: Result<Form<ProjectForm>, FormRejection>) -> Result<ProjectDraft, AppError> {
    let Form(form) =
        form.map_err(|rejection| AppError(Error::validation("form", rejection.body_text())))?;
    Ok(form.into())
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError(Error::ProjectNotFound(raw.to_string())))
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let projects = state.projects.list().await;
    Html(views::home(&projects))
}

pub async fn contact() -> Html<String> {
    Html(views::contact())
}

pub async fn project_form() -> Html<String> {
    Html(views::project_form())
}

pub async fn project_detail(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Html<String>, AppError> {
    let index = parse_index(&index)?;
    let project = state.projects.get(index).await?;
    Ok(Html(views::project_detail(index, &project)))
}

pub async fn create_project(
    State(state): State<AppState>,
    form: Result<Form<ProjectForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let draft = form_draft(form)?;
    state.projects.create(draft).await?;
    Ok(Redirect::to("/"))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Html<String>, AppError> {
    let index = parse_index(&index)?;
    let editable = state.projects.edit_fetch(index).await?;
    Ok(Html(views::update_form(&editable)))
}

pub async fn submit_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<ProjectForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let draft = form_draft(form)?;
    state.projects.update(id, draft).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Redirect, AppError> {
    let index = parse_index(&index)?;
    state.projects.delete(index).await?;
    Ok(Redirect::to("/"))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn not_found(uri: axum::http::Uri) -> Response {
    debug!(path = %uri.path(), "No route");
    let err = Error::Other(format!("No page at {}", uri.path()));
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page(StatusCode::NOT_FOUND, &err)),
    )
        .into_response()
}
