//! Axum route handlers for the evaluation form.

use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, ResumeFormat};
use crate::models::evaluation::{EvaluationRequest, MAX_JOB_DESCRIPTION_CHARS};
use crate::session::controller::{self, EvaluationView};
use crate::session::{session_cookie, session_id_from_headers, SessionContext, SessionHandle};
use crate::state::AppState;
use crate::views::{IndexPage, ResultPage};

// ────────────────────────────────────────────────────────────────────────────
// Form payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

#[derive(Debug, Default)]
struct EvaluationForm {
    job_description: String,
    resume: Option<ResumeUpload>,
}

fn form_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {e}"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

async fn read_form(mut multipart: Multipart) -> Result<EvaluationForm, AppError> {
    let mut form = EvaluationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error("Malformed form data", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| form_error("Unreadable job description", e))?;
                // textareas submit CRLF line breaks; count and store them as one char
                form.job_description = text.replace("\r\n", "\n");
            }
            "resume" => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| form_error("Unreadable upload", e))?;
                // browsers send an empty, nameless part when no file was chosen
                if data.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                    continue;
                }
                form.resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    let chars = job_description.chars().count();
    if chars > MAX_JOB_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "Job description is {chars} characters; the limit is {MAX_JOB_DESCRIPTION_CHARS}"
        )));
    }
    Ok(())
}

async fn extract_resume(upload: ResumeUpload) -> Result<String, AppError> {
    let mime = upload
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    let format = ResumeFormat::from_mime(mime)?;

    tracing::info!(
        "Extracting {:?} resume {:?} ({} bytes)",
        format,
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.data.len()
    );

    let data = upload.data;
    let text = tokio::task::spawn_blocking(move || extract_text(format, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering helpers
// ────────────────────────────────────────────────────────────────────────────

fn render_result(view: &EvaluationView) -> Result<Html<String>, AppError> {
    let page = ResultPage::new(
        &view.job_description,
        &view.result,
        view.verdict,
        view.suggestions.as_deref(),
    );
    Ok(Html(page.render()?))
}

/// Attaches the session cookie to both successful pages and error pages.
fn with_session(id: Uuid, page: Result<Html<String>, AppError>) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, session_cookie(id))]),
        page,
    )
        .into_response()
}

async fn evaluate(
    state: &AppState,
    session: &mut SessionContext,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = read_form(multipart).await?;
    validate_job_description(&form.job_description)?;
    let upload = form
        .resume
        .ok_or_else(|| AppError::Validation("Please upload a PDF or DOCX resume".to_string()))?;
    let resume_text = extract_resume(upload).await?;

    let request = EvaluationRequest {
        resume_text,
        job_description: form.job_description,
    };
    let view = controller::submit(state.model.as_ref(), session, request).await?;
    render_result(&view)
}

async fn open_session(state: &AppState, headers: &HeaderMap) -> (Uuid, SessionHandle) {
    state
        .sessions
        .get_or_create(session_id_from_headers(headers))
        .await
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// The empty form, pre-filled with the last job description of this session.
pub async fn handle_index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, handle) = open_session(&state, &headers).await;
    let mut session = handle.lock().await;
    session.touch();

    let job_description = session
        .last_evaluation()
        .map(|e| e.request.job_description.as_str())
        .unwrap_or_default();
    let page = IndexPage::new(job_description)
        .render()
        .map(Html)
        .map_err(AppError::from);
    with_session(id, page)
}

/// POST /evaluate
///
/// Multipart `job_description` + `resume`. Extracts, evaluates and renders the result view.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (id, handle) = open_session(&state, &headers).await;
    let mut session = handle.lock().await;
    session.touch();

    let page = evaluate(&state, &mut session, multipart).await;
    with_session(id, page)
}

/// POST /suggestions
///
/// Switches the session to suggestions for good and renders the result view.
pub async fn handle_seek_suggestions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, handle) = open_session(&state, &headers).await;
    let mut session = handle.lock().await;
    session.touch();

    let page = controller::seek_suggestions(state.model.as_ref(), &mut session)
        .await
        .and_then(|view| render_result(&view));
    with_session(id, page)
}

/// GET /result
///
/// Redraws the last result view; includes suggestions once they were requested.
pub async fn handle_result(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, handle) = open_session(&state, &headers).await;
    let mut session = handle.lock().await;
    session.touch();

    let page = controller::redraw(state.model.as_ref(), &session)
        .await
        .and_then(|view| render_result(&view));
    with_session(id, page)
}
