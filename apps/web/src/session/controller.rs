//! Session controller: the evaluation flow and the gated suggestion call.
//!
//! Once a session has asked for suggestions, every later render of the result
//! view (a new submission or a plain redraw) issues the suggestion prompt again.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::evaluation::parser::parse_completion;
use crate::evaluation::prompts::{build_evaluation_prompt, build_suggestion_prompt};
use crate::llm_client::CompletionModel;
use crate::models::evaluation::{EvaluationRequest, EvaluationResult, Verdict};
use crate::session::{SessionContext, SessionPhase, StoredEvaluation};

/// Everything the result page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationView {
    pub job_description: String,
    pub result: EvaluationResult,
    pub verdict: Verdict,
    pub suggestions: Option<String>,
}

/// Evaluates a fresh submission and stores it in the session.
///
/// The evaluation replaces the stored one only after the whole view, including
/// any sticky suggestion call, has been built.
pub async fn submit(
    model: &dyn CompletionModel,
    session: &mut SessionContext,
    request: EvaluationRequest,
) -> Result<EvaluationView, AppError> {
    let completion = model.complete(&build_evaluation_prompt(&request)).await?;

    let result = parse_completion(&completion.raw_text).map_err(|e| {
        debug!("Completion that failed to parse: {}", completion.raw_text);
        e
    })?;

    info!(
        "Evaluated resume: match={}%, verdict={:?}",
        result.match_percentage,
        result.verdict()
    );

    let stored = StoredEvaluation { request, result };
    let view = build_view(model, session.phase(), &stored).await?;
    session.store_evaluation(stored);
    Ok(view)
}

/// Moves the session to `SuggestionsShown` and renders the result view.
pub async fn seek_suggestions(
    model: &dyn CompletionModel,
    session: &mut SessionContext,
) -> Result<EvaluationView, AppError> {
    if session.last_evaluation().is_none() {
        return Err(AppError::Validation(
            "Submit a job description and resume before asking for suggestions".to_string(),
        ));
    }
    if session.phase() == SessionPhase::Idle {
        info!("Session switched to suggestions");
    }
    session.reveal_suggestions();
    render(model, session).await
}

/// Re-renders the stored result view.
pub async fn redraw(
    model: &dyn CompletionModel,
    session: &SessionContext,
) -> Result<EvaluationView, AppError> {
    render(model, session).await
}

async fn render(
    model: &dyn CompletionModel,
    session: &SessionContext,
) -> Result<EvaluationView, AppError> {
    let stored = session
        .last_evaluation()
        .ok_or_else(|| AppError::NotFound("No evaluation in this session yet".to_string()))?;
    build_view(model, session.phase(), stored).await
}

async fn build_view(
    model: &dyn CompletionModel,
    phase: SessionPhase,
    stored: &StoredEvaluation,
) -> Result<EvaluationView, AppError> {
    let suggestions = match phase {
        SessionPhase::SuggestionsShown => {
            let prompt = build_suggestion_prompt(&stored.request);
            Some(model.complete(&prompt).await?.raw_text)
        }
        SessionPhase::Idle => None,
    };

    Ok(EvaluationView {
        job_description: stored.request.job_description.clone(),
        result: stored.result.clone(),
        verdict: stored.result.verdict(),
        suggestions,
    })
}
