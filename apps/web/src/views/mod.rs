//! HTML pages, rendered with askama from `templates/`.

use askama::Template;
use pulldown_cmark::{html, Event, Options, Parser};

use crate::models::evaluation::{EvaluationResult, Verdict, MAX_JOB_DESCRIPTION_CHARS};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub job_description: &'a str,
    pub max_chars: usize,
}

impl<'a> IndexPage<'a> {
    pub fn new(job_description: &'a str) -> Self {
        Self {
            job_description,
            max_chars: MAX_JOB_DESCRIPTION_CHARS,
        }
    }
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage<'a> {
    pub job_description: &'a str,
    pub max_chars: usize,
    pub match_display: String,
    pub missing_keywords: &'a str,
    pub candidate_summary: &'a str,
    pub experience: &'a str,
    pub verdict: &'static str,
    pub suggestions_html: Option<String>,
}

impl<'a> ResultPage<'a> {
    pub fn new(
        job_description: &'a str,
        result: &'a EvaluationResult,
        verdict: Verdict,
        suggestions: Option<&str>,
    ) -> Self {
        Self {
            job_description,
            max_chars: MAX_JOB_DESCRIPTION_CHARS,
            match_display: format_percentage(result.match_percentage),
            missing_keywords: &result.missing_keywords,
            candidate_summary: &result.candidate_summary,
            experience: &result.experience,
            verdict: verdict.label(),
            suggestions_html: suggestions.map(render_markdown),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub title: &'a str,
    pub message: &'a str,
}

/// `73.0` → `"73%"`, `92.5` → `"92.5%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{value}%")
}

/// Renders model-authored markdown. Raw HTML in the source is shown as text.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}
