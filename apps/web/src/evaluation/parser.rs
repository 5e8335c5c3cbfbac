//! Completion parser — scans the four labelled fields out of an evaluation completion.
//!
//! The model is asked (not forced) to answer with a flat object literal. This scanner
//! looks for `"<Key>":"` and takes everything up to the next `"`. The first occurrence
//! of each key wins. A missing key is reported as a typed error, never defaulted.

use thiserror::Error;

use crate::models::evaluation::EvaluationResult;

pub const KEY_MATCH: &str = "Job Description Match";
pub const KEY_MISSING_KEYWORDS: &str = "Missing Keywords";
pub const KEY_CANDIDATE_SUMMARY: &str = "Candidate Summary";
pub const KEY_EXPERIENCE: &str = "Experience";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("completion has no \"{0}\" field")]
    MissingField(&'static str),

    #[error("\"{0}\" field is not terminated by a closing quote")]
    UnterminatedField(&'static str),

    #[error("match percentage {0:?} is not a number")]
    InvalidPercentage(String),
}

pub fn parse_completion(raw: &str) -> Result<EvaluationResult, ParseError> {
    let match_raw = field_value(raw, KEY_MATCH)?;
    let missing_keywords = field_value(raw, KEY_MISSING_KEYWORDS)?;
    let candidate_summary = field_value(raw, KEY_CANDIDATE_SUMMARY)?;
    let experience = field_value(raw, KEY_EXPERIENCE)?;

    Ok(EvaluationResult {
        match_percentage: parse_percentage(match_raw)?,
        missing_keywords: missing_keywords.to_string(),
        candidate_summary: candidate_summary.to_string(),
        experience: experience.to_string(),
    })
}

/// Value following the first `"<key>":"` up to the next `"`.
fn field_value<'a>(raw: &'a str, key: &'static str) -> Result<&'a str, ParseError> {
    let delimiter = format!("\"{key}\":\"");
    let start = raw
        .find(&delimiter)
        .map(|idx| idx + delimiter.len())
        .ok_or(ParseError::MissingField(key))?;
    let rest = &raw[start..];
    let end = rest.find('"').ok_or(ParseError::UnterminatedField(key))?;
    Ok(&rest[..end])
}

/// `"73%"`, `"73%%"` and `"73"` all parse to `73.0`.
pub fn parse_percentage(value: &str) -> Result<f64, ParseError> {
    let trimmed = value.trim();
    let number = trimmed.trim_end_matches('%').trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseError::InvalidPercentage(value.to_string()))
}
