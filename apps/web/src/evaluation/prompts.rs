// All LLM prompt templates for resume evaluation.
// Placeholders: {resume_text}, {job_description}.

use crate::models::evaluation::EvaluationRequest;

/// Evaluation prompt. The requested response shape is what `parser` scans for.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"
As an experienced Applicant Tracking System (ATS) analyst,
with profound knowledge in technology, software engineering, data science,
and big data engineering, your role involves evaluating resumes against job descriptions.
Recognizing the competitive job market, provide top-notch assistance for resume improvement.
Your goal is to analyze the resume against the given job description,
assign a percentage match based on key criteria, and pinpoint missing keywords accurately.
resume:{resume_text}
description:{job_description}
I want the response in one single string having the structure
{"Job Description Match":"%","Missing Keywords":"","Candidate Summary":"","Experience":""}
"#;

/// Suggestion prompt. Output is shown verbatim.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"
As an experienced Applicant Tracking System (ATS) analyst,
with deep expertise in resume optimization for better alignment with job descriptions,
your role is to provide actionable suggestions to help candidates improve their resumes.
You will thoroughly review the provided resume in comparison with the job description and
identify key areas for improvement. Focus on enhancing the match percentage by recommending
changes in experience details, skills, and keywords, while ensuring the resume is tailored to the job description.
resume: {resume_text}
description: {job_description}
"#;

pub fn build_evaluation_prompt(request: &EvaluationRequest) -> String {
    fill(EVALUATION_PROMPT_TEMPLATE, request)
}

pub fn build_suggestion_prompt(request: &EvaluationRequest) -> String {
    fill(SUGGESTION_PROMPT_TEMPLATE, request)
}

// Each placeholder is substituted exactly once, so template tokens that happen
// to appear inside the resume or the job description are left alone.
fn fill(template: &str, request: &EvaluationRequest) -> String {
    match template.split_once("{job_description}") {
        Some((head, tail)) => format!(
            "{}{}{}",
            head.replace("{resume_text}", &request.resume_text),
            request.job_description,
            tail
        ),
        None => template.replace("{resume_text}", &request.resume_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EvaluationRequest {
        EvaluationRequest {
            resume_text: "Built Rust services".to_string(),
            job_description: "Hiring a Go engineer".to_string(),
        }
    }

    #[test]
    fn test_evaluation_prompt_substitutes_both_inputs() {
        let prompt = build_evaluation_prompt(&request());
        assert!(prompt.contains("resume:Built Rust services\n"));
        assert!(prompt.contains("description:Hiring a Go engineer\n"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_evaluation_prompt_requests_four_key_shape() {
        let prompt = build_evaluation_prompt(&request());
        assert!(prompt.contains(
            r#"{"Job Description Match":"%","Missing Keywords":"","Candidate Summary":"","Experience":""}"#
        ));
    }

    #[test]
    fn test_suggestion_prompt_substitutes_both_inputs() {
        let prompt = build_suggestion_prompt(&request());
        assert!(prompt.contains("resume: Built Rust services\n"));
        assert!(prompt.contains("description: Hiring a Go engineer\n"));
        assert!(prompt.contains("actionable suggestions"));
    }

    #[test]
    fn test_placeholder_text_inside_resume_is_not_expanded() {
        let req = EvaluationRequest {
            resume_text: "literal {job_description} token".to_string(),
            job_description: "JD".to_string(),
        };
        let prompt = build_evaluation_prompt(&req);
        assert!(prompt.contains("resume:literal {job_description} token\n"));
        assert!(prompt.contains("description:JD\n"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(
            build_suggestion_prompt(&request()),
            build_suggestion_prompt(&request())
        );
    }
}
