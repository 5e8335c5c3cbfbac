/// Maximum accepted length of a pasted job description, in characters.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 5000;

/// Match percentage at or above which a candidate moves forward.
pub const HIRE_THRESHOLD: f64 = 80.0;

/// One submission of the form: the extracted resume plus the pasted job description.
///
/// Kept in the session after evaluation so the suggestion prompt can reuse it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Raw text returned by the model for a single prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCompletion {
    pub raw_text: String,
}

impl ModelCompletion {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

/// The four fields scanned out of an evaluation completion.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub match_percentage: f64,
    pub missing_keywords: String,
    pub candidate_summary: String,
    pub experience: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    MoveForward,
    NotAMatch,
}

impl Verdict {
    /// Inclusive at [`HIRE_THRESHOLD`].
    pub fn from_match(match_percentage: f64) -> Self {
        if match_percentage >= HIRE_THRESHOLD {
            Verdict::MoveForward
        } else {
            Verdict::NotAMatch
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::MoveForward => "Move forward with hiring",
            Verdict::NotAMatch => "Not a Match",
        }
    }
}

impl EvaluationResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_match(self.match_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_threshold_is_inclusive() {
        assert_eq!(Verdict::from_match(80.0), Verdict::MoveForward);
    }

    #[test]
    fn test_verdict_just_below_threshold() {
        assert_eq!(Verdict::from_match(79.9), Verdict::NotAMatch);
    }

    #[test]
    fn test_verdict_full_match() {
        assert_eq!(Verdict::from_match(100.0), Verdict::MoveForward);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::MoveForward.label(), "Move forward with hiring");
        assert_eq!(Verdict::NotAMatch.label(), "Not a Match");
    }

    #[test]
    fn test_result_verdict_uses_match_percentage() {
        let result = EvaluationResult {
            match_percentage: 42.0,
            missing_keywords: String::new(),
            candidate_summary: String::new(),
            experience: String::new(),
        };
        assert_eq!(result.verdict(), Verdict::NotAMatch);
    }
}
