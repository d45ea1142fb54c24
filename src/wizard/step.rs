use std::fmt;

use serde::{Deserialize, Serialize};

/// The three stages of the recruiting wizard.
///
/// Steps are walked linearly: JOB_DESCRIPTION → RESUME_UPLOAD → MATCHING
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    JobDescription,
    ResumeUpload,
    Matching,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::JobDescription, Step::ResumeUpload, Step::Matching];

    /// 1-based position in the wizard.
    pub fn number(self) -> u8 {
        match self {
            Step::JobDescription => 1,
            Step::ResumeUpload => 2,
            Step::Matching => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::JobDescription => "Job Description",
            Step::ResumeUpload => "Resume Parsing",
            Step::Matching => "Matching & Scoring",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Step::JobDescription => "Create or upload job requirements",
            Step::ResumeUpload => "Upload candidate resumes",
            Step::Matching => "Review matches and reach out",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::JobDescription => write!(f, "JOB_DESCRIPTION"),
            Step::ResumeUpload => write!(f, "RESUME_UPLOAD"),
            Step::Matching => write!(f, "MATCHING"),
        }
    }
}

/// How a step is drawn in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Active,
    Completed,
    Inactive,
}

/// One entry of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    pub step: Step,
    pub status: StepStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_round_trips() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(4), None);
    }

    #[test]
    fn neighbours_stop_at_the_ends() {
        assert_eq!(Step::JobDescription.prev(), None);
        assert_eq!(Step::JobDescription.next(), Some(Step::ResumeUpload));
        assert_eq!(Step::Matching.prev(), Some(Step::ResumeUpload));
        assert_eq!(Step::Matching.next(), None);
    }

    #[test]
    fn step_display() {
        assert_eq!(Step::JobDescription.to_string(), "JOB_DESCRIPTION");
        assert_eq!(Step::ResumeUpload.to_string(), "RESUME_UPLOAD");
        assert_eq!(Step::Matching.to_string(), "MATCHING");
    }
}
