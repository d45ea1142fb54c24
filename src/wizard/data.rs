use serde::{Deserialize, Serialize};

use super::document::Document;

/// A scored candidate, built only from a match-and-score response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub filename: String,
    pub missing_skills: Vec<String>,
    pub remarks: String,
    /// 0..=100.
    pub match_score: u8,
    pub rank: u32,
    #[serde(default)]
    pub is_top_candidate: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pros: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cons: Vec<String>,
}

/// State shared by all wizard steps. Owned by the flow controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub job_description: String,
    pub resumes: Vec<Document>,
    pub matches: Vec<Candidate>,
}

/// A partial [`WizardState`]; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardUpdate {
    pub job_description: Option<String>,
    pub resumes: Option<Vec<Document>>,
    pub matches: Option<Vec<Candidate>>,
}

impl WizardUpdate {
    pub fn job_description(text: impl Into<String>) -> Self {
        Self {
            job_description: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn resumes(resumes: Vec<Document>) -> Self {
        Self {
            resumes: Some(resumes),
            ..Default::default()
        }
    }

    pub fn matches(matches: Vec<Candidate>) -> Self {
        Self {
            matches: Some(matches),
            ..Default::default()
        }
    }
}

impl WizardState {
    /// Shallow merge: returns a new state with every `Some` field of `update`
    /// replacing the corresponding field of `self`.
    pub fn merged(&self, update: WizardUpdate) -> Self {
        Self {
            job_description: update
                .job_description
                .unwrap_or_else(|| self.job_description.clone()),
            resumes: update.resumes.unwrap_or_else(|| self.resumes.clone()),
            matches: update.matches.unwrap_or_else(|| self.matches.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_only_given_fields() {
        let state = WizardState {
            job_description: "Rust engineer".into(),
            resumes: vec![Document::new("a.pdf", "application/pdf", vec![1])],
            matches: vec![],
        };
        let merged = state.merged(WizardUpdate::job_description("Go engineer"));
        assert_eq!(merged.job_description, "Go engineer");
        assert_eq!(merged.resumes, state.resumes);
        assert_eq!(state.job_description, "Rust engineer");
    }

    #[test]
    fn empty_update_is_identity() {
        let state = WizardState {
            job_description: "x".into(),
            ..Default::default()
        };
        assert_eq!(state.merged(WizardUpdate::default()), state);
    }

    #[test]
    fn candidate_without_pros_or_cons_omits_fields() {
        let candidate = Candidate {
            id: "c-1".into(),
            name: "Ana".into(),
            filename: "ana.pdf".into(),
            missing_skills: vec![],
            remarks: String::new(),
            match_score: 70,
            rank: 1,
            is_top_candidate: true,
            pros: vec![],
            cons: vec![],
        };
        let json = serde_json::to_string(&candidate).unwrap();
        assert!(!json.contains("pros"));
        assert!(!json.contains("cons"));
        assert!(json.contains("\"is_top_candidate\":true"));
    }
}
