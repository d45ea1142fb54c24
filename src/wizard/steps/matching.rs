//! Step 3: score the resumes against the job description and act on the
//! results.

use std::fmt;

use tokio::sync::watch;

use crate::api::{MatchAnalytics, MatchAndScoreResponse, RecruitApi};
use crate::wizard::countdown::{Countdown, CountdownOutcome};
use crate::wizard::notify::{Clipboard, Notification, Notifier};
use crate::wizard::{Candidate, Document};

/// Lifecycle of the match-and-score request for one mount of the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchRequest {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl MatchRequest {
    /// A new request may start from `Idle`, or from `Failed` as a retry.
    pub fn can_start(self) -> bool {
        matches!(self, MatchRequest::Idle | MatchRequest::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// No request was issued.
    Skipped,
    /// The match list was replaced with this many candidates.
    Matched(usize),
    Failed,
}

/// Headline numbers shown above the results table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MatchSummary {
    pub candidates_analyzed: usize,
    pub average_match_score: u8,
    pub top_match_score: u8,
    pub best_candidate: Option<String>,
    pub best_candidate_reason: Option<String>,
}

impl MatchSummary {
    /// Computes the summary from the candidates alone.
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let total: u32 = candidates.iter().map(|c| u32::from(c.match_score)).sum();
        let average = if candidates.is_empty() {
            0
        } else {
            normalize_score(f64::from(total) / candidates.len() as f64)
        };
        Self {
            candidates_analyzed: candidates.len(),
            average_match_score: average,
            top_match_score: candidates.iter().map(|c| c.match_score).max().unwrap_or(0),
            best_candidate: candidates
                .iter()
                .find(|c| c.is_top_candidate)
                .map(|c| c.name.clone()),
            best_candidate_reason: None,
        }
    }

    /// Prefers the server's analytics; anything missing or zero is filled in
    /// from the candidates.
    pub fn from_analytics(analytics: &MatchAnalytics, candidates: &[Candidate]) -> Self {
        let fallback = Self::from_candidates(candidates);
        Self {
            candidates_analyzed: if analytics.candidates_analyzed > 0 {
                analytics.candidates_analyzed as usize
            } else {
                fallback.candidates_analyzed
            },
            average_match_score: if analytics.average_match_score > 0.0 {
                normalize_score(analytics.average_match_score)
            } else {
                fallback.average_match_score
            },
            top_match_score: if analytics.top_match_score > 0.0 {
                normalize_score(analytics.top_match_score)
            } else {
                fallback.top_match_score
            },
            best_candidate: non_empty(&analytics.best_candidate).or(fallback.best_candidate),
            best_candidate_reason: non_empty(&analytics.best_candidate_reason),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Rounds to the nearest integer and clamps into 0..=100.
fn normalize_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// Turns a match-and-score response into the candidate list.
///
/// Each ranking is paired with its `candidates_data` entry by candidate id.
/// The output is ordered by rank. Exactly one candidate is flagged as top:
/// the highest score, the earliest in the response on a tie.
pub fn build_candidates(response: &MatchAndScoreResponse) -> Vec<Candidate> {
    let rankings = &response.analytics.candidate_rankings;

    let mut candidates: Vec<Candidate> = rankings
        .iter()
        .enumerate()
        .map(|(i, ranking)| {
            let data = response.candidates_data.get(&ranking.candidate_uuid);
            if data.is_none() {
                tracing::debug!(id = %ranking.candidate_uuid, "ranking without candidate data");
            }
            let data = data.cloned().unwrap_or_default();
            let name = non_empty(&data.candidate_name)
                .or_else(|| non_empty(&ranking.candidate_name))
                .unwrap_or_else(|| format!("Candidate {}", i + 1));
            Candidate {
                id: ranking.candidate_uuid.clone(),
                name,
                filename: data.resume_name,
                missing_skills: data.missing_skills,
                remarks: ranking.summary.clone(),
                match_score: normalize_score(ranking.match_score),
                rank: ranking.rank,
                is_top_candidate: false,
                pros: data.pros,
                cons: data.cons,
            }
        })
        .collect();

    let mut top: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        match top {
            Some(t) if candidates[t].match_score >= candidate.match_score => {}
            _ => top = Some(i),
        }
    }
    if let Some(t) = top {
        candidates[t].is_top_candidate = true;
    }

    // Stable: equal ranks keep response order.
    candidates.sort_by_key(|c| c.rank);
    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    Accept,
    Reject,
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailKind::Accept => write!(f, "Accept"),
            EmailKind::Reject => write!(f, "Reject"),
        }
    }
}

/// Editable outreach email for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub candidate_name: String,
    pub kind: EmailKind,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn for_candidate(candidate_name: &str, kind: EmailKind) -> Self {
        let (subject, body) = match kind {
            EmailKind::Accept => (
                "Exciting Opportunity - Next Steps in Our Hiring Process".to_string(),
                format!(
                    "Dear {candidate_name},

Thank you for your interest in our position. We were impressed by your background and would like to move forward with the next steps in our hiring process.

Based on your resume and qualifications, we believe you would be a great fit for our team. We'd like to schedule a phone interview to discuss the role further and learn more about your experience.

Would you be available for a 30-minute call sometime next week? Please let me know your preferred time slots and I'll send over a calendar invite.

Looking forward to speaking with you soon!

Best regards,
[Your Name]
[Your Title]
[Company Name]"
                ),
            ),
            EmailKind::Reject => (
                "Thank you for your interest in our position".to_string(),
                format!(
                    "Dear {candidate_name},

Thank you for taking the time to apply for our position and for your interest in joining our team.

After careful consideration of all applications, we have decided to move forward with other candidates whose qualifications more closely match our current needs.

We were impressed by your background and encourage you to apply for future opportunities that may be a better fit for your skills and experience.

We wish you the best of luck in your job search.

Best regards,
[Your Name]
[Your Title]
[Company Name]"
                ),
            ),
        };
        Self {
            candidate_name: candidate_name.to_string(),
            kind,
            subject,
            body,
        }
    }

    /// `Subject: <subject>`, a blank line, then the body.
    pub fn clipboard_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

/// Local state of the matching step. A fresh value models a fresh mount.
#[derive(Debug, Default)]
pub struct MatchingStep {
    request: MatchRequest,
    summary: Option<MatchSummary>,
    draft: Option<EmailDraft>,
}

impl MatchingStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_state(&self) -> MatchRequest {
        self.request
    }

    /// Summary of the last successful analysis, or one computed from
    /// `matches` when this mount has not run one.
    pub fn summary_for(&self, matches: &[Candidate]) -> MatchSummary {
        self.summary
            .clone()
            .unwrap_or_else(|| MatchSummary::from_candidates(matches))
    }

    /// Issues the match-and-score call once per mount: only with resumes,
    /// only while no matches exist, and only when the latch allows it.
    pub async fn run_analysis<A: RecruitApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        job_description: &str,
        resumes: &[Document],
        matches: &[Candidate],
        on_update: impl FnOnce(Vec<Candidate>),
    ) -> AnalysisOutcome {
        if resumes.is_empty() || !matches.is_empty() || !self.request.can_start() {
            return AnalysisOutcome::Skipped;
        }
        self.issue(api, notifier, job_description, resumes, on_update)
            .await
    }

    /// Re-scores even when matches exist. The old list survives a failure.
    pub async fn reanalyze<A: RecruitApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        job_description: &str,
        resumes: &[Document],
        on_update: impl FnOnce(Vec<Candidate>),
    ) -> AnalysisOutcome {
        if resumes.is_empty() || self.request == MatchRequest::Pending {
            return AnalysisOutcome::Skipped;
        }
        self.issue(api, notifier, job_description, resumes, on_update)
            .await
    }

    async fn issue<A: RecruitApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        job_description: &str,
        resumes: &[Document],
        on_update: impl FnOnce(Vec<Candidate>),
    ) -> AnalysisOutcome {
        self.request = MatchRequest::Pending;
        tracing::info!(resumes = resumes.len(), "requesting match and score");

        let response = match api.match_and_score(job_description, resumes).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "match and score failed");
                self.request = MatchRequest::Failed;
                notifier.notify(Notification::destructive("Matching failed", err.to_string()));
                return AnalysisOutcome::Failed;
            }
        };

        let candidates = build_candidates(&response);
        if candidates.is_empty() {
            self.request = MatchRequest::Failed;
            notifier.notify(Notification::destructive(
                "Matching failed",
                "The server returned no candidate rankings.",
            ));
            return AnalysisOutcome::Failed;
        }

        let count = candidates.len();
        self.summary = Some(MatchSummary::from_analytics(&response.analytics, &candidates));
        self.request = MatchRequest::Succeeded;
        on_update(candidates);
        notifier.notify(Notification::info(
            "Analysis complete",
            format!("{count} candidate(s) scored."),
        ));
        AnalysisOutcome::Matched(count)
    }

    /// Starts an Accept or Reject email for `candidate`, replacing any
    /// previous draft.
    pub fn draft_email(&mut self, candidate: &Candidate, kind: EmailKind) -> &mut EmailDraft {
        self.draft
            .insert(EmailDraft::for_candidate(&candidate.name, kind))
    }

    pub fn draft(&self) -> Option<&EmailDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EmailDraft> {
        self.draft.as_mut()
    }

    /// Copies the current draft. Returns `false` without a draft or when the
    /// clipboard refused the write.
    pub fn copy_email<C: Clipboard, N: Notifier>(&self, clipboard: &mut C, notifier: &N) -> bool {
        let Some(draft) = &self.draft else {
            return false;
        };
        match clipboard.write_text(&draft.clipboard_text()) {
            Ok(()) => {
                notifier.notify(Notification::info(
                    "Copied to clipboard",
                    "Email content has been copied to your clipboard.",
                ));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                notifier.notify(Notification::destructive(
                    "Failed to copy",
                    "Please copy the text manually.",
                ));
                false
            }
        }
    }

    /// Marks the step complete through `on_complete`, then counts down.
    /// [`CountdownOutcome::Elapsed`] means the caller should return to step 1.
    pub async fn complete_analysis(
        &mut self,
        countdown: &Countdown,
        cancel: watch::Receiver<bool>,
        on_complete: impl FnOnce(),
        on_tick: impl FnMut(u32),
    ) -> CountdownOutcome {
        on_complete();
        self.draft = None;
        countdown.run(cancel, on_tick).await
    }
}
