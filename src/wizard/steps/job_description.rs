//! Step 1: author the job description.
//!
//! Three mutually exclusive modes (upload a document, generate from a short
//! form, or type it by hand) all end in a single text value handed back
//! through `on_update`.

use std::fmt;
use std::str::FromStr;

use crate::api::{GenerateRequest, RecruitApi};
use crate::wizard::Document;
use crate::wizard::notify::{Notification, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthoringMode {
    #[default]
    Upload,
    Ai,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Remote,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Remote => "remote",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "full-time" | "fulltime" => Ok(JobType::FullTime),
            "part-time" | "parttime" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "remote" => Ok(JobType::Remote),
            other => Err(format!(
                "unknown job type `{other}` (expected full-time, part-time, contract or remote)"
            )),
        }
    }
}

/// Fields of the AI generation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateForm {
    pub job_title: String,
    pub experience: String,
    pub company: String,
    pub job_type: Option<JobType>,
    pub skills: String,
    pub industry: String,
    pub location: String,
}

impl GenerateForm {
    /// Title and company are the minimum the server needs.
    pub fn is_ready(&self) -> bool {
        !self.job_title.trim().is_empty() && !self.company.trim().is_empty()
    }

    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            job_title: self.job_title.trim().to_string(),
            experience: self.experience.trim().to_string(),
            company: self.company.trim().to_string(),
            job_type: self.job_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            must_have_skills: self.skills.trim().to_string(),
            industry: self.industry.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct JobDescriptionStep {
    mode: AuthoringMode,
    form: GenerateForm,
    uploaded_file: Option<String>,
    is_processing: bool,
    is_generating: bool,
}

impl JobDescriptionStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthoringMode {
        self.mode
    }

    pub fn select_mode(&mut self, mode: AuthoringMode) {
        self.mode = mode;
    }

    pub fn form(&self) -> &GenerateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut GenerateForm {
        &mut self.form
    }

    /// Name of the last document accepted for upload.
    pub fn uploaded_file(&self) -> Option<&str> {
        self.uploaded_file.as_deref()
    }

    pub fn can_generate(&self) -> bool {
        !self.is_generating && self.form.is_ready()
    }

    /// "Continue" is only offered once there is some non-blank text.
    pub fn can_continue(job_description: &str) -> bool {
        !job_description.trim().is_empty()
    }

    /// Sends a PDF/Word document to the server and replaces the description
    /// with the formatted result. Returns whether the text was replaced.
    pub async fn upload<A: RecruitApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        document: Document,
        on_update: impl FnOnce(String),
    ) -> bool {
        if !document.is_accepted() {
            notifier.notify(Notification::destructive(
                "Invalid file type",
                "Please upload a PDF or Word document.",
            ));
            return false;
        }
        if self.is_processing {
            return false;
        }

        self.uploaded_file = Some(document.name.clone());
        self.mode = AuthoringMode::Upload;
        self.is_processing = true;
        let result = api.process_job_description(&document).await;
        self.is_processing = false;

        match result {
            Ok(response) => {
                on_update(response.formatted_text);
                notifier.notify(Notification::info(
                    "File processed successfully",
                    format!(
                        "{} has been processed in {:.2}s.",
                        document.name, response.processing_time
                    ),
                ));
                true
            }
            Err(err) => {
                tracing::warn!(file = %document.name, error = %err, "job description processing failed");
                notifier.notify(Notification::destructive("Processing failed", err.to_string()));
                false
            }
        }
    }

    /// Asks the server to write a description from the form. Does nothing
    /// unless [`can_generate`](Self::can_generate) holds.
    pub async fn generate<A: RecruitApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        on_update: impl FnOnce(String),
    ) -> bool {
        if !self.can_generate() {
            tracing::debug!("generate requested without title and company");
            return false;
        }

        self.mode = AuthoringMode::Ai;
        self.is_generating = true;
        let result = api.generate_job_description(&self.form.to_request()).await;
        self.is_generating = false;

        match result {
            Ok(response) => {
                on_update(response.formatted_text);
                notifier.notify(Notification::info(
                    "Job description generated",
                    format!(
                        "AI has successfully created your job description in {:.2}s.",
                        response.processing_time
                    ),
                ));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "job description generation failed");
                notifier.notify(Notification::destructive("Generation failed", err.to_string()));
                false
            }
        }
    }

    /// Manual edits go straight up, unvalidated.
    pub fn write_manual(&mut self, text: String, on_update: impl FnOnce(String)) {
        self.mode = AuthoringMode::Manual;
        on_update(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::notify::Severity;
    use crate::wizard::notify::testing::RecordingNotifier;
    use crate::wizard::steps::testing::MockApi;

    fn pdf() -> Document {
        Document::new("role.pdf", "application/pdf", b"%PDF".to_vec())
    }

    #[test]
    fn continue_needs_non_blank_text() {
        assert!(!JobDescriptionStep::can_continue(""));
        assert!(!JobDescriptionStep::can_continue("   \n\t"));
        assert!(JobDescriptionStep::can_continue(" Staff engineer "));
    }

    #[test]
    fn generate_needs_title_and_company() {
        let mut step = JobDescriptionStep::new();
        assert!(!step.can_generate());
        step.form_mut().job_title = "Site Reliability Engineer".into();
        assert!(!step.can_generate());
        step.form_mut().company = "  ".into();
        assert!(!step.can_generate());
        step.form_mut().company = "Acme".into();
        assert!(step.can_generate());
    }

    #[test]
    fn job_type_parses_loose_spellings() {
        assert_eq!("Full time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!("part_time".parse::<JobType>(), Ok(JobType::PartTime));
        assert_eq!("REMOTE".parse::<JobType>(), Ok(JobType::Remote));
        assert!("gig".parse::<JobType>().is_err());
    }

    #[test]
    fn form_maps_to_request() {
        let form = GenerateForm {
            job_title: " ML Engineer ".into(),
            company: "Acme".into(),
            job_type: Some(JobType::Contract),
            skills: "PyTorch".into(),
            ..Default::default()
        };
        let req = form.to_request();
        assert_eq!(req.job_title, "ML Engineer");
        assert_eq!(req.job_type, "contract");
        assert_eq!(req.must_have_skills, "PyTorch");
        assert_eq!(req.location, "");
    }

    #[tokio::test]
    async fn upload_replaces_text_on_success() {
        let api = MockApi::default().with_formatted("Formatted role", 1.234);
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        step.select_mode(AuthoringMode::Manual);
        let mut text = String::from("old");

        let ok = step.upload(&api, &notifier, pdf(), |t| text = t).await;

        assert!(ok);
        assert_eq!(text, "Formatted role");
        assert_eq!(step.mode(), AuthoringMode::Upload);
        assert_eq!(step.uploaded_file(), Some("role.pdf"));
        let n = notifier.find("File processed successfully").unwrap();
        assert_eq!(n.description, "role.pdf has been processed in 1.23s.");
        assert_eq!(api.process_calls(), 1);
    }

    #[tokio::test]
    async fn upload_rejects_wrong_type_without_calling_api() {
        let api = MockApi::default().with_formatted("unused", 0.0);
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        let mut text = String::from("keep me");

        let doc = Document::new("role.txt", "text/plain", b"hi".to_vec());
        let ok = step.upload(&api, &notifier, doc, |t| text = t).await;

        assert!(!ok);
        assert_eq!(text, "keep me");
        assert_eq!(api.process_calls(), 0);
        let n = notifier.find("Invalid file type").unwrap();
        assert_eq!(n.severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn upload_failure_keeps_text_and_reports_message() {
        let api = MockApi::failing(400, "Could not parse PDF");
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        let mut text = String::from("original");

        let ok = step.upload(&api, &notifier, pdf(), |t| text = t).await;

        assert!(!ok);
        assert_eq!(text, "original");
        let n = notifier.find("Processing failed").unwrap();
        assert_eq!(n.description, "Could not parse PDF");
        assert_eq!(n.severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn generate_is_gated_on_form() {
        let api = MockApi::default().with_formatted("unused", 0.0);
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        let mut updated = false;

        let ok = step.generate(&api, &notifier, |_| updated = true).await;

        assert!(!ok);
        assert!(!updated);
        assert_eq!(api.generate_calls(), 0);
        assert!(notifier.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn generate_replaces_text_on_success() {
        let api = MockApi::default().with_formatted("Generated JD", 3.0);
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        step.form_mut().job_title = "Backend Engineer".into();
        step.form_mut().company = "Acme".into();
        let mut text = String::new();

        let ok = step.generate(&api, &notifier, |t| text = t).await;

        assert!(ok);
        assert_eq!(text, "Generated JD");
        assert_eq!(step.mode(), AuthoringMode::Ai);
        assert_eq!(
            notifier.find("Job description generated").unwrap().description,
            "AI has successfully created your job description in 3.00s."
        );
        assert_eq!(
            api.last_generate_request().unwrap().job_title,
            "Backend Engineer"
        );
    }

    #[tokio::test]
    async fn generate_failure_leaves_text_unchanged() {
        let api = MockApi::failing(500, "model overloaded");
        let notifier = RecordingNotifier::default();
        let mut step = JobDescriptionStep::new();
        step.form_mut().job_title = "Backend Engineer".into();
        step.form_mut().company = "Acme".into();
        let mut text = String::from("draft");

        let ok = step.generate(&api, &notifier, |t| text = t).await;

        assert!(!ok);
        assert_eq!(text, "draft");
        assert_eq!(notifier.titles(), vec!["Generation failed".to_string()]);
        assert!(step.can_generate());
    }

    #[test]
    fn manual_entry_propagates_verbatim() {
        let mut step = JobDescriptionStep::new();
        let mut text = String::new();
        step.write_manual("  We are hiring  ".into(), |t| text = t);
        assert_eq!(text, "  We are hiring  ");
        assert_eq!(step.mode(), AuthoringMode::Manual);
    }
}
