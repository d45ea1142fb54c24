mod job_description;
mod matching;
mod resume_upload;

pub use job_description::{AuthoringMode, GenerateForm, JobDescriptionStep, JobType};
pub use matching::{
    AnalysisOutcome, EmailDraft, EmailKind, MatchRequest, MatchSummary, MatchingStep,
    build_candidates,
};
pub use resume_upload::{MAX_RESUMES, ResumeUploadStep, UploadSummary, format_file_size};

#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};

    use crate::api::{
        ApiError, FormattedTextResponse, GenerateRequest, MatchAndScoreResponse, RecruitApi,
    };
    use crate::wizard::Document;

    /// Canned [`RecruitApi`] that counts calls. `fails_left` requests fail
    /// with `failure` before the canned responses are served.
    #[derive(Default)]
    pub struct MockApi {
        formatted: Option<FormattedTextResponse>,
        matched: Option<MatchAndScoreResponse>,
        failure: Option<(u16, String)>,
        fails_left: Cell<usize>,
        process_calls: Cell<usize>,
        generate_calls: Cell<usize>,
        match_calls: Cell<usize>,
        last_generate: RefCell<Option<GenerateRequest>>,
        last_match: RefCell<Option<(String, Vec<String>)>>,
    }

    impl MockApi {
        pub fn failing(status: u16, message: &str) -> Self {
            Self::default().fail_times(usize::MAX, status, message)
        }

        pub fn fail_times(mut self, times: usize, status: u16, message: &str) -> Self {
            self.failure = Some((status, message.to_string()));
            self.fails_left = Cell::new(times);
            self
        }

        pub fn with_formatted(mut self, text: &str, processing_time: f64) -> Self {
            self.formatted = Some(FormattedTextResponse {
                formatted_text: text.to_string(),
                processing_time,
            });
            self
        }

        pub fn with_match(mut self, response: MatchAndScoreResponse) -> Self {
            self.matched = Some(response);
            self
        }

        pub fn process_calls(&self) -> usize {
            self.process_calls.get()
        }

        pub fn generate_calls(&self) -> usize {
            self.generate_calls.get()
        }

        pub fn match_calls(&self) -> usize {
            self.match_calls.get()
        }

        pub fn last_generate_request(&self) -> Option<GenerateRequest> {
            self.last_generate.borrow().clone()
        }

        /// Job description and resume names of the last match call.
        pub fn last_match_request(&self) -> Option<(String, Vec<String>)> {
            self.last_match.borrow().clone()
        }

        fn respond<T: Clone>(&self, canned: &Option<T>) -> Result<T, ApiError> {
            let left = self.fails_left.get();
            if left > 0 {
                if left != usize::MAX {
                    self.fails_left.set(left - 1);
                }
                let (status, message) = self.failure.clone().unwrap_or((500, String::new()));
                return Err(ApiError::from_status(status, Some(message)));
            }
            canned
                .clone()
                .ok_or_else(|| ApiError::Decode("no canned response".into()))
        }
    }

    impl RecruitApi for MockApi {
        async fn process_job_description(
            &self,
            _document: &Document,
        ) -> Result<FormattedTextResponse, ApiError> {
            self.process_calls.set(self.process_calls.get() + 1);
            self.respond(&self.formatted)
        }

        async fn generate_job_description(
            &self,
            request: &GenerateRequest,
        ) -> Result<FormattedTextResponse, ApiError> {
            self.generate_calls.set(self.generate_calls.get() + 1);
            *self.last_generate.borrow_mut() = Some(request.clone());
            self.respond(&self.formatted)
        }

        async fn match_and_score(
            &self,
            job_description: &str,
            resumes: &[Document],
        ) -> Result<MatchAndScoreResponse, ApiError> {
            self.match_calls.set(self.match_calls.get() + 1);
            *self.last_match.borrow_mut() = Some((
                job_description.to_string(),
                resumes.iter().map(|r| r.name.clone()).collect(),
            ));
            self.respond(&self.matched)
        }
    }
}
