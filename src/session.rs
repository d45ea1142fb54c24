//! Interactive terminal wizard.
//!
//! [`WizardSession`] reads commands line by line, routes them to the step
//! that is currently shown, and applies the steps' updates to the
//! [`FlowController`]. Input arrives on a channel so that the completion
//! countdown can be cancelled by the same reader that feeds the prompts.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use crate::api::RecruitApi;
use crate::report::MatchReport;
use crate::ui::{self, Spinner};
use crate::wizard::notify::{Clipboard, Notification, Notifier};
use crate::wizard::steps::{
    AnalysisOutcome, AuthoringMode, EmailKind, JobDescriptionStep, JobType, MatchRequest,
    MatchingStep, ResumeUploadStep,
};
use crate::wizard::{Countdown, CountdownOutcome, Document, FlowController, Step, WizardUpdate};

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Next,
    Back,
    Quit,
    Upload(PathBuf),
    Generate,
    Manual,
    Add(Vec<PathBuf>),
    Remove(usize),
    Accept(usize),
    Reject(usize),
    Subject(String),
    Body,
    Copy,
    Retry,
    Reanalyze,
    Save(PathBuf),
    Complete,
}

/// Parses `line` in the context of `step`. Commands that belong to another
/// step are rejected with a hint.
pub fn parse_command(step: Step, line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => return Err("Type `help` to see the available commands.".into()),
        "help" | "?" => Command::Help,
        "show" | "ls" | "list" => Command::Show,
        "next" | "continue" => Command::Next,
        "back" | "prev" => Command::Back,
        "quit" | "exit" | "q" => Command::Quit,
        "upload" => Command::Upload(required_path(rest)?),
        "generate" | "ai" => Command::Generate,
        "manual" | "edit" => Command::Manual,
        "add" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("Usage: add <file> [file...]".into());
            }
            Command::Add(paths)
        }
        "remove" | "rm" => Command::Remove(position(rest)?),
        "accept" => Command::Accept(position(rest)?),
        "reject" => Command::Reject(position(rest)?),
        "subject" => {
            if rest.is_empty() {
                return Err("Usage: subject <text>".into());
            }
            Command::Subject(rest.to_string())
        }
        "body" => Command::Body,
        "copy" => Command::Copy,
        "retry" => Command::Retry,
        "reanalyze" => Command::Reanalyze,
        "save" => Command::Save(required_path(rest)?),
        "complete" | "done" => Command::Complete,
        other => return Err(format!("Unknown command `{other}`. Type `help`.")),
    };

    if command_step(&command).is_some_and(|s| s != step) {
        return Err(format!("`{word}` is not available on the {} step.", step.title()));
    }
    Ok(command)
}

fn command_step(command: &Command) -> Option<Step> {
    match command {
        Command::Upload(_) | Command::Generate | Command::Manual => Some(Step::JobDescription),
        Command::Add(_) | Command::Remove(_) => Some(Step::ResumeUpload),
        Command::Accept(_)
        | Command::Reject(_)
        | Command::Subject(_)
        | Command::Body
        | Command::Copy
        | Command::Retry
        | Command::Reanalyze
        | Command::Save(_)
        | Command::Complete => Some(Step::Matching),
        Command::Help | Command::Show | Command::Next | Command::Back | Command::Quit => None,
    }
}

fn required_path(rest: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        return Err("A file path is required.".into());
    }
    Ok(PathBuf::from(rest))
}

/// 1-based list position.
fn position(rest: &str) -> Result<usize, String> {
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Expected a list number, e.g. `2`.".into()),
    }
}

fn help_text(step: Step) -> &'static str {
    match step {
        Step::JobDescription => {
            "upload <file>   process a PDF/Word job description\n\
             generate        write one with AI from a short form\n\
             manual          type or paste it yourself\n\
             show            print the current description\n\
             next            continue to resumes\n\
             quit"
        }
        Step::ResumeUpload => {
            "add <file>...   add PDF/Word resumes (max 10)\n\
             remove <n>      remove resume n\n\
             list            show uploaded resumes\n\
             back / next     navigate\n\
             quit"
        }
        Step::Matching => {
            "show            results table\n\
             accept <n>      draft an interview invitation\n\
             reject <n>      draft a rejection\n\
             subject <text>  edit the draft subject\n\
             body            rewrite the draft body\n\
             copy            copy the draft to the clipboard\n\
             retry           retry a failed analysis\n\
             reanalyze       score the resumes again\n\
             save <file>     export results as JSON\n\
             complete        finish and start over\n\
             back / quit"
        }
    }
}

/// Spawns a thread forwarding stdin lines. The channel closes on EOF.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
                    if tx.send(trimmed).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

pub struct WizardSession<A, N, C> {
    api: A,
    notifier: N,
    clipboard: C,
    countdown: Countdown,
    input: mpsc::UnboundedReceiver<String>,
    flow: FlowController,
    job_step: JobDescriptionStep,
    matching: MatchingStep,
}

impl<A: RecruitApi, N: Notifier, C: Clipboard> WizardSession<A, N, C> {
    pub fn new(
        api: A,
        notifier: N,
        clipboard: C,
        countdown: Countdown,
        input: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            clipboard,
            countdown,
            input,
            flow: FlowController::new(),
            job_step: JobDescriptionStep::new(),
            matching: MatchingStep::new(),
        }
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let mut shown: Option<Step> = None;
        loop {
            let step = self.flow.current_step();
            if shown != Some(step) {
                self.render();
                shown = Some(step);
            }

            let Some(line) = self.prompt(&format!("[{}] > ", step.number())).await else {
                break;
            };
            let command = match parse_command(step, &line) {
                Ok(command) => command,
                Err(hint) => {
                    println!("{hint}");
                    continue;
                }
            };
            tracing::debug!(?command, %step, "wizard command");

            match command {
                Command::Quit => break,
                Command::Help => println!("{}", help_text(step)),
                Command::Show => self.render(),
                Command::Next => self.next().await,
                Command::Back => self.back(),
                Command::Upload(path) => self.upload_job_description(path).await,
                Command::Generate => self.generate_job_description().await,
                Command::Manual => self.manual_job_description().await,
                Command::Add(paths) => self.add_resumes(paths),
                Command::Remove(n) => {
                    let current = self.flow.data().resumes.clone();
                    let flow = &mut self.flow;
                    if ResumeUploadStep::remove_file(&current, n - 1, &self.notifier, |r| {
                        flow.update_data(WizardUpdate::resumes(r))
                    }) {
                        self.discard_stale_matches();
                    } else {
                        println!("There is no resume number {n}.");
                    }
                }
                Command::Accept(n) => self.draft_email(n, EmailKind::Accept),
                Command::Reject(n) => self.draft_email(n, EmailKind::Reject),
                Command::Subject(subject) => match self.matching.draft_mut() {
                    Some(draft) => draft.subject = subject,
                    None => println!("Start a draft with `accept <n>` or `reject <n>` first."),
                },
                Command::Body => self.edit_body().await,
                Command::Copy => {
                    if self.matching.draft().is_none() {
                        println!("Start a draft with `accept <n>` or `reject <n>` first.");
                    } else {
                        self.matching.copy_email(&mut self.clipboard, &self.notifier);
                    }
                }
                Command::Retry => self.analyze(false).await,
                Command::Reanalyze => self.analyze(true).await,
                Command::Save(path) => self.save_report(path),
                Command::Complete => self.complete().await,
            }
        }
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{label}");
        let _ = std::io::stdout().flush();
        self.input.recv().await
    }

    /// Lines up to a lone `.` (or end of input).
    async fn read_block(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(line) = self.input.recv().await {
            if line.trim() == "." {
                break;
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn render(&self) {
        ui::print_progress(&self.flow.progress());
        let data = self.flow.data();
        match self.flow.current_step() {
            Step::JobDescription => {
                if !data.job_description.trim().is_empty() {
                    let source = match (self.job_step.mode(), self.job_step.uploaded_file()) {
                        (AuthoringMode::Upload, Some(name)) => format!("processed from {name}"),
                        (AuthoringMode::Upload, None) => "uploaded".to_string(),
                        (AuthoringMode::Ai, _) => "generated with AI".to_string(),
                        (AuthoringMode::Manual, _) => "written by hand".to_string(),
                    };
                    println!("Current description ({source}):");
                }
                ui::print_job_description(&data.job_description);
            }
            Step::ResumeUpload => ui::print_resumes(&data.resumes),
            Step::Matching => match self.matching.request_state() {
                MatchRequest::Pending => {
                    println!("Processing resumes and generating matches...")
                }
                MatchRequest::Failed if data.matches.is_empty() => {
                    println!("The analysis failed. Use `retry` to run it again.")
                }
                _ if data.matches.is_empty() => println!("No results yet."),
                _ => {
                    ui::print_summary(&self.matching.summary_for(&data.matches));
                    ui::print_candidates(&data.matches);
                }
            },
        }
        println!("Type `help` for commands.");
    }

    async fn next(&mut self) {
        let data = self.flow.data();
        let has_description = JobDescriptionStep::can_continue(&data.job_description);
        let has_resumes = ResumeUploadStep::can_continue(&data.resumes);

        match self.flow.current_step() {
            Step::JobDescription if !has_description => {
                self.notifier.notify(Notification::destructive(
                    "Job description required",
                    "Upload, generate or type a job description first.",
                ));
            }
            Step::ResumeUpload if !has_resumes => {
                self.notifier.notify(Notification::destructive(
                    "No resumes",
                    "Upload at least one resume to continue.",
                ));
            }
            Step::JobDescription => {
                self.flow.next_step();
            }
            Step::ResumeUpload => {
                self.flow.next_step();
                self.matching = MatchingStep::new();
                self.analyze(false).await;
            }
            Step::Matching if self.flow.completed_steps().contains(&Step::Matching) => {
                println!("This analysis is already complete. Use `back` or `quit`.")
            }
            Step::Matching => println!("This is the last step. Use `complete` to finish."),
        }
    }

    fn back(&mut self) {
        if self.flow.prev_step() {
            self.matching = MatchingStep::new();
        } else {
            println!("Already on the first step.");
        }
    }

    async fn upload_job_description(&mut self, path: PathBuf) {
        let document = match Document::from_path(&path) {
            Ok(document) => document,
            Err(err) => {
                self.notifier.notify(Notification::destructive(
                    "Could not read file",
                    format!("{}: {err}", path.display()),
                ));
                return;
            }
        };

        let spinner = Spinner::start(&format!("Processing {}...", document.name));
        let flow = &mut self.flow;
        let replaced = self
            .job_step
            .upload(&self.api, &self.notifier, document, |text| {
                flow.update_data(WizardUpdate::job_description(text))
            })
            .await;
        spinner.finish();

        if replaced {
            ui::print_job_description(&self.flow.data().job_description);
        }
    }

    async fn generate_job_description(&mut self) {
        self.job_step.select_mode(AuthoringMode::Ai);
        println!("Describe the role. Press Enter to keep the value in brackets.");
        let mut form = self.job_step.form().clone();
        let labels = [
            "Job title*",
            "Company*",
            "Experience",
            "Must-have skills",
            "Industry",
            "Location",
        ];
        let fields = [
            &mut form.job_title,
            &mut form.company,
            &mut form.experience,
            &mut form.skills,
            &mut form.industry,
            &mut form.location,
        ];
        for (label, field) in labels.into_iter().zip(fields) {
            let Some(answer) = self.prompt(&format!("  {label} [{field}]: ")).await else {
                return;
            };
            if !answer.trim().is_empty() {
                *field = answer.trim().to_string();
            }
        }

        let current = form.job_type.map(|t| t.to_string()).unwrap_or_default();
        let prompt = format!("  Job type (full-time/part-time/contract/remote) [{current}]: ");
        let Some(answer) = self.prompt(&prompt).await else {
            return;
        };
        if !answer.trim().is_empty() {
            match answer.parse::<JobType>() {
                Ok(job_type) => form.job_type = Some(job_type),
                Err(msg) => println!("  {msg}; keeping [{current}]"),
            }
        }
        *self.job_step.form_mut() = form;

        if !self.job_step.can_generate() {
            self.notifier.notify(Notification::destructive(
                "Missing details",
                "Job title and company are required to generate a description.",
            ));
            return;
        }

        let spinner = Spinner::start("Generating job description...");
        let flow = &mut self.flow;
        let replaced = self
            .job_step
            .generate(&self.api, &self.notifier, |text| {
                flow.update_data(WizardUpdate::job_description(text))
            })
            .await;
        spinner.finish();

        if replaced {
            ui::print_job_description(&self.flow.data().job_description);
        }
    }

    async fn manual_job_description(&mut self) {
        self.job_step.select_mode(AuthoringMode::Manual);
        println!("Type the job description. Finish with a line containing only `.`");
        let text = self.read_block().await;
        let flow = &mut self.flow;
        self.job_step.write_manual(text, |text| {
            flow.update_data(WizardUpdate::job_description(text))
        });
    }

    fn add_resumes(&mut self, paths: Vec<PathBuf>) {
        let mut batch = Vec::new();
        for path in paths {
            match Document::from_path(&path) {
                Ok(document) => batch.push(document),
                Err(err) => self.notifier.notify(Notification::destructive(
                    "Could not read file",
                    format!("{}: {err}", path.display()),
                )),
            }
        }
        if batch.is_empty() {
            return;
        }

        let current = self.flow.data().resumes.clone();
        let flow = &mut self.flow;
        let summary = ResumeUploadStep::add_files(&current, batch, &self.notifier, |resumes| {
            flow.update_data(WizardUpdate::resumes(resumes))
        });
        if summary.dropped > 0 {
            println!("{} file(s) over the limit were not added.", summary.dropped);
        }
        if summary.added > 0 {
            self.discard_stale_matches();
        }
        ui::print_resumes(&self.flow.data().resumes);
    }

    /// Scores only hold for the resume list they were computed from.
    fn discard_stale_matches(&mut self) {
        if !self.flow.data().matches.is_empty() {
            self.flow.update_data(WizardUpdate::matches(Vec::new()));
            println!("Resumes changed; candidates will be scored again.");
        }
    }

    /// Runs the analysis for this mount. `force` re-scores existing matches.
    async fn analyze(&mut self, force: bool) {
        let data = self.flow.data().clone();
        let flow = &mut self.flow;
        let spinner = Spinner::start("Processing resumes and generating matches...");
        let on_update = |matches| flow.update_data(WizardUpdate::matches(matches));
        let outcome = if force {
            self.matching
                .reanalyze(
                    &self.api,
                    &self.notifier,
                    &data.job_description,
                    &data.resumes,
                    on_update,
                )
                .await
        } else {
            self.matching
                .run_analysis(
                    &self.api,
                    &self.notifier,
                    &data.job_description,
                    &data.resumes,
                    &data.matches,
                    on_update,
                )
                .await
        };
        spinner.finish();

        match outcome {
            AnalysisOutcome::Matched(_) => self.render(),
            AnalysisOutcome::Skipped if !force && !data.matches.is_empty() => {
                println!("Results are up to date. Use `reanalyze` to score again.");
            }
            AnalysisOutcome::Skipped => println!("Nothing to analyze."),
            AnalysisOutcome::Failed => println!("Use `retry` to try again."),
        }
    }

    fn draft_email(&mut self, n: usize, kind: EmailKind) {
        let Some(candidate) = self.flow.data().matches.get(n - 1).cloned() else {
            println!("There is no candidate number {n}.");
            return;
        };
        let draft = self.matching.draft_email(&candidate, kind);
        ui::print_email(draft);
        println!("Edit with `subject <text>` / `body`, then `copy`.");
    }

    async fn edit_body(&mut self) {
        if self.matching.draft().is_none() {
            println!("Start a draft with `accept <n>` or `reject <n>` first.");
            return;
        }
        println!("Type the new body. Finish with a line containing only `.`");
        let body = self.read_block().await;
        if let Some(draft) = self.matching.draft_mut() {
            draft.body = body;
            ui::print_email(draft);
        }
    }

    fn save_report(&self, path: PathBuf) {
        let data = self.flow.data();
        if data.matches.is_empty() {
            println!("No results to save yet.");
            return;
        }
        let report = MatchReport::new(
            &data.job_description,
            data.resumes.iter().map(|r| r.name.clone()).collect(),
            self.matching.summary_for(&data.matches),
            &data.matches,
        );
        match report.write_to(&path) {
            Ok(()) => self.notifier.notify(Notification::info(
                "Report saved",
                format!("Results written to {}.", path.display()),
            )),
            Err(err) => self
                .notifier
                .notify(Notification::destructive("Could not save report", err.to_string())),
        }
    }

    async fn complete(&mut self) {
        println!("Analysis complete. Thank you for using the recruiting assistant.");
        let (tx, rx) = watch::channel(false);
        let flow = &mut self.flow;
        let input = &mut self.input;

        let cancel_on_enter = async move {
            if input.recv().await.is_some() {
                let _ = tx.send(true);
            }
            std::future::pending::<()>().await
        };

        let outcome = tokio::select! {
            outcome = self.matching.complete_analysis(
                &self.countdown,
                rx,
                || flow.mark_step_complete(),
                ui::print_countdown,
            ) => outcome,
            _ = cancel_on_enter => CountdownOutcome::Cancelled,
        };

        match outcome {
            CountdownOutcome::Elapsed => {
                self.flow.reset();
                self.job_step = JobDescriptionStep::new();
                self.matching = MatchingStep::new();
                println!("Starting a new analysis.");
            }
            CountdownOutcome::Cancelled => println!("Staying on the results."),
        }
    }
}

#[cfg(test)]
impl<A, N, C> WizardSession<A, N, C> {
    fn flow(&self) -> &FlowController {
        &self.flow
    }

    fn api(&self) -> &A {
        &self.api
    }

    fn notifier(&self) -> &N {
        &self.notifier
    }

    fn clipboard(&self) -> &C {
        &self.clipboard
    }
}
