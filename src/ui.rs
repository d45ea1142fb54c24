//! Terminal rendering: spinners, coloured notifications, tables.
//!
//! Uses `indicatif` for spinners and `console` for styling. Everything here
//! only reads wizard state; nothing in this module changes it.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::wizard::notify::{Notification, Notifier, Severity};
use crate::wizard::steps::{EmailDraft, MatchSummary, format_file_size};
use crate::wizard::{Candidate, Document, StepProgress, StepStatus};

/// Spinner shown while a request is in flight.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

/// Prints notifications as coloured one-liners: green for info, red for
/// failures.
pub struct TerminalNotifier {
    green: Style,
    red: Style,
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => println!(
                "  {} {}: {}",
                self.green.apply_to("✓"),
                self.green.apply_to(&notification.title),
                notification.description
            ),
            Severity::Destructive => println!(
                "  {} {}: {}",
                self.red.apply_to("✗"),
                self.red.apply_to(&notification.title),
                notification.description
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Weak,
        }
    }

    fn style(self) -> Style {
        match self {
            ScoreBand::Strong => Style::new().green().bold(),
            ScoreBand::Fair => Style::new().yellow().bold(),
            ScoreBand::Weak => Style::new().red().bold(),
        }
    }
}

/// First three skills, then `+N more`.
pub fn skills_label(skills: &[String]) -> String {
    if skills.is_empty() {
        return "-".to_string();
    }
    let mut label = skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if skills.len() > 3 {
        label.push_str(&format!(" +{} more", skills.len() - 3));
    }
    label
}

pub fn print_progress(progress: &[StepProgress]) {
    let active = Style::new().cyan().bold();
    let done = Style::new().green();
    let dim = Style::new().dim();

    let parts: Vec<String> = progress
        .iter()
        .map(|p| {
            let label = format!("{} {}", p.step.number(), p.step.title());
            match p.status {
                StepStatus::Active => format!("{}", active.apply_to(format!("● {label}"))),
                StepStatus::Completed => format!("{}", done.apply_to(format!("✓ {label}"))),
                StepStatus::Inactive => format!("{}", dim.apply_to(format!("○ {label}"))),
            }
        })
        .collect();
    println!();
    println!("{}", parts.join("  ──  "));
    if let Some(p) = progress.iter().find(|p| p.status == StepStatus::Active) {
        println!("{}", dim.apply_to(p.step.subtitle()));
    }
}

pub fn print_job_description(text: &str) {
    let dim = Style::new().dim();
    if text.trim().is_empty() {
        println!("{}", dim.apply_to("(no job description yet)"));
        return;
    }
    println!("{}", dim.apply_to("─── Job Description ───"));
    println!("{text}");
    println!("{}", dim.apply_to("───────────────────────"));
}

pub fn print_resumes(resumes: &[Document]) {
    if resumes.is_empty() {
        println!("{}", Style::new().dim().apply_to("(no resumes uploaded)"));
        return;
    }
    println!("Uploaded resumes ({}/{}):", resumes.len(), crate::wizard::steps::MAX_RESUMES);
    for (i, doc) in resumes.iter().enumerate() {
        println!("  {:>2}. {}  ({})", i + 1, doc.name, format_file_size(doc.size()));
    }
}

pub fn print_summary(summary: &MatchSummary) {
    let bold = Style::new().bold();
    println!();
    println!(
        "  Candidates analyzed: {}   Average match: {}%   Top match: {}%",
        bold.apply_to(summary.candidates_analyzed),
        bold.apply_to(summary.average_match_score),
        bold.apply_to(summary.top_match_score)
    );
    if let Some(best) = &summary.best_candidate {
        println!("  Best candidate: {}", bold.apply_to(best));
    }
    if let Some(reason) = &summary.best_candidate_reason {
        println!("  {}", Style::new().dim().apply_to(reason));
    }
}

pub fn print_candidates(candidates: &[Candidate]) {
    let star = Style::new().yellow().bold();
    println!();
    println!(
        "  {:>2}  {:<4} {:<24} {:<28} {:>5}  Missing skills",
        "#", "", "Candidate", "Resume", "Score"
    );
    for (i, c) in candidates.iter().enumerate() {
        let marker = if c.is_top_candidate {
            format!("{}", star.apply_to("★"))
        } else {
            " ".to_string()
        };
        let score = ScoreBand::of(c.match_score)
            .style()
            .apply_to(format!("{:>5}", c.match_score));
        println!(
            "  {:>2}  {:<4} {:<24} {:<28} {}  {}",
            i + 1,
            marker,
            truncate(&c.name, 24),
            truncate(&c.filename, 28),
            score,
            skills_label(&c.missing_skills)
        );
        if !c.remarks.is_empty() {
            println!("        {}", Style::new().dim().apply_to(&c.remarks));
        }
        for pro in &c.pros {
            println!("        {} {pro}", Style::new().green().apply_to("+"));
        }
        for con in &c.cons {
            println!("        {} {con}", Style::new().red().apply_to("-"));
        }
    }
}

pub fn print_email(draft: &EmailDraft) {
    let bold = Style::new().bold();
    println!();
    println!(
        "{}",
        bold.apply_to(format!("─── Email Draft - {} {} ───", draft.kind, draft.candidate_name))
    );
    println!("Subject: {}", draft.subject);
    println!();
    println!("{}", draft.body);
}

pub fn print_countdown(remaining: u32) {
    println!(
        "  {} Returning to the start in {remaining}s (press Enter to stay)",
        Style::new().yellow().apply_to("↻")
    );
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
