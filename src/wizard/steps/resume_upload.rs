//! Step 2: collect up to [`MAX_RESUMES`] resumes.
//!
//! Only the MIME type and the count are checked; the content is never read.

use crate::wizard::Document;
use crate::wizard::notify::{Notification, Notifier};

/// Hard cap on stored resumes.
pub const MAX_RESUMES: usize = 10;

/// What happened to one batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub added: usize,
    /// Names of files rejected for their type.
    pub rejected: Vec<String>,
    /// Valid files that did not fit under the cap.
    pub dropped: usize,
    pub limit_reached: bool,
}

pub struct ResumeUploadStep;

impl ResumeUploadStep {
    /// Appends the accepted part of `batch` to `current`.
    ///
    /// `on_update` receives the new list only when at least one file was
    /// added. Files past the cap are dropped without being named.
    pub fn add_files<N: Notifier>(
        current: &[Document],
        batch: Vec<Document>,
        notifier: &N,
        on_update: impl FnOnce(Vec<Document>),
    ) -> UploadSummary {
        let mut summary = UploadSummary::default();
        let mut accepted = Vec::new();

        for file in batch {
            if !file.is_accepted() {
                summary.rejected.push(file.name);
            } else if current.len() + accepted.len() < MAX_RESUMES {
                accepted.push(file);
            } else {
                summary.dropped += 1;
            }
        }

        summary.added = accepted.len();
        summary.limit_reached = current.len() + accepted.len() >= MAX_RESUMES;

        if !accepted.is_empty() {
            let mut updated = current.to_vec();
            updated.extend(accepted);
            on_update(updated);
            notifier.notify(Notification::info(
                "Files uploaded successfully",
                format!("{} resume(s) uploaded.", summary.added),
            ));
        }

        if !summary.rejected.is_empty() {
            notifier.notify(Notification::destructive(
                "Some files were skipped",
                format!("Invalid file types: {}", summary.rejected.join(", ")),
            ));
        }

        if summary.limit_reached {
            notifier.notify(Notification::destructive(
                "Upload limit reached",
                format!("Maximum {MAX_RESUMES} resumes allowed."),
            ));
        }

        tracing::debug!(
            added = summary.added,
            rejected = summary.rejected.len(),
            dropped = summary.dropped,
            "resume batch processed"
        );
        summary
    }

    /// Removes the resume at `index`. Returns `false` for an out-of-range index.
    pub fn remove_file<N: Notifier>(
        current: &[Document],
        index: usize,
        notifier: &N,
        on_update: impl FnOnce(Vec<Document>),
    ) -> bool {
        if index >= current.len() {
            return false;
        }
        let updated = current
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, d)| d.clone())
            .collect();
        on_update(updated);
        notifier.notify(Notification::info(
            "File removed",
            "Resume has been removed from the list.",
        ));
        true
    }

    pub fn can_continue(resumes: &[Document]) -> bool {
        !resumes.is_empty()
    }
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`.
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
