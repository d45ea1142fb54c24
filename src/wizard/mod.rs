mod countdown;
mod data;
mod document;
mod flow;
pub mod notify;
mod step;
pub mod steps;

pub use countdown::{Countdown, CountdownOutcome};
pub use data::{Candidate, WizardState, WizardUpdate};
pub use document::{ACCEPTED_MIME_TYPES, Document};
pub use flow::FlowController;
pub use step::{Step, StepProgress, StepStatus};
