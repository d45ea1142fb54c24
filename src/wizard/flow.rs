use std::collections::BTreeSet;

use super::data::{WizardState, WizardUpdate};
use super::step::{Step, StepProgress, StepStatus};

/// Owns the state shared across wizard steps and drives navigation.
///
/// Steps never touch this directly: they get a slice of [`WizardState`] and
/// hand back replacements, which the caller applies with
/// [`update_data`](FlowController::update_data).
#[derive(Debug, Clone)]
pub struct FlowController {
    current_step: Step,
    completed_steps: BTreeSet<Step>,
    data: WizardState,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowController {
    pub fn new() -> Self {
        Self {
            current_step: Step::JobDescription,
            completed_steps: BTreeSet::new(),
            data: WizardState::default(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<Step> {
        &self.completed_steps
    }

    pub fn data(&self) -> &WizardState {
        &self.data
    }

    /// Advances one step. Returns `false` (and does nothing) on the last step.
    pub fn next_step(&mut self) -> bool {
        match self.current_step.next() {
            Some(next) => {
                tracing::debug!(from = %self.current_step, to = %next, "wizard step forward");
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Goes back one step. Returns `false` (and does nothing) on the first step.
    pub fn prev_step(&mut self) -> bool {
        match self.current_step.prev() {
            Some(prev) => {
                tracing::debug!(from = %self.current_step, to = %prev, "wizard step back");
                self.current_step = prev;
                true
            }
            None => false,
        }
    }

    pub fn update_data(&mut self, update: WizardUpdate) {
        self.data = self.data.merged(update);
    }

    pub fn mark_step_complete(&mut self) {
        tracing::debug!(step = %self.current_step, "step completed");
        self.completed_steps.insert(self.current_step);
    }

    /// Back to step 1 with empty state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Progress indicator: the current step is active, steps before it or
    /// explicitly completed are done, the rest are pending.
    pub fn progress(&self) -> Vec<StepProgress> {
        Step::ALL
            .into_iter()
            .map(|step| {
                let status = if step == self.current_step {
                    StepStatus::Active
                } else if self.completed_steps.contains(&step) || step < self.current_step {
                    StepStatus::Completed
                } else {
                    StepStatus::Inactive
                };
                StepProgress { step, status }
            })
            .collect()
    }
}
