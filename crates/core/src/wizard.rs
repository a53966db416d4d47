//! Create-profile wizard state machine.
//!
//! Explicit immutable state threaded through the controller: transitions
//! return a new [`WizardState`] instead of mutating in place. `advance`
//! only moves forward when the current step's slice validates; `retreat`
//! never discards entered data.

use validator::ValidationErrors;

use crate::error::CoreError;
use crate::profile::{ProfileForm, StepData, MAX_STEP, MIN_STEP};

/// One wizard session's state: current step, accumulated form, and whether
/// the terminal submission already happened.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: u8,
    form: ProfileForm,
    submitted: bool,
}

impl WizardState {
    /// A fresh wizard at step 0 with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a wizard with previously accumulated data.
    pub fn resume(step: u8, form: ProfileForm) -> Result<Self, CoreError> {
        if step > MAX_STEP {
            return Err(CoreError::Validation(format!(
                "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
            )));
        }
        Ok(Self {
            step,
            form,
            submitted: false,
        })
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Whether the wizard sits on the final step.
    pub fn on_final_step(&self) -> bool {
        self.step == MAX_STEP
    }

    /// Validate `data` for the current step; on success merge it into the
    /// form and move one step forward (clamped at the final step).
    ///
    /// The slice must belong to the current step; submitting another
    /// step's payload is a programming error surfaced as a field error.
    pub fn advance(self, data: StepData) -> Result<Self, ValidationErrors> {
        debug_assert_eq!(data.step().to_number(), self.step, "slice/step mismatch");
        data.validate()?;

        let form = self.form.merge(data);
        let step = (self.step + 1).min(MAX_STEP);
        Ok(Self {
            step,
            form,
            submitted: self.submitted,
        })
    }

    /// Move one step back (clamped at step 0). Entered data is kept.
    pub fn retreat(self) -> Self {
        Self {
            step: self.step.saturating_sub(1),
            ..self
        }
    }

    /// Enter the terminal state after a successful submission.
    pub fn mark_submitted(self) -> Self {
        Self {
            submitted: true,
            ..self
        }
    }
}
