//! The transition controller: gates navigation and drives generation status.
//!
//! Every guarded operation either applies its full effect or returns
//! `StudioError::InvalidTransition` and leaves the state untouched. Callers
//! that want the silent behavior of a plain form simply ignore the error.
//!
//! Generation lifecycle driven from here:
//!
//!   Idle ──start_generation──▶ Running ──complete_generation──▶ Done
//!                                 │
//!                                 └──fail_generation──▶ Failed ──start_generation──▶ Running
//!
//! `Done` and `Failed` return to `Idle` only through `WizardState::reset`.

use tracing::{debug, info, warn};

use studio_contracts::{
    error::{StudioError, StudioResult},
    generation::GenerationRequest,
    record::SessionId,
    wizard::{GenerationStatus, StepId},
};

use crate::state::WizardState;

/// Stateless rule set applied to a `WizardState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionController;

impl TransitionController {
    pub fn new() -> Self {
        Self
    }

    /// Whether the current step's requirement holds.
    pub fn can_advance(&self, state: &WizardState) -> bool {
        state.table().is_step_satisfied(state.current(), state)
    }

    /// Move one step forward.
    ///
    /// Refused on the last step or when the current step is unsatisfied.
    pub fn advance(&self, state: &mut WizardState) -> StudioResult<StepId> {
        let current = state.current_step();
        if current >= state.table().last().id {
            return Err(refuse("advance", format!("step {} is the last step", current)));
        }
        if !self.can_advance(state) {
            return Err(refuse(
                "advance",
                format!("step {} ({}) is not satisfied", current, state.current().title),
            ));
        }

        let next = current.next();
        state.set_current_step(next);
        debug!(from = %current, to = %next, "advanced");
        Ok(next)
    }

    /// Move one step back.
    ///
    /// Refused on the first step or while a generation is running. Inputs
    /// and completion marks are kept.
    pub fn retreat(&self, state: &mut WizardState) -> StudioResult<StepId> {
        if state.generation().is_running() {
            return Err(refuse("retreat", "a generation is running"));
        }
        let current = state.current_step();
        let Some(prev) = current.prev() else {
            return Err(refuse("retreat", "already on the first step"));
        };

        state.set_current_step(prev);
        debug!(from = %current, to = %prev, "retreated");
        Ok(prev)
    }

    /// Begin a generation and return the request to hand to a backend.
    ///
    /// Requires both media slots. Refused while a generation is running or
    /// after one has finished (reset first). On success the settings step is
    /// marked completed, progress is zeroed, and the wizard moves onto the
    /// generation step.
    pub fn start_generation(
        &self,
        state: &mut WizardState,
        session_id: &SessionId,
    ) -> StudioResult<GenerationRequest> {
        match state.generation() {
            GenerationStatus::Running => {
                return Err(refuse("start_generation", "a generation is already running"));
            }
            GenerationStatus::Done => {
                return Err(refuse(
                    "start_generation",
                    "generation already finished; reset the wizard first",
                ));
            }
            GenerationStatus::Idle | GenerationStatus::Failed { .. } => {}
        }

        let inputs = state.inputs();
        let (image, audio) = match (&inputs.image, &inputs.audio) {
            (Some(image), Some(audio)) => (image.clone(), audio.clone()),
            (None, _) => return Err(refuse("start_generation", "no image selected")),
            (_, None) => return Err(refuse("start_generation", "no audio selected")),
        };

        let request = GenerationRequest {
            session_id: session_id.clone(),
            image,
            audio,
            style: inputs.style,
            enhance_with_ai: inputs.enhance_with_ai,
            use_premium: inputs.use_premium,
        };

        let settings = state.table().settings_step().id;
        let generation = state.table().generation_step().id;
        state.mark_completed(settings);
        state.set_generation(GenerationStatus::Running);
        state.set_progress(0);
        state.set_current_step(generation);

        info!(
            session_id = %session_id,
            style = %request.style,
            image = %request.image.name,
            audio = %request.audio.name,
            "generation started"
        );
        Ok(request)
    }

    /// Apply a progress report. Progress never moves backwards.
    pub fn record_progress(&self, state: &mut WizardState, percent: u8) -> StudioResult<u8> {
        if !state.generation().is_running() {
            return Err(refuse("record_progress", "no generation is running"));
        }
        let next = state.progress_percent().max(percent.min(100));
        state.set_progress(next);
        debug!(percent = next, "generation progress");
        Ok(next)
    }

    /// Finish the running generation: status `Done`, progress 100, wizard on
    /// the last step with every step before it completed.
    pub fn complete_generation(&self, state: &mut WizardState) -> StudioResult<()> {
        if !state.generation().is_running() {
            return Err(refuse("complete_generation", "no generation is running"));
        }

        state.set_generation(GenerationStatus::Done);
        state.set_progress(100);

        let last = state.table().last().id;
        let earlier: Vec<StepId> = state
            .table()
            .iter()
            .map(|s| s.id)
            .filter(|id| *id < last)
            .collect();
        for id in earlier {
            state.mark_completed(id);
        }
        state.set_current_step(last);

        info!(step = %last, "generation complete");
        Ok(())
    }

    /// Fail the running generation. The wizard stays on the generation step.
    pub fn fail_generation(
        &self,
        state: &mut WizardState,
        reason: impl Into<String>,
    ) -> StudioResult<()> {
        if !state.generation().is_running() {
            return Err(refuse("fail_generation", "no generation is running"));
        }
        let reason = reason.into();
        warn!(reason = %reason, progress = state.progress_percent(), "generation failed");
        state.set_generation(GenerationStatus::Failed { reason });
        Ok(())
    }

    /// Width of the step-tracker bar, 0.0–100.0.
    ///
    /// Before the generation step it follows the current position; from the
    /// generation step on it follows the number of completed steps.
    pub fn track_percent(&self, state: &WizardState) -> f64 {
        let spans = state.table().step_count().saturating_sub(1);
        if spans == 0 {
            return 100.0;
        }
        let filled = if state.current_step() >= state.table().generation_step().id {
            state.completed_steps().len()
        } else {
            usize::from(state.current_step().0).saturating_sub(1)
        };
        (filled as f64 / spans as f64 * 100.0).min(100.0)
    }
}

fn refuse(operation: &str, reason: impl Into<String>) -> StudioError {
    let err = StudioError::invalid_transition(operation, reason);
    warn!(error = %err, "transition refused");
    err
}
