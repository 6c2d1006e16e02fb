//! The single source of truth for wizard progress and collected inputs.
//!
//! Navigation and generation fields are only mutated by the
//! `TransitionController`; callers edit inputs through `set_input`, which
//! keeps completion marks consistent with the slots they depend on.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use studio_contracts::{
    error::{StudioError, StudioResult},
    media::MediaHandle,
    wizard::{AvatarStyle, GenerationStatus, InputSlot, InputValue, StepId},
};

use crate::steps::{Step, StepTable};

/// Everything the user has entered so far.
///
/// Defaults match a fresh form: no media, professional style, AI enhancement
/// on, premium off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardInputs {
    pub image: Option<MediaHandle>,
    pub audio: Option<MediaHandle>,
    pub style: AvatarStyle,
    pub enhance_with_ai: bool,
    pub use_premium: bool,
}

impl Default for WizardInputs {
    fn default() -> Self {
        Self {
            image: None,
            audio: None,
            style: AvatarStyle::default(),
            enhance_with_ai: true,
            use_premium: false,
        }
    }
}

impl WizardInputs {
    /// Whether `slot` holds a value. Style and flag slots always do.
    pub fn is_filled(&self, slot: InputSlot) -> bool {
        match slot {
            InputSlot::Image => self.image.is_some(),
            InputSlot::Audio => self.audio.is_some(),
            InputSlot::Style | InputSlot::EnhanceWithAi | InputSlot::UsePremium => true,
        }
    }

    /// Both media slots are present.
    pub fn has_media(&self) -> bool {
        self.image.is_some() && self.audio.is_some()
    }
}

/// Wizard progress for one session.
#[derive(Debug, Clone)]
pub struct WizardState {
    table: StepTable,
    current_step: StepId,
    completed_steps: BTreeSet<StepId>,
    inputs: WizardInputs,
    generation: GenerationStatus,
    progress_percent: u8,
}

impl WizardState {
    /// A fresh state positioned on the table's first step.
    pub fn new(table: StepTable) -> Self {
        Self {
            current_step: table.first().id,
            table,
            completed_steps: BTreeSet::new(),
            inputs: WizardInputs::default(),
            generation: GenerationStatus::Idle,
            progress_percent: 0,
        }
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Descriptor of the current step.
    pub fn current(&self) -> &'static Step {
        self.table
            .step(self.current_step)
            .unwrap_or_else(|| self.table.first())
    }

    pub fn completed_steps(&self) -> &BTreeSet<StepId> {
        &self.completed_steps
    }

    pub fn is_completed(&self, step: StepId) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn inputs(&self) -> &WizardInputs {
        &self.inputs
    }

    pub fn generation(&self) -> &GenerationStatus {
        &self.generation
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// Store `value` in its slot.
    ///
    /// Filling a media slot marks the owning step completed; clearing it
    /// removes that mark. A handle of the wrong media kind is rejected and
    /// the state is left untouched.
    pub fn set_input(&mut self, value: InputValue) -> StudioResult<()> {
        let slot = value.slot();
        let cleared = value.is_empty();

        match value {
            InputValue::Image(handle) => {
                if let Some(h) = &handle {
                    if !h.kind.is_image() {
                        return Err(StudioError::UnsupportedMedia {
                            name: h.name.clone(),
                            expected: "image/png or image/jpeg".to_string(),
                        });
                    }
                }
                self.inputs.image = handle;
            }
            InputValue::Audio(handle) => {
                if let Some(h) = &handle {
                    if !h.kind.is_audio() {
                        return Err(StudioError::UnsupportedMedia {
                            name: h.name.clone(),
                            expected: "audio/mpeg or audio/wav".to_string(),
                        });
                    }
                }
                self.inputs.audio = handle;
            }
            InputValue::Style(style) => self.inputs.style = style,
            InputValue::EnhanceWithAi(on) => self.inputs.enhance_with_ai = on,
            InputValue::UsePremium(on) => self.inputs.use_premium = on,
        }

        let Some(owner) = self.table.owner_of(slot) else {
            return Ok(());
        };

        if cleared {
            if self.completed_steps.remove(&owner.id) {
                debug!(step = %owner.id, slot = ?slot, "input cleared, step no longer completed");
            }
        } else if matches!(slot, InputSlot::Image | InputSlot::Audio) {
            self.mark_completed(owner.id);
        }

        Ok(())
    }

    /// Record `step` as completed if its requirement currently holds.
    ///
    /// Idempotent. Returns whether the step is completed afterwards.
    pub fn mark_completed(&mut self, step: StepId) -> bool {
        let Some(descriptor) = self.table.step(step) else {
            return false;
        };
        if !self.table.is_step_satisfied(descriptor, self) {
            debug!(step = %step, "step requirement unmet, not marking completed");
            return self.completed_steps.contains(&step);
        }
        if self.completed_steps.insert(step) {
            debug!(step = %step, "step completed");
        }
        true
    }

    /// Return to initial values. Result history lives elsewhere and is not touched.
    pub fn reset(&mut self) {
        *self = Self::new(self.table);
    }

    pub(crate) fn set_current_step(&mut self, step: StepId) {
        debug_assert!(self.table.contains(step));
        self.current_step = step;
    }

    pub(crate) fn set_generation(&mut self, status: GenerationStatus) {
        self.generation = status;
    }

    pub(crate) fn set_progress(&mut self, percent: u8) {
        self.progress_percent = percent.min(100);
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(StepTable::avatar())
    }
}
