//! The fixed, ordered step table for the avatar generator.
//!
//! Pure data plus pure predicates. A step's requirement decides whether the
//! wizard may move past it; the table also records which step owns each
//! input slot so the state can invalidate completion marks.

use studio_contracts::wizard::{GenerationStatus, InputSlot, StepId};

use crate::state::WizardState;

/// What must hold before the wizard can advance past a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRequirement {
    /// Pure-settings or terminal step; always satisfied.
    Nothing,
    /// The named media slot must be filled.
    Input(InputSlot),
    /// A generation must have finished successfully.
    GenerationDone,
}

/// Static descriptor of one wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    pub requirement: StepRequirement,
    /// Input slots edited on this step.
    pub slots: &'static [InputSlot],
}

static AVATAR_STEPS: [Step; 5] = [
    Step {
        id: StepId(1),
        title: "Upload Photo",
        description: "Upload your profile image",
        requirement: StepRequirement::Input(InputSlot::Image),
        slots: &[InputSlot::Image],
    },
    Step {
        id: StepId(2),
        title: "Add Voice",
        description: "Upload your voice recording",
        requirement: StepRequirement::Input(InputSlot::Audio),
        slots: &[InputSlot::Audio],
    },
    Step {
        id: StepId(3),
        title: "Customize",
        description: "Choose style and settings",
        requirement: StepRequirement::Nothing,
        slots: &[InputSlot::Style, InputSlot::EnhanceWithAi, InputSlot::UsePremium],
    },
    Step {
        id: StepId(4),
        title: "Generate",
        description: "Create your avatar video",
        requirement: StepRequirement::GenerationDone,
        slots: &[],
    },
    Step {
        id: StepId(5),
        title: "Download",
        description: "Get your final video",
        requirement: StepRequirement::Nothing,
        slots: &[],
    },
];

/// Ordered, immutable list of steps. Ids run `1..=step_count()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTable {
    steps: &'static [Step],
}

impl StepTable {
    /// The five-step avatar generator flow.
    pub fn avatar() -> Self {
        Self { steps: &AVATAR_STEPS }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// 1-based lookup; `None` outside `1..=step_count()`.
    pub fn step_at(&self, index: usize) -> Option<&'static Step> {
        let steps: &'static [Step] = self.steps;
        index.checked_sub(1).and_then(|i| steps.get(i))
    }

    pub fn step(&self, id: StepId) -> Option<&'static Step> {
        self.step_at(id.0 as usize)
    }

    pub fn first(&self) -> &'static Step {
        let steps: &'static [Step] = self.steps;
        &steps[0]
    }

    pub fn last(&self) -> &'static Step {
        let steps: &'static [Step] = self.steps;
        &steps[steps.len() - 1]
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.step(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Step> {
        let steps: &'static [Step] = self.steps;
        steps.iter()
    }

    /// The step whose requirement is a finished generation.
    pub fn generation_step(&self) -> &'static Step {
        self.iter()
            .find(|s| s.requirement == StepRequirement::GenerationDone)
            .unwrap_or_else(|| self.last())
    }

    /// The step immediately before generation (style and flags).
    pub fn settings_step(&self) -> &'static Step {
        self.generation_step()
            .id
            .prev()
            .and_then(|id| self.step(id))
            .unwrap_or_else(|| self.first())
    }

    /// The step that edits `slot`.
    pub fn owner_of(&self, slot: InputSlot) -> Option<&'static Step> {
        self.iter().find(|s| s.slots.contains(&slot))
    }

    /// Whether the input `step` requires is present in `state`.
    pub fn is_step_satisfied(&self, step: &Step, state: &WizardState) -> bool {
        match step.requirement {
            StepRequirement::Nothing => true,
            StepRequirement::Input(slot) => state.inputs().is_filled(slot),
            StepRequirement::GenerationDone => *state.generation() == GenerationStatus::Done,
        }
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::avatar()
    }
}
