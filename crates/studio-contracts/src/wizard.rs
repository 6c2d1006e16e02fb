//! Wizard step identifiers, input slots, and generation status.
//!
//! These are the values flowing between the presentation layer and the
//! transition controller. The controller owns the rules; this module only
//! names things.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::StudioError,
    media::MediaHandle,
};

/// 1-based position of a step in the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepId(pub u8);

impl StepId {
    pub const FIRST: StepId = StepId(1);

    pub fn next(self) -> StepId {
        StepId(self.0 + 1)
    }

    /// The previous step, or `None` at step 1.
    pub fn prev(self) -> Option<StepId> {
        if self.0 <= 1 {
            None
        } else {
            Some(StepId(self.0 - 1))
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The look applied to the generated avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarStyle {
    #[default]
    Professional,
    Casual,
    Animated,
    Realistic,
}

impl AvatarStyle {
    pub const ALL: [AvatarStyle; 4] = [
        AvatarStyle::Professional,
        AvatarStyle::Casual,
        AvatarStyle::Animated,
        AvatarStyle::Realistic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AvatarStyle::Professional => "professional",
            AvatarStyle::Casual => "casual",
            AvatarStyle::Animated => "animated",
            AvatarStyle::Realistic => "realistic",
        }
    }
}

impl fmt::Display for AvatarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarStyle {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AvatarStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StudioError::ConfigError {
                reason: format!(
                    "unknown avatar style '{}' (expected professional, casual, animated or realistic)",
                    s
                ),
            })
    }
}

/// Named input slots collected across the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSlot {
    Image,
    Audio,
    Style,
    EnhanceWithAi,
    UsePremium,
}

/// A value destined for one input slot.
///
/// `Image(None)` / `Audio(None)` clear the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputValue {
    Image(Option<MediaHandle>),
    Audio(Option<MediaHandle>),
    Style(AvatarStyle),
    EnhanceWithAi(bool),
    UsePremium(bool),
}

impl InputValue {
    pub fn slot(&self) -> InputSlot {
        match self {
            InputValue::Image(_) => InputSlot::Image,
            InputValue::Audio(_) => InputSlot::Audio,
            InputValue::Style(_) => InputSlot::Style,
            InputValue::EnhanceWithAi(_) => InputSlot::EnhanceWithAi,
            InputValue::UsePremium(_) => InputSlot::UsePremium,
        }
    }

    /// True when this value empties a media slot.
    pub fn is_empty(&self) -> bool {
        matches!(self, InputValue::Image(None) | InputValue::Audio(None))
    }
}

/// Lifecycle of the (simulated) generation job.
///
/// `Idle → Running → Done`, with `Failed` as the exit for backends that can
/// fail or for a cancelled task. `Done` and `Failed` return to `Idle` only
/// through a wizard reset; `Failed` may also be retried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Running,
    Done,
    Failed { reason: String },
}

impl GenerationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GenerationStatus::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::Running => "running",
            GenerationStatus::Done => "done",
            GenerationStatus::Failed { .. } => "failed",
        }
    }
}
