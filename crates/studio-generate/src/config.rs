//! Generator configuration schema.
//!
//! A `GeneratorConfig` is deserialized from TOML. Every section and field is
//! optional; omitted values fall back to the timings and output template of
//! the stock avatar screen.
//!
//! Example:
//! ```toml
//! [timing]
//! tick_interval_ms = 200
//! max_step_percent = 15
//! completion_delay_ms = 500
//!
//! [output]
//! title_prefix = "Avatar Video"
//!
//! [simulation]
//! seed = 42
//! ```

use std::{path::Path, time::Duration};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use studio_contracts::{
    error::{StudioError, StudioResult},
    generation::GenerationOutput,
};

/// How fast the simulated job moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between progress updates.
    pub tick_interval_ms: u64,
    /// Upper bound of one random progress increment (lower bound is 1).
    pub max_step_percent: u8,
    /// Delay between reaching 100 % and the completion event.
    pub completion_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            max_step_percent: 15,
            completion_delay_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

/// Fixed values stamped onto every generated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputTemplate {
    /// The title is `"<title_prefix> <HH:MM:SS>"`.
    pub title_prefix: String,
    pub thumbnail_ref: String,
    pub duration: String,
    pub size_label: String,
    pub video_ref: String,
}

impl Default for OutputTemplate {
    fn default() -> Self {
        Self {
            title_prefix: "Avatar Video".to_string(),
            thumbnail_ref: "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=400".to_string(),
            duration: "2:15".to_string(),
            size_label: "41 MB".to_string(),
            video_ref: "generated-avatar-video.mp4".to_string(),
        }
    }
}

impl OutputTemplate {
    /// Fill the template for a job finishing at `at`.
    pub fn render<Tz>(&self, at: DateTime<Tz>) -> GenerationOutput
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        GenerationOutput {
            title: format!("{} {}", self.title_prefix, at.format("%H:%M:%S")),
            thumbnail_ref: self.thumbnail_ref.clone(),
            duration: self.duration.clone(),
            size_label: self.size_label.clone(),
            video_ref: self.video_ref.clone(),
        }
    }
}

/// Knobs for reproducible runs and failure injection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the progress step generator. Random when absent.
    pub seed: Option<u64>,
    /// Fail the job once progress reaches this value. Never fails when absent.
    pub fail_at_percent: Option<u8>,
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub timing: TimingConfig,
    pub output: OutputTemplate,
    pub simulation: SimulationConfig,
}

impl GeneratorConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `StudioError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or holds out-of-range values.
    pub fn from_toml_str(s: &str) -> StudioResult<Self> {
        let config: GeneratorConfig = toml::from_str(s).map_err(|e| StudioError::ConfigError {
            reason: format!("failed to parse generator TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as generator configuration.
    pub fn from_file(path: &Path) -> StudioResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| StudioError::ConfigError {
            reason: format!("failed to read generator config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> StudioResult<()> {
        if self.timing.tick_interval_ms == 0 {
            return Err(config_error("timing.tick_interval_ms must be greater than 0"));
        }
        if !(1..=100).contains(&self.timing.max_step_percent) {
            return Err(config_error("timing.max_step_percent must be within 1..=100"));
        }
        if let Some(fail_at) = self.simulation.fail_at_percent {
            if !(1..=100).contains(&fail_at) {
                return Err(config_error("simulation.fail_at_percent must be within 1..=100"));
            }
        }
        Ok(())
    }
}

fn config_error(reason: &str) -> StudioError {
    StudioError::ConfigError {
        reason: reason.to_string(),
    }
}
