//! # studio-generate
//!
//! A TOML-configured, timer-driven simulated generation backend.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use studio_generate::{GeneratorConfig, SimulatedGenerator};
//!
//! let config = GeneratorConfig::from_toml_str(include_str!("generator.toml"))?;
//! let backend = SimulatedGenerator::new(config);
//! // Hand `backend` to an avatar session.
//! ```

pub mod config;
pub mod simulated;

pub use config::{GeneratorConfig, OutputTemplate, SimulationConfig, TimingConfig};
pub use simulated::SimulatedGenerator;

// ── Tests ─────────────────────────────────────────────────────────────────────
