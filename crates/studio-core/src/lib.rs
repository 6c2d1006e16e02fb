//! # studio-core
//!
//! Step table, wizard state, and transition controller for the Avatar Studio
//! runtime, plus the traits that connect the wizard to a generation backend
//! and a result history.
//!
//! The wizard is a plain value: every operation takes `&mut WizardState`, so
//! it can be exercised without any rendering layer or async runtime.

pub mod controller;
pub mod state;
pub mod steps;
pub mod traits;

pub use controller::TransitionController;
pub use state::{WizardInputs, WizardState};
pub use steps::{Step, StepRequirement, StepTable};
