//! # studio-contracts
//!
//! Shared types, records, and errors for the Avatar Studio wizard runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod generation;
pub mod media;
pub mod record;
pub mod wizard;
