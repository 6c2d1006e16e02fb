//! # studio-history
//!
//! Append-only, newest-first result history for the Avatar Studio runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use studio_history::InMemoryHistory;
//! use studio_core::traits::HistoryStore;
//!
//! let history = InMemoryHistory::new();
//! history.prepend(record)?;
//! assert_eq!(history.latest().unwrap().id, record_id);
//! ```

pub mod export;
pub mod memory;

pub use export::HistoryExport;
pub use memory::InMemoryHistory;

// ── Tests ─────────────────────────────────────────────────────────────────────
