//! Avatar generator demo scenarios.
//!
//! Each scenario is a self-contained module that builds a real session
//! (controller, simulated backend, in-memory history) around mock media and
//! walks it through a distinct path of the wizard.

use studio_contracts::error::StudioResult;
use studio_core::{traits::HistoryStore, WizardState};
use studio_history::InMemoryHistory;

use crate::session::GenerationOutcome;

pub mod failure;
pub mod full_flow;
pub mod guards;

fn print_step(state: &WizardState) {
    let step = state.current();
    println!(
        "  [{}/{}] {} — {}",
        step.id,
        state.table().step_count(),
        step.title,
        step.description
    );
}

fn print_refusal<T: std::fmt::Debug>(result: StudioResult<T>) {
    match result {
        Ok(value) => println!("    unexpectedly allowed: {:?}", value),
        Err(e) => println!("    refused: {}", e),
    }
}

fn print_outcome(outcome: &GenerationOutcome) {
    match outcome {
        GenerationOutcome::Completed(record) => {
            println!("  Result: {} [{}]", record.title, record.id);
            println!("    duration {}  size {}", record.duration, record.size_label);
            if let Some(video) = &record.video_ref {
                println!("    download → {}", video);
            }
        }
        GenerationOutcome::Failed(reason) => println!("  Result: FAILED ({})", reason),
    }
}

fn print_gallery(history: &InMemoryHistory) {
    println!("  Gallery ({} videos, newest first):", history.len());
    for record in history.records() {
        println!(
            "    {:<14} {:<28} {:>5}  {:>6}  {}",
            record.id, record.title, record.duration, record.size_label, record.created_date
        );
    }
    println!();
}
