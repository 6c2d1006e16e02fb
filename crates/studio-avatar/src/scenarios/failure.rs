//! Scenario 3: Failed and Cancelled Generations
//!
//! Exercises the failure exit of the generation lifecycle:
//!   1. A backend configured to fail part-way → `Failed`, no gallery entry
//!   2. Retry after failure is allowed and can itself be cancelled
//!   3. Cancelling leaves the gallery untouched

use studio_contracts::{error::StudioResult, wizard::InputValue};
use studio_core::traits::HistoryStore;
use studio_generate::{GeneratorConfig, SimulatedGenerator};
use studio_history::InMemoryHistory;

use crate::{
    mock_data::{sample_audio, sample_image, seed_gallery},
    scenarios::print_outcome,
    session::AvatarSession,
};

/// Progress at which the failing backend gives up.
const FAIL_AT_PERCENT: u8 = 60;

/// Run Scenario 3 and return the (unchanged) gallery.
pub async fn run_scenario(config: &GeneratorConfig) -> StudioResult<InMemoryHistory> {
    println!("=== Scenario 3: Failed and Cancelled Generations ===");
    println!();

    let mut failing = config.clone();
    failing.simulation.fail_at_percent = Some(FAIL_AT_PERCENT);

    let history = InMemoryHistory::with_records(seed_gallery());
    let mut session = AvatarSession::new(
        Box::new(SimulatedGenerator::new(failing)),
        Box::new(history.clone()),
    );

    session.set_input(InputValue::Image(Some(sample_image()?)))?;
    session.set_input(InputValue::Audio(Some(sample_audio()?)))?;

    println!("  Run 1: backend fails at {}%", FAIL_AT_PERCENT);
    session.start_generation()?;
    let outcome = session.wait_for_outcome().await?;
    print_outcome(&outcome);
    println!(
        "    status: {}, step: {}, gallery: {} videos",
        session.state().generation().label(),
        session.state().current_step(),
        history.len()
    );
    println!();

    println!("  Run 2: retry, then cancel after the first progress update");
    session.start_generation()?;
    let finished = loop {
        if let Some(outcome) = session.pump()? {
            break Some(outcome);
        }
        if session.state().progress_percent() > 0 {
            break None;
        }
        tokio::time::sleep(config.timing.tick_interval()).await;
    };
    match finished {
        Some(outcome) => {
            println!("    retry ended before it could be cancelled");
            print_outcome(&outcome);
        }
        None => session.cancel_generation()?,
    }
    println!(
        "    status: {} ({}%), gallery: {} videos",
        session.state().generation().label(),
        session.state().progress_percent(),
        history.len()
    );
    println!();

    Ok(history)
}
