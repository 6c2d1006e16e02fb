//! Scenario 2: Wizard Guards
//!
//! Shows every refusal the transition controller makes and that a refusal
//! leaves the wizard exactly where it was:
//!   - advancing without a photo
//!   - retreating from the first step
//!   - an audio file dropped into the photo slot
//!   - generating with only a photo
//!   - clearing the photo un-completes step 1
//!   - a second generation while one is running

use studio_contracts::{error::StudioResult, wizard::InputValue};
use studio_core::traits::HistoryStore;
use studio_generate::{GeneratorConfig, SimulatedGenerator};
use studio_history::InMemoryHistory;

use crate::{
    mock_data::{sample_audio, sample_image, seed_gallery},
    scenarios::{print_refusal, print_step},
    session::AvatarSession,
};

/// Run Scenario 2 and return the (unchanged) gallery.
pub async fn run_scenario(config: &GeneratorConfig) -> StudioResult<InMemoryHistory> {
    println!("=== Scenario 2: Wizard Guards ===");
    println!();

    let history = InMemoryHistory::with_records(seed_gallery());
    let mut session = AvatarSession::new(
        Box::new(SimulatedGenerator::new(config.clone())),
        Box::new(history.clone()),
    );

    print_step(session.state());

    println!("  Case A: advance with no photo");
    print_refusal(session.advance());

    println!("  Case B: retreat from step 1");
    print_refusal(session.retreat());

    println!("  Case C: audio file in the photo slot");
    print_refusal(session.set_input(InputValue::Image(Some(sample_audio()?))));

    println!("  Case D: generate with only a photo");
    session.set_input(InputValue::Image(Some(sample_image()?)))?;
    print_refusal(session.start_generation());
    println!("    status stays: {}", session.state().generation().label());

    println!("  Case E: clear the photo after completing steps 1 and 2");
    session.set_input(InputValue::Audio(Some(sample_audio()?)))?;
    println!(
        "    completed before: {:?}",
        session.state().completed_steps().iter().map(|s| s.0).collect::<Vec<_>>()
    );
    session.set_input(InputValue::Image(None))?;
    println!(
        "    completed after:  {:?}",
        session.state().completed_steps().iter().map(|s| s.0).collect::<Vec<_>>()
    );

    println!("  Case F: second generation while one is running");
    session.set_input(InputValue::Image(Some(sample_image()?)))?;
    session.start_generation()?;
    print_refusal(session.start_generation());
    print_refusal(session.retreat());

    session.reset();
    println!(
        "  Reset: back on step {}, gallery still has {} videos",
        session.state().current_step(),
        history.len()
    );
    println!();

    Ok(history)
}
