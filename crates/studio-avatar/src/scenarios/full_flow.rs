//! Scenario 1: Photo + Voice → Avatar Video
//!
//! Walks the whole wizard the way a user would:
//!   1. Upload a photo (step 1 completes)
//!   2. Upload a voice recording (step 2 completes)
//!   3. Pick a style and flags on the Customize step
//!   4. Start generation; progress is polled like a UI frame loop would
//!   5. The finished video lands at the top of the gallery

use std::time::Duration;

use studio_contracts::{
    error::StudioResult,
    wizard::{AvatarStyle, InputValue},
};
use studio_core::traits::HistoryStore;
use studio_generate::{GeneratorConfig, SimulatedGenerator};
use studio_history::InMemoryHistory;

use crate::{
    mock_data::{sample_audio, sample_image, seed_gallery},
    scenarios::{print_gallery, print_outcome, print_step},
    session::AvatarSession,
};

/// Interval at which the demo polls for progress.
const FRAME: Duration = Duration::from_millis(50);

/// Run Scenario 1 and return the resulting gallery.
pub async fn run_scenario(config: &GeneratorConfig) -> StudioResult<InMemoryHistory> {
    println!("=== Scenario 1: Photo + Voice → Avatar Video ===");
    println!();

    let history = InMemoryHistory::with_records(seed_gallery());
    let mut session = AvatarSession::new(
        Box::new(SimulatedGenerator::new(config.clone())),
        Box::new(history.clone()),
    );

    println!("  Session: {}", session.session_id());
    println!("  Gallery before: {} videos", history.len());
    println!();

    let image = sample_image()?;
    let audio = sample_audio()?;

    print_step(session.state());
    println!("    photo  → {}", image);
    session.set_input(InputValue::Image(Some(image)))?;
    session.advance()?;

    print_step(session.state());
    println!("    voice  → {}", audio);
    session.set_input(InputValue::Audio(Some(audio)))?;
    session.advance()?;

    print_step(session.state());
    println!("    style  → {}", AvatarStyle::Professional);
    println!("    enhance with AI → on, premium → off");
    session.set_input(InputValue::Style(AvatarStyle::Professional))?;
    session.set_input(InputValue::EnhanceWithAi(true))?;
    session.set_input(InputValue::UsePremium(false))?;
    session.advance()?;

    print_step(session.state());
    session.start_generation()?;

    let mut shown = 0u8;
    let outcome = loop {
        tokio::time::sleep(FRAME).await;
        if let Some(outcome) = session.pump()? {
            break outcome;
        }
        let percent = session.state().progress_percent();
        if percent > shown {
            println!("    generating… {:>3}%", percent);
            shown = percent;
        }
    };

    println!();
    print_step(session.state());
    print_outcome(&outcome);
    println!("  Step tracker: {:.0}%", session.track_percent());
    println!();

    print_gallery(&history);
    Ok(history)
}
