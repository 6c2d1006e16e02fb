//! Timer-driven stand-in for a real avatar video renderer.
//!
//! Each job runs as its own tokio task:
//!
//!   sleep(tick) → progress += rand(1..=max_step) → Progress(p)   (until p = 100)
//!   sleep(completion_delay) → Completed(output)
//!
//! Events go out strictly in order and `Completed` is always sent after the
//! final `Progress(100)`. Cancellation is observed at every await point; a
//! cancelled job sends nothing further.

use chrono::Local;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use studio_contracts::{
    error::{StudioError, StudioResult},
    generation::{GenerationEvent, GenerationRequest},
};
use studio_core::traits::{GenerationBackend, GenerationSink, GenerationTask};

use crate::config::GeneratorConfig;

/// A `GenerationBackend` that fakes rendering with timers.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGenerator {
    config: GeneratorConfig,
}

impl SimulatedGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl GenerationBackend for SimulatedGenerator {
    fn name(&self) -> &str {
        "simulated"
    }

    /// Spawn the job on the current tokio runtime.
    ///
    /// Returns `Err(GenerationFailed)` when called outside a runtime.
    fn spawn(&self, request: GenerationRequest) -> StudioResult<GenerationTask> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            StudioError::GenerationFailed {
                reason: format!("no async runtime available: {}", e),
            }
        })?;

        let rng = match self.config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (sink, task) = GenerationTask::channel();
        runtime.spawn(run_job(self.config.clone(), request, sink, rng));
        Ok(task)
    }
}

async fn run_job(
    config: GeneratorConfig,
    request: GenerationRequest,
    mut sink: GenerationSink,
    mut rng: StdRng,
) {
    let session_id = request.session_id.to_string();
    let tick = config.timing.tick_interval();
    let max_step = config.timing.max_step_percent.max(1);
    let mut progress: u8 = 0;

    debug!(session_id = %session_id, style = %request.style, "simulated job running");

    while progress < 100 {
        tokio::select! {
            _ = sink.cancelled() => {
                debug!(session_id = %session_id, progress, "simulated job cancelled");
                return;
            }
            _ = tokio::time::sleep(tick) => {}
        }

        let step = rng.gen_range(1..=max_step);
        progress = progress.saturating_add(step).min(100);
        if !sink.send(GenerationEvent::Progress(progress)) {
            return;
        }

        if let Some(fail_at) = config.simulation.fail_at_percent {
            if progress >= fail_at {
                warn!(session_id = %session_id, progress, "simulated failure injected");
                sink.send(GenerationEvent::Failed(format!(
                    "simulated failure at {}%",
                    progress
                )));
                return;
            }
        }
    }

    tokio::select! {
        _ = sink.cancelled() => {
            debug!(session_id = %session_id, "simulated job cancelled before completion");
            return;
        }
        _ = tokio::time::sleep(config.timing.completion_delay()) => {}
    }

    let output = config.output.render(Local::now());
    info!(session_id = %session_id, title = %output.title, "simulated job finished");
    sink.send(GenerationEvent::Completed(output));
}
