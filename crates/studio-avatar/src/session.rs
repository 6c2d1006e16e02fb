//! The avatar generator session.
//!
//! `AvatarSession` owns one `WizardState` and wires the transition controller
//! to a generation backend and a result history:
//!
//!   set_input / advance / retreat ──▶ controller ──▶ WizardState
//!   start_generation ──▶ controller guard ──▶ backend.spawn ──▶ GenerationTask
//!   pump / wait_for_outcome ──▶ events ──▶ controller ──▶ history.prepend
//!
//! At most one generation task is live per session: the controller refuses
//! to start while one is running, and `reset` cancels any task in flight.

use chrono::Utc;
use tracing::{debug, info, warn};

use studio_contracts::{
    error::{StudioError, StudioResult},
    generation::{GenerationEvent, GenerationRequest},
    record::{RecordId, ResultRecord, SessionId},
    wizard::{GenerationStatus, InputValue, StepId},
};
use studio_core::{
    traits::{GenerationBackend, GenerationTask, HistoryStore, TaskPoll},
    TransitionController, WizardState,
};

/// How a generation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Completed(ResultRecord),
    Failed(String),
}

/// The job currently in flight and the inputs it was started with.
struct ActiveGeneration {
    task: GenerationTask,
    request: GenerationRequest,
}

/// One user's pass through the avatar generator.
pub struct AvatarSession {
    session_id: SessionId,
    controller: TransitionController,
    state: WizardState,
    backend: Box<dyn GenerationBackend>,
    history: Box<dyn HistoryStore>,
    active: Option<ActiveGeneration>,
    last_result: Option<ResultRecord>,
}

impl AvatarSession {
    /// Create a session on step 1 with a fresh wizard state.
    pub fn new(backend: Box<dyn GenerationBackend>, history: Box<dyn HistoryStore>) -> Self {
        let session_id = SessionId::new();
        debug!(
            session_id = %session_id,
            backend = backend.name(),
            history_len = history.len(),
            "avatar session created"
        );
        Self {
            session_id,
            controller: TransitionController::new(),
            state: WizardState::default(),
            backend,
            history,
            active: None,
            last_result: None,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Read-only view of the wizard.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn history(&self) -> &dyn HistoryStore {
        self.history.as_ref()
    }

    /// The record produced by this session's last generation, while the
    /// wizard is showing it (status `Done`).
    pub fn just_completed(&self) -> Option<&ResultRecord> {
        match self.state.generation() {
            GenerationStatus::Done => self.last_result.as_ref(),
            _ => None,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.controller.can_advance(&self.state)
    }

    /// Width of the step-tracker bar, 0.0–100.0.
    pub fn track_percent(&self) -> f64 {
        self.controller.track_percent(&self.state)
    }

    pub fn set_input(&mut self, value: InputValue) -> StudioResult<()> {
        debug!(session_id = %self.session_id, slot = ?value.slot(), "setting input");
        self.state.set_input(value)
    }

    pub fn advance(&mut self) -> StudioResult<StepId> {
        self.controller.advance(&mut self.state)
    }

    pub fn retreat(&mut self) -> StudioResult<StepId> {
        self.controller.retreat(&mut self.state)
    }

    /// Pass the controller's guard, then hand the request to the backend.
    ///
    /// If the backend cannot start the job, the generation is marked failed
    /// and the backend's error is returned.
    pub fn start_generation(&mut self) -> StudioResult<()> {
        let request = self
            .controller
            .start_generation(&mut self.state, &self.session_id)?;

        match self.backend.spawn(request.clone()) {
            Ok(task) => {
                info!(
                    session_id = %self.session_id,
                    backend = self.backend.name(),
                    "generation task spawned"
                );
                self.active = Some(ActiveGeneration { task, request });
                self.last_result = None;
                Ok(())
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "backend refused generation");
                self.controller.fail_generation(&mut self.state, e.to_string())?;
                Err(e)
            }
        }
    }

    /// Apply every event that is ready without waiting.
    ///
    /// Returns the outcome if the generation finished during this call.
    pub fn pump(&mut self) -> StudioResult<Option<GenerationOutcome>> {
        loop {
            let poll = match self.active.as_mut() {
                Some(active) => active.task.try_next_event(),
                None => return Ok(None),
            };
            match poll {
                TaskPoll::Event(event) => {
                    if let Some(outcome) = self.apply(event)? {
                        return Ok(Some(outcome));
                    }
                }
                TaskPoll::Pending => return Ok(None),
                TaskPoll::Closed => return self.task_closed().map(Some),
            }
        }
    }

    /// Apply events until the running generation finishes.
    pub async fn wait_for_outcome(&mut self) -> StudioResult<GenerationOutcome> {
        loop {
            let event = match self.active.as_mut() {
                Some(active) => active.task.next_event().await,
                None => {
                    return Err(StudioError::invalid_transition(
                        "wait_for_outcome",
                        "no generation is running",
                    ))
                }
            };
            match event {
                Some(event) => {
                    if let Some(outcome) = self.apply(event)? {
                        return Ok(outcome);
                    }
                }
                None => return self.task_closed(),
            }
        }
    }

    /// Stop the running generation. The wizard ends up `Failed("cancelled")`
    /// and the history is unchanged.
    pub fn cancel_generation(&mut self) -> StudioResult<()> {
        let Some(mut active) = self.active.take() else {
            return Err(StudioError::invalid_transition(
                "cancel_generation",
                "no generation is running",
            ));
        };
        active.task.cancel();
        info!(session_id = %self.session_id, "generation cancelled");
        self.controller.fail_generation(&mut self.state, "cancelled")
    }

    /// Start over on step 1. Any task in flight is cancelled; the history is kept.
    pub fn reset(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.task.cancel();
        }
        self.state.reset();
        self.last_result = None;
        debug!(session_id = %self.session_id, "wizard reset");
    }

    fn apply(&mut self, event: GenerationEvent) -> StudioResult<Option<GenerationOutcome>> {
        match event {
            GenerationEvent::Progress(percent) => {
                self.controller.record_progress(&mut self.state, percent)?;
                Ok(None)
            }
            GenerationEvent::Completed(output) => {
                let Some(active) = self.active.take() else {
                    return Ok(None);
                };

                // The wizard only reaches Done once the record is stored.
                let now = Utc::now();
                let pending = ResultRecord::from_output(
                    RecordId::from_time(now),
                    output,
                    active.request.style,
                    now,
                );
                let record = match self.history.prepend_new(pending, now) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(session_id = %self.session_id, error = %e, "result could not be recorded");
                        let reason = e.to_string();
                        self.controller.fail_generation(&mut self.state, reason.clone())?;
                        return Ok(Some(GenerationOutcome::Failed(reason)));
                    }
                };
                self.controller.complete_generation(&mut self.state)?;
                self.last_result = Some(record.clone());

                info!(
                    session_id = %self.session_id,
                    record_id = %record.id,
                    history_len = self.history.len(),
                    "generation recorded"
                );
                Ok(Some(GenerationOutcome::Completed(record)))
            }
            GenerationEvent::Failed(reason) => {
                self.active = None;
                self.controller.fail_generation(&mut self.state, reason.clone())?;
                Ok(Some(GenerationOutcome::Failed(reason)))
            }
        }
    }

    fn task_closed(&mut self) -> StudioResult<GenerationOutcome> {
        self.active = None;
        let reason = "generation task ended without a result".to_string();
        self.controller.fail_generation(&mut self.state, reason.clone())?;
        Ok(GenerationOutcome::Failed(reason))
    }
}
