//! # studio-avatar
//!
//! The avatar generator: a session that drives the five-step wizard, starts
//! generation jobs on a backend, and records finished videos in a history.
//!
//! Includes three demo scenarios using mock media:
//!
//! 1. **Photo + Voice → Avatar Video**: the full happy path with progress
//!    polling and a new gallery entry.
//! 2. **Wizard Guards**: every refusal the controller makes.
//! 3. **Failed and Cancelled Generations**: the failure exit and
//!    cancellation, leaving the gallery untouched.
//!
//! No files are read and no network calls are made.

pub mod mock_data;
pub mod scenarios;
pub mod session;

pub use session::{AvatarSession, GenerationOutcome};

/// Generator settings shipped with the demo.
pub const DEFAULT_GENERATOR_CONFIG: &str = include_str!("../config/generator.toml");

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    };

    use chrono::{DateTime, Utc};

    use studio_contracts::{
        error::{StudioError, StudioResult},
        generation::{GenerationEvent, GenerationOutput, GenerationRequest},
        media::MediaHandle,
        record::{RecordId, ResultRecord},
        wizard::{AvatarStyle, GenerationStatus, InputValue, StepId},
    };
    use studio_core::traits::{GenerationBackend, GenerationSink, GenerationTask, HistoryStore};
    use studio_generate::{GeneratorConfig, SimulatedGenerator};
    use studio_history::InMemoryHistory;

    use crate::{mock_data, AvatarSession, GenerationOutcome, DEFAULT_GENERATOR_CONFIG};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn output() -> GenerationOutput {
        GenerationOutput {
            title: "Avatar Video 10:00:00".to_string(),
            thumbnail_ref: "thumb.jpeg".to_string(),
            duration: "2:15".to_string(),
            size_label: "41 MB".to_string(),
            video_ref: "generated-avatar-video.mp4".to_string(),
        }
    }

    /// A backend that replays a fixed event list synchronously.
    ///
    /// With `hold_open` the sink is kept alive so the task looks like it is
    /// still running after the scripted events.
    struct ScriptedBackend {
        events: Vec<GenerationEvent>,
        hold_open: bool,
        refuse: bool,
        spawned: Arc<AtomicUsize>,
        sinks: Mutex<Vec<GenerationSink>>,
    }

    impl ScriptedBackend {
        fn new(events: Vec<GenerationEvent>) -> Self {
            Self {
                events,
                hold_open: false,
                refuse: false,
                spawned: Arc::new(AtomicUsize::new(0)),
                sinks: Mutex::new(Vec::new()),
            }
        }

        fn completing() -> Self {
            Self::new(vec![
                GenerationEvent::Progress(40),
                GenerationEvent::Progress(100),
                GenerationEvent::Completed(output()),
            ])
        }

        fn held_open(events: Vec<GenerationEvent>) -> Self {
            Self {
                hold_open: true,
                ..Self::new(events)
            }
        }
    }

    impl GenerationBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn spawn(&self, _request: GenerationRequest) -> StudioResult<GenerationTask> {
            if self.refuse {
                return Err(StudioError::GenerationFailed {
                    reason: "renderer offline".to_string(),
                });
            }
            self.spawned.fetch_add(1, Ordering::SeqCst);
            let (sink, task) = GenerationTask::channel();
            for event in &self.events {
                sink.send(event.clone());
            }
            if self.hold_open {
                self.sinks.lock().unwrap().push(sink);
            }
            Ok(task)
        }
    }

    /// A history whose writes always fail.
    struct RejectingHistory;

    impl RejectingHistory {
        fn disk_full() -> StudioError {
            StudioError::HistoryWriteFailed {
                reason: "disk full".to_string(),
            }
        }
    }

    impl HistoryStore for RejectingHistory {
        fn prepend(&self, _record: ResultRecord) -> StudioResult<()> {
            Err(Self::disk_full())
        }

        fn prepend_new(&self, _record: ResultRecord, _at: DateTime<Utc>) -> StudioResult<ResultRecord> {
            Err(Self::disk_full())
        }

        fn latest(&self) -> Option<ResultRecord> {
            None
        }

        fn records(&self) -> Vec<ResultRecord> {
            Vec::new()
        }

        fn len(&self) -> usize {
            0
        }

        fn contains(&self, _id: &RecordId) -> bool {
            false
        }
    }

    fn session_with(backend: impl GenerationBackend + 'static, history: &InMemoryHistory) -> AvatarSession {
        AvatarSession::new(Box::new(backend), Box::new(history.clone()))
    }

    fn fast_config(seed: u64) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.simulation.seed = Some(seed);
        config
    }

    fn fill_media(session: &mut AvatarSession) {
        session
            .set_input(InputValue::Image(Some(MediaHandle::new("a.png", 1024).unwrap())))
            .unwrap();
        session
            .set_input(InputValue::Audio(Some(MediaHandle::new("b.mp3", 2048).unwrap())))
            .unwrap();
    }

    // ── Full flow ─────────────────────────────────────────────────────────────

    /// Two seeded videos, photo + voice, three advances, generate: the
    /// gallery gains exactly one record with a fresh id.
    #[tokio::test(start_paused = true)]
    async fn end_to_end_generation_prepends_one_record() {
        let history = InMemoryHistory::with_records(mock_data::seed_gallery());
        let prior_ids: HashSet<String> = history.records().into_iter().map(|r| r.id.0).collect();
        assert_eq!(history.len(), 2);

        let mut session = session_with(SimulatedGenerator::new(fast_config(11)), &history);
        fill_media(&mut session);
        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.state().current_step(), StepId(4));

        session.start_generation().unwrap();
        let outcome = session.wait_for_outcome().await.unwrap();

        let record = match outcome {
            GenerationOutcome::Completed(record) => record,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(history.len(), 3);
        let newest = history.latest().unwrap();
        assert_eq!(newest.id, record.id);
        assert!(!prior_ids.contains(&newest.id.0));

        let state = session.state();
        assert_eq!(*state.generation(), GenerationStatus::Done);
        assert_eq!(state.progress_percent(), 100);
        assert_eq!(state.current_step(), StepId(state.table().step_count() as u8));
        assert_eq!(session.just_completed(), Some(&record));
        assert_eq!(record.style, Some(AvatarStyle::Professional));
    }

    #[tokio::test(start_paused = true)]
    async fn pumped_progress_never_decreases() {
        let history = InMemoryHistory::new();
        let mut session = session_with(SimulatedGenerator::new(fast_config(5)), &history);
        fill_media(&mut session);
        session.start_generation().unwrap();

        let mut seen = vec![session.state().progress_percent()];
        let outcome = loop {
            tokio::time::sleep(std::time::Duration::from_millis(70)).await;
            if let Some(outcome) = session.pump().unwrap() {
                break outcome;
            }
            seen.push(session.state().progress_percent());
        };

        assert!(matches!(outcome, GenerationOutcome::Completed(_)));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {:?}", seen);
        assert_eq!(session.state().progress_percent(), 100);
    }

    #[tokio::test]
    async fn pump_without_generation_is_a_no_op() {
        let history = InMemoryHistory::new();
        let mut session = session_with(ScriptedBackend::completing(), &history);
        assert_eq!(session.pump().unwrap(), None);
        assert!(session.wait_for_outcome().await.is_err());
    }

    // ── Guards ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn generation_needs_both_media() {
        let history = InMemoryHistory::new();
        let backend = ScriptedBackend::completing();
        let spawned = backend.spawned.clone();
        let mut session = session_with(backend, &history);
        session
            .set_input(InputValue::Image(Some(MediaHandle::new("a.png", 1024).unwrap())))
            .unwrap();

        assert!(session.start_generation().is_err());
        assert_eq!(*session.state().generation(), GenerationStatus::Idle);
        assert_eq!(spawned.load(Ordering::SeqCst), 0, "backend must not be called");
    }

    #[tokio::test]
    async fn only_one_task_is_live_per_session() {
        let history = InMemoryHistory::new();
        let backend = ScriptedBackend::held_open(vec![GenerationEvent::Progress(10)]);
        let spawned = backend.spawned.clone();
        let mut session = session_with(backend, &history);
        fill_media(&mut session);

        session.start_generation().unwrap();
        assert!(session.pump().unwrap().is_none());
        let err = session.start_generation().unwrap_err();

        assert!(matches!(err, StudioError::InvalidTransition { .. }));
        assert_eq!(spawned.load(Ordering::SeqCst), 1);
        assert_eq!(session.state().progress_percent(), 10);
    }

    #[tokio::test]
    async fn backend_refusal_marks_generation_failed() {
        let history = InMemoryHistory::new();
        let mut backend = ScriptedBackend::completing();
        backend.refuse = true;
        let mut session = session_with(backend, &history);
        fill_media(&mut session);

        let err = session.start_generation().unwrap_err();
        assert!(matches!(err, StudioError::GenerationFailed { .. }));
        assert!(matches!(session.state().generation(), GenerationStatus::Failed { .. }));
        assert!(history.is_empty());
    }

    // ── Failure, cancellation, reset ─────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn injected_failure_adds_nothing_to_history() {
        let history = InMemoryHistory::with_records(mock_data::seed_gallery());
        let mut config = fast_config(8);
        config.simulation.fail_at_percent = Some(50);
        let mut session = session_with(SimulatedGenerator::new(config), &history);
        fill_media(&mut session);

        session.start_generation().unwrap();
        let outcome = session.wait_for_outcome().await.unwrap();

        assert!(matches!(outcome, GenerationOutcome::Failed(_)));
        assert!(matches!(session.state().generation(), GenerationStatus::Failed { .. }));
        assert_eq!(session.state().current_step(), StepId(4));
        assert_eq!(history.len(), 2);
        assert!(session.just_completed().is_none());
    }

    #[tokio::test]
    async fn task_ending_without_result_fails_generation() {
        let history = InMemoryHistory::new();
        let backend = ScriptedBackend::new(vec![GenerationEvent::Progress(30)]);
        let mut session = session_with(backend, &history);
        fill_media(&mut session);

        session.start_generation().unwrap();
        let outcome = session.wait_for_outcome().await.unwrap();

        match outcome {
            GenerationOutcome::Failed(reason) => assert!(reason.contains("without a result")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(session.state().progress_percent(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_leaves_history_untouched() {
        let history = InMemoryHistory::with_records(mock_data::seed_gallery());
        let mut session = session_with(SimulatedGenerator::new(fast_config(9)), &history);
        fill_media(&mut session);

        session.start_generation().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(450)).await;
        session.pump().unwrap();
        session.cancel_generation().unwrap();

        assert_eq!(
            *session.state().generation(),
            GenerationStatus::Failed {
                reason: "cancelled".to_string()
            }
        );
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        assert_eq!(session.pump().unwrap(), None);
        assert_eq!(history.len(), 2);
        assert!(session.cancel_generation().is_err());
    }

    /// A finished job whose record cannot be stored must not leave the
    /// wizard on Done with nothing in the gallery.
    #[tokio::test(start_paused = true)]
    async fn unstored_result_fails_generation_and_allows_retry() {
        let mut session = AvatarSession::new(
            Box::new(SimulatedGenerator::new(fast_config(12))),
            Box::new(RejectingHistory),
        );
        fill_media(&mut session);
        session.start_generation().unwrap();

        let outcome = session.wait_for_outcome().await.unwrap();

        match outcome {
            GenerationOutcome::Failed(reason) => assert!(reason.contains("disk full")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(matches!(session.state().generation(), GenerationStatus::Failed { .. }));
        assert_eq!(session.state().current_step(), StepId(4));
        assert!(!session.state().is_completed(StepId(4)));
        assert!(session.just_completed().is_none());
        assert!(session.history().is_empty());

        session.start_generation().unwrap();
        assert!(session.state().generation().is_running());
    }

    #[tokio::test]
    async fn reset_keeps_history_and_drops_live_task() {
        let history = InMemoryHistory::with_records(mock_data::seed_gallery());
        let mut session = session_with(ScriptedBackend::completing(), &history);
        fill_media(&mut session);
        session.start_generation().unwrap();
        session.wait_for_outcome().await.unwrap();
        assert_eq!(history.len(), 3);

        session.reset();

        let state = session.state();
        assert_eq!(state.current_step(), StepId(1));
        assert!(state.completed_steps().is_empty());
        assert_eq!(*state.generation(), GenerationStatus::Idle);
        assert_eq!(state.progress_percent(), 0);
        assert_eq!(history.len(), 3, "reset must not touch history");
        assert!(session.just_completed().is_none());

        // A reset while running discards the task.
        let mut running = session_with(
            ScriptedBackend::held_open(vec![GenerationEvent::Progress(20)]),
            &history,
        );
        fill_media(&mut running);
        running.start_generation().unwrap();
        running.reset();
        assert_eq!(running.pump().unwrap(), None);
        assert_eq!(*running.state().generation(), GenerationStatus::Idle);
    }

    #[tokio::test]
    async fn record_ids_stay_unique_within_one_millisecond() {
        let history = InMemoryHistory::new();
        let mut ids = HashSet::new();
        for _ in 0..5 {
            let mut session = session_with(ScriptedBackend::completing(), &history);
            fill_media(&mut session);
            session.start_generation().unwrap();
            match session.wait_for_outcome().await.unwrap() {
                GenerationOutcome::Completed(record) => assert!(ids.insert(record.id)),
                other => panic!("expected completion, got {:?}", other),
            }
        }
        assert_eq!(history.len(), 5);
    }

    #[tokio::test]
    async fn clearing_image_invalidates_step_one() {
        let history = InMemoryHistory::new();
        let mut session = session_with(ScriptedBackend::completing(), &history);
        fill_media(&mut session);
        assert!(session.state().is_completed(StepId(1)));
        assert!(session.state().is_completed(StepId(2)));

        session.set_input(InputValue::Image(None)).unwrap();

        assert!(!session.state().is_completed(StepId(1)));
        assert!(session.state().is_completed(StepId(2)));
        assert!(!session.can_advance());
    }

    // ── Shipped configuration and mock data ──────────────────────────────────

    #[test]
    fn shipped_config_parses_to_defaults() {
        let config = GeneratorConfig::from_toml_str(DEFAULT_GENERATOR_CONFIG).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn mock_media_is_accepted() {
        assert!(mock_data::sample_image().unwrap().kind.is_image());
        assert!(mock_data::sample_audio().unwrap().kind.is_audio());
        assert_eq!(mock_data::seed_gallery().len(), 2);
        assert_eq!(mock_data::seed_gallery()[0].title, "CEO Welcome Message");
    }
}
