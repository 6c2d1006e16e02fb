//! Seams between the wizard and its collaborators.
//!
//! - `GenerationBackend`: produces avatar videos (simulated or real)
//! - `HistoryStore`:      keeps finished results, newest first
//!
//! A backend answers a request with a `GenerationTask`: an ordered event
//! channel plus a cancellation signal. Swapping the simulated backend for a
//! real one does not change the controller's contract.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};

use studio_contracts::{
    error::StudioResult,
    generation::{GenerationEvent, GenerationRequest},
    record::{RecordId, ResultRecord},
};

/// Something that can turn a `GenerationRequest` into a video.
pub trait GenerationBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Start a job. Events arrive on the returned task in order and end
    /// with exactly one terminal event (`Completed` or `Failed`) unless
    /// the task is cancelled first.
    fn spawn(&self, request: GenerationRequest) -> StudioResult<GenerationTask>;
}

/// Append-only store of finished results.
///
/// Implementations use interior mutability so one store can be shared by a
/// session and the views that read it.
pub trait HistoryStore: Send + Sync {
    /// Insert `record` at the front.
    fn prepend(&self, record: ResultRecord) -> StudioResult<()>;

    /// Give `record` the first time-derived id at or after `at` that no stored
    /// record uses, then insert it at the front. The id choice and the insert
    /// happen as one step, so concurrent writers never collide.
    ///
    /// Returns the record as stored.
    fn prepend_new(&self, record: ResultRecord, at: DateTime<Utc>) -> StudioResult<ResultRecord>;

    /// Most recent record, if any.
    fn latest(&self) -> Option<ResultRecord>;

    /// All records, newest first.
    fn records(&self) -> Vec<ResultRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &RecordId) -> bool;
}

/// Outcome of a non-blocking poll on a `GenerationTask`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPoll {
    Event(GenerationEvent),
    /// Nothing ready yet.
    Pending,
    /// The producer is gone and every event has been consumed.
    Closed,
}

/// Consumer side of a running job.
///
/// Dropping the task cancels the job.
#[derive(Debug)]
pub struct GenerationTask {
    events: mpsc::UnboundedReceiver<GenerationEvent>,
    cancel: Option<oneshot::Sender<()>>,
}

/// Producer side of a running job, held by the backend.
#[derive(Debug)]
pub struct GenerationSink {
    events: mpsc::UnboundedSender<GenerationEvent>,
    cancelled: oneshot::Receiver<()>,
    fired: bool,
}

impl GenerationTask {
    /// Create a connected task/sink pair.
    pub fn channel() -> (GenerationSink, GenerationTask) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        (
            GenerationSink {
                events: event_tx,
                cancelled: cancel_rx,
                fired: false,
            },
            GenerationTask {
                events: event_rx,
                cancel: Some(cancel_tx),
            },
        )
    }

    /// Wait for the next event. `None` once the producer has finished.
    pub async fn next_event(&mut self) -> Option<GenerationEvent> {
        if self.is_cancelled() {
            return None;
        }
        self.events.recv().await
    }

    /// Take the next event if one is ready.
    pub fn try_next_event(&mut self) -> TaskPoll {
        if self.is_cancelled() {
            return TaskPoll::Closed;
        }
        match self.events.try_recv() {
            Ok(event) => TaskPoll::Event(event),
            Err(mpsc::error::TryRecvError::Empty) => TaskPoll::Pending,
            Err(mpsc::error::TryRecvError::Disconnected) => TaskPoll::Closed,
        }
    }

    /// Ask the producer to stop. Already-queued events are discarded.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl GenerationSink {
    /// Deliver an event. Returns false when the consumer is gone.
    pub fn send(&self, event: GenerationEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Resolves when the consumer cancels or drops the task.
    pub async fn cancelled(&mut self) {
        if self.fired {
            return;
        }
        let _ = (&mut self.cancelled).await;
        self.fired = true;
    }

    /// Non-blocking check of the cancellation signal.
    pub fn is_cancelled(&mut self) -> bool {
        if !self.fired {
            self.fired = !matches!(
                self.cancelled.try_recv(),
                Err(oneshot::error::TryRecvError::Empty)
            );
        }
        self.fired
    }
}
