// Session state
//
// The Session owns the work list, the user-facing log, the patcher and the
// metrics, and publishes SessionEvent values so a host can keep its
// "process" trigger in step with the work list.

pub mod log_sink;

pub use log_sink::{LogEntry, LogSink};

use crate::metrics::Metrics;
use crate::models::WorkList;
use crate::services::patcher::Patcher;
use crate::services::picker::FilePicker;
use crate::services::{processor, selector};
use tokio::sync::broadcast;

/// Events emitted when the session changes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The work list was merged into or cleared
    ProcessingAvailability { enabled: bool },

    /// A batch is about to run over `pending` files
    BatchStarted { pending: usize },

    /// A batch ran to completion
    BatchFinished { attempted: usize },

    /// The user-facing log was cleared
    LogCleared,
}

/// Observable session state, derived from the work list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing pending, processing disabled
    Idle,
    /// At least one file pending, processing enabled
    Ready,
}

/// One user session: a work list, its log, and the patcher that drains it.
///
/// All operations run on the caller's thread. Subscribers receive
/// [`SessionEvent`]s through a broadcast channel; sending with no
/// subscribers is not an error.
pub struct Session<P> {
    work_list: WorkList,
    log: LogSink,
    patcher: P,
    metrics: Metrics,
    events: broadcast::Sender<SessionEvent>,
}

impl<P: Patcher> Session<P> {
    pub fn new(patcher: P) -> Self {
        let (events, _) = broadcast::channel(100);
        Self {
            work_list: WorkList::new(),
            log: LogSink::new(),
            patcher,
            metrics: Metrics::new(),
            events,
        }
    }

    pub fn is_processing_enabled(&self) -> bool {
        !self.work_list.is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.is_processing_enabled() {
            SessionState::Ready
        } else {
            SessionState::Idle
        }
    }

    /// Run the picker and queue whatever it returns.
    ///
    /// Returns the number of distinct files in the selection. A cancelled or
    /// empty selection changes nothing and emits no event.
    pub fn select<F>(&mut self, picker: &mut F) -> usize
    where
        F: FilePicker + ?Sized,
    {
        let selected = selector::select_files(picker, &mut self.work_list, &mut self.log);
        if selected.is_empty() {
            return 0;
        }

        self.metrics.record_selection(selected.len());
        self.publish_availability();
        selected.len()
    }

    /// Patch every pending file, then return to idle.
    ///
    /// Safe to call with nothing pending; only the start and end markers are
    /// logged in that case. Returns the number of files attempted.
    pub fn process(&mut self) -> usize {
        self.emit(SessionEvent::BatchStarted {
            pending: self.work_list.len(),
        });

        let attempted = processor::run_batch(
            &mut self.work_list,
            &mut self.log,
            &mut self.patcher,
            &mut self.metrics,
        );

        self.publish_availability();
        self.emit(SessionEvent::BatchFinished { attempted });
        attempted
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.emit(SessionEvent::LogCleared);
    }

    pub fn work_list(&self) -> &WorkList {
        &self.work_list
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn patcher(&self) -> &P {
        &self.patcher
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish_availability(&self) {
        let enabled = self.is_processing_enabled();
        tracing::debug!("Processing enabled: {}", enabled);
        self.emit(SessionEvent::ProcessingAvailability { enabled });
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }
}
