use std::path::{Path, PathBuf};
use std::sync::Arc;

use poll_promise::Promise;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use super::messages::{AppError, DashboardSnapshot, RunReason, RunRequest, RunResult};
use super::state::DashboardState;
use super::worker;

/// Owns the front buffer and schedules pipeline runs on a background thread.
///
/// At most one run is in flight. Requests arriving meanwhile collapse into a
/// single follow-up run started once the current one lands.
pub struct DashboardEngine {
    data_path: PathBuf,
    pub state: DashboardState,
    promise: Option<Promise<RunResult>>,
    pending: Option<RunReason>,
}

impl DashboardEngine {
    /// Start from a snapshot produced synchronously before the window opened.
    pub fn new(data_path: PathBuf, initial: DashboardSnapshot) -> Self {
        let mut state = DashboardState::new();
        state.update_buffer(Arc::new(initial));
        Self {
            data_path,
            state,
            promise: None,
            pending: None,
        }
    }

    /// An engine with nothing loaded yet; the first `update` after a request fills it.
    pub fn empty(data_path: PathBuf) -> Self {
        Self {
            data_path,
            state: DashboardState::new(),
            promise: None,
            pending: None,
        }
    }

    /// Returns TRUE while a run is in flight or queued.
    /// The UI keeps requesting repaints while this holds.
    pub fn update(&mut self) -> bool {
        // 1. Collect a finished run (swap buffers)
        let finished = self
            .promise
            .as_ref()
            .is_some_and(|promise| promise.ready().is_some());
        if finished {
            if let Some(Ok(result)) = self.promise.take().map(Promise::try_take) {
                self.handle_run_result(result);
            }
        }

        // 2. Dispatch the queued follow-up
        if self.promise.is_none() {
            if let Some(reason) = self.pending.take() {
                self.dispatch(reason);
            }
        }

        self.is_busy()
    }

    /// Ask for a full rerun (reload + refit).
    pub fn request_run(&mut self, reason: RunReason) {
        if self.promise.is_some() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_pipeline_scheduling {
                log::info!("Run in flight; queued follow-up ({})", reason);
            }
            self.pending = Some(reason);
            return;
        }
        self.dispatch(reason);
    }

    pub fn snapshot(&self) -> Option<&Arc<DashboardSnapshot>> {
        self.state.snapshot.as_ref()
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.state.last_error.as_ref()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn is_running(&self) -> bool {
        self.promise.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_running() || self.has_pending()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn get_worker_status_msg(&self) -> Option<String> {
        match (self.is_running(), self.has_pending()) {
            (true, true) => Some("Recalculando (1 na fila)".to_string()),
            (true, false) => Some("Recalculando".to_string()),
            (false, true) => Some("Na fila".to_string()),
            (false, false) => None,
        }
    }

    // --- INTERNAL LOGIC ---

    fn dispatch(&mut self, reason: RunReason) {
        let request = RunRequest {
            path: self.data_path.clone(),
            reason,
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_pipeline_scheduling {
            log::info!("Dispatching pipeline run ({})", reason);
        }

        self.promise = Some(Promise::spawn_thread("pipeline_run", move || {
            worker::execute(request)
        }));
    }

    fn handle_run_result(&mut self, result: RunResult) {
        match result.result {
            Ok(snapshot) => {
                if result.duration_ms > 100 {
                    log::info!(
                        "Run ({}) completed in {} ms",
                        result.request.reason,
                        result.duration_ms
                    );
                }
                self.state.update_buffer(snapshot);
            }
            Err(e) => {
                log::error!("Run ({}) failed: {}", result.request.reason, e);
                self.state.record_failure(e);
            }
        }
    }
}
