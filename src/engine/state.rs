use std::sync::Arc;
use std::time::Instant;

use super::messages::{AppError, DashboardSnapshot};

/// What the UI reads every frame.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The front buffer. Replaced wholesale when a run succeeds.
    pub snapshot: Option<Arc<DashboardSnapshot>>,

    pub last_update_time: Instant,
    pub runs_completed: usize,

    /// Load failure of the most recent run, if any
    pub last_error: Option<AppError>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            last_update_time: Instant::now(),
            runs_completed: 0,
            last_error: None,
        }
    }

    /// Promote a finished run to the front buffer.
    pub fn update_buffer(&mut self, snapshot: Arc<DashboardSnapshot>) {
        self.snapshot = Some(snapshot);
        self.last_update_time = Instant::now();
        self.runs_completed += 1;
        self.last_error = None;
    }

    /// Record a failed run. The previous snapshot is kept.
    pub fn record_failure(&mut self, error: AppError) {
        self.last_update_time = Instant::now();
        self.runs_completed += 1;
        self.last_error = Some(error);
    }
}
