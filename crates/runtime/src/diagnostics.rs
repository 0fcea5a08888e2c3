/// Deterministic diagnostics for the camera director.
///
/// Counters and duration stats must not depend on wall-clock time; everything
/// here is fed from frame timestamps so snapshots are replayable. Nothing in
/// this subsystem is user-facing; these numbers exist for logs and debug UI
/// only.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    pub sessions_started: u64,
    pub sessions_completed: u64,
    pub sessions_stopped: u64,
    /// `start_*` calls rejected because a session was already active.
    pub sessions_rejected: u64,
    /// Interrupt handler firings that actually stopped a session.
    pub interrupts_fired: u64,
    pub selections_consumed: u64,
    /// Lifetimes of ended sessions, in milliseconds.
    pub session_ms: DurationStats,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DurationStats {
    pub count: u64,
    pub sum_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl DurationStats {
    pub fn record(&mut self, ms: f64) {
        if self.count == 0 {
            self.min_ms = ms;
            self.max_ms = ms;
        } else {
            self.min_ms = self.min_ms.min(ms);
            self.max_ms = self.max_ms.max(ms);
        }
        self.count += 1;
        self.sum_ms += ms;
    }

    pub fn mean_ms(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_ms / self.count as f64)
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable, log-friendly snapshot of the counters.
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("interrupts_fired", self.interrupts_fired),
            ("selections_consumed", self.selections_consumed),
            ("sessions_completed", self.sessions_completed),
            ("sessions_rejected", self.sessions_rejected),
            ("sessions_started", self.sessions_started),
            ("sessions_stopped", self.sessions_stopped),
        ]
    }
}
