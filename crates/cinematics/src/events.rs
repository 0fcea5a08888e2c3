use foundation::geo::LngLat;
use foundation::time::Time;

use crate::session::{SessionId, SessionKind};

/// Typed notifications from the director to the host.
///
/// The rendering layer drains these to drive side effects the core does not
/// own: the targeting crosshair overlay and selection highlighting. Session
/// lifecycle events exist for diagnostics and host chaining.
#[derive(Debug, Clone, PartialEq)]
pub enum CinematicEvent {
    SessionStarted {
        id: SessionId,
        kind: SessionKind,
    },
    SessionCompleted {
        id: SessionId,
        kind: SessionKind,
    },
    SessionStopped {
        id: SessionId,
        kind: SessionKind,
    },
    /// A `start_*` call arrived while a session was active.
    SessionRejected {
        kind: SessionKind,
    },
    CrosshairPlaced {
        at: LngLat,
    },
    CrosshairFadeStarted,
    CrosshairRemoved,
    /// Exactly one entity is highlighted at a time; a new `HighlightSet`
    /// is always preceded by `HighlightCleared` for the previous one.
    HighlightSet {
        properties: serde_json::Value,
    },
    HighlightCleared,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    pub at: Time,
    pub event: CinematicEvent,
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, at: Time, event: CinematicEvent) {
        self.events.push(LoggedEvent { at, event });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{CinematicEvent, EventLog};
    use foundation::time::Time;

    #[test]
    fn records_events_with_timestamps() {
        let mut log = EventLog::new();
        log.emit(Time(250.0), CinematicEvent::CrosshairFadeStarted);
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].at, Time(250.0));
    }

    #[test]
    fn drain_clears_the_log() {
        let mut log = EventLog::new();
        log.emit(Time::ZERO, CinematicEvent::HighlightCleared);
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }
}
