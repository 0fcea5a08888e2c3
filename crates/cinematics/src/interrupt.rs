use runtime::signals::InputSignal;

use crate::session::SessionId;

/// The four signals that cancel a cinematic on first user input.
pub const INTERRUPT_SIGNALS: [InputSignal; 4] = [
    InputSignal::PointerDown,
    InputSignal::TouchStart,
    InputSignal::Wheel,
    InputSignal::KeyDown,
];

/// Binds the standard interaction signals to "stop the armed session".
///
/// The binding fires at most once: the first matching signal disarms all
/// four bindings before the stop is delivered, so later signals are no-ops
/// until the coordinator is armed for a new session. Arming while already
/// armed rebinds to the new session (the old one has been superseded).
///
/// The caller must still check that the returned session is running before
/// stopping it: a session that completed naturally while armed must not
/// receive a second end-of-life callback.
#[derive(Debug, Default)]
pub struct InterruptCoordinator {
    armed_for: Option<SessionId>,
    bound: Vec<InputSignal>,
}

impl InterruptCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, session: SessionId) {
        self.armed_for = Some(session);
        self.bound = INTERRUPT_SIGNALS.to_vec();
    }

    /// Removes all bindings. Returns whether any were present.
    pub fn disarm(&mut self) -> bool {
        self.bound.clear();
        self.armed_for.take().is_some()
    }

    pub fn armed(&self) -> Option<SessionId> {
        self.armed_for
    }

    pub fn bound_signals(&self) -> &[InputSignal] {
        &self.bound
    }

    /// Feeds one signal through the bindings. On the first interaction
    /// signal this returns the session to stop and unbinds itself.
    pub fn on_signal(&mut self, signal: InputSignal) -> Option<SessionId> {
        if !self.bound.contains(&signal) {
            return None;
        }
        self.bound.clear();
        self.armed_for.take()
    }
}

#[cfg(test)]
mod tests {
    use runtime::signals::InputSignal;

    use super::{INTERRUPT_SIGNALS, InterruptCoordinator};
    use crate::session::SessionId;

    #[test]
    fn first_interaction_fires_and_unbinds_all_four() {
        let mut coordinator = InterruptCoordinator::new();
        coordinator.arm(SessionId(3));
        assert_eq!(coordinator.bound_signals(), &INTERRUPT_SIGNALS);

        assert_eq!(
            coordinator.on_signal(InputSignal::KeyDown),
            Some(SessionId(3))
        );
        assert!(coordinator.bound_signals().is_empty());
        assert_eq!(coordinator.armed(), None);

        // Every subsequent signal is a no-op.
        for signal in INTERRUPT_SIGNALS {
            assert_eq!(coordinator.on_signal(signal), None);
        }
    }

    #[test]
    fn non_interaction_signals_do_not_fire() {
        let mut coordinator = InterruptCoordinator::new();
        coordinator.arm(SessionId(1));

        assert_eq!(coordinator.on_signal(InputSignal::MoveEnd), None);
        assert_eq!(coordinator.on_signal(InputSignal::DragStart), None);
        assert_eq!(coordinator.armed(), Some(SessionId(1)));
        assert_eq!(coordinator.bound_signals().len(), 4);
    }

    #[test]
    fn disarm_is_idempotent() {
        let mut coordinator = InterruptCoordinator::new();
        coordinator.arm(SessionId(2));
        assert!(coordinator.disarm());
        assert!(!coordinator.disarm());
        assert_eq!(coordinator.on_signal(InputSignal::Wheel), None);
    }

    #[test]
    fn rearming_supersedes_the_previous_session() {
        let mut coordinator = InterruptCoordinator::new();
        coordinator.arm(SessionId(1));
        coordinator.arm(SessionId(2));
        assert_eq!(
            coordinator.on_signal(InputSignal::PointerDown),
            Some(SessionId(2))
        );
    }
}
