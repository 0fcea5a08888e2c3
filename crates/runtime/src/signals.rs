/// User-interaction and render-lifecycle signals forwarded by the host
/// rendering surface.
///
/// The host pushes signals as they arrive; the core drains the queue at the
/// start of each frame. This replaces ad hoc DOM-style listener registration
/// with one explicit, typed channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputSignal {
    PointerDown,
    TouchStart,
    Wheel,
    KeyDown,
    DragStart,
    ZoomStart,
    BoxZoomStart,
    MoveEnd,
    BoxZoomCancel,
}

impl InputSignal {
    /// The four signals that count as direct user interaction for
    /// interrupt purposes.
    pub fn is_interaction(self) -> bool {
        matches!(
            self,
            InputSignal::PointerDown
                | InputSignal::TouchStart
                | InputSignal::Wheel
                | InputSignal::KeyDown
        )
    }
}

#[derive(Debug, Default)]
pub struct SignalQueue {
    pending: Vec<InputSignal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: InputSignal) {
        self.pending.push(signal);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes all pending signals in arrival order.
    pub fn drain(&mut self) -> Vec<InputSignal> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::{InputSignal, SignalQueue};

    #[test]
    fn drains_in_arrival_order() {
        let mut q = SignalQueue::new();
        q.push(InputSignal::Wheel);
        q.push(InputSignal::KeyDown);
        assert_eq!(q.len(), 2);

        let drained = q.drain();
        assert_eq!(drained, vec![InputSignal::Wheel, InputSignal::KeyDown]);
        assert!(q.is_empty());
    }

    #[test]
    fn interaction_signals_are_the_standard_four() {
        let interactions = [
            InputSignal::PointerDown,
            InputSignal::TouchStart,
            InputSignal::Wheel,
            InputSignal::KeyDown,
        ];
        for s in interactions {
            assert!(s.is_interaction(), "{s:?}");
        }
        for s in [
            InputSignal::DragStart,
            InputSignal::ZoomStart,
            InputSignal::BoxZoomStart,
            InputSignal::MoveEnd,
            InputSignal::BoxZoomCancel,
        ] {
            assert!(!s.is_interaction(), "{s:?}");
        }
    }
}
